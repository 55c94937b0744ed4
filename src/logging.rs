use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber so stdout stays a single status line.
///
/// `RUST_LOG` wins over `level`; an unparseable filter falls back to `warn`.
/// Calling this more than once is harmless.
pub fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            version = env!("CARGO_PKG_VERSION"),
            level,
            "logging initialized"
        );
    }
}
