use check_rss_lib::cli::{invalid_arguments, is_informational, CheckArgs};
use check_rss_lib::logging::init_logging;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = match CheckArgs::try_parse() {
        Ok(args) => args,
        Err(error) if is_informational(&error) => error.exit(),
        Err(error) => invalid_arguments(&error).print_and_exit(),
    };

    init_logging(&args.log_level);
    check_rss_lib::run(&args).await.print_and_exit()
}
