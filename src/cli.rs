use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::core::feed::normalize_feed_url;
use crate::core::report::Report;
use crate::core::verdict::{Conditions, MatchList, Verbosity};

/// A simple monitoring plugin to check an RSS feed.
#[derive(Parser, Debug)]
#[command(
    name = "check_rss",
    version,
    about,
    long_about = None,
    after_help = "If you do not specify any warning or critical conditions, it will always return OK.\n\
                  This will only check the newest feed entry."
)]
pub struct CheckArgs {
    /// URL of RSS feed to monitor
    #[arg(short = 'H', value_name = "URL")]
    pub rssfeed: String,

    /// Critical condition if PRESENT (comma separated)
    #[arg(short = 'c', long = "criticalif", value_name = "LIST")]
    pub critical_if: Option<MatchList>,

    /// Critical condition if MISSING (comma separated)
    #[arg(short = 'C', long = "criticalnot", value_name = "LIST")]
    pub critical_not: Option<MatchList>,

    /// Warning condition if PRESENT (comma separated)
    #[arg(short = 'w', long = "warningif", value_name = "LIST")]
    pub warning_if: Option<MatchList>,

    /// Warning condition if MISSING (comma separated)
    #[arg(short = 'W', long = "warningnot", value_name = "LIST")]
    pub warning_not: Option<MatchList>,

    /// Hours since last post. Will return critical if less than or equal to this amount
    #[arg(short = 'T', long = "hours", value_name = "HOURS", allow_negative_numbers = true)]
    pub hours: Option<i64>,

    /// Search the titles only. The default is to search title and description
    #[arg(short = 't', long = "titleonly")]
    pub title_only: bool,

    /// Append basic performance data (0 if OK, 1 if WARNING, 2 if CRITICAL)
    #[arg(short = 'p', long = "perfdata")]
    pub perfdata: bool,

    /// 0 = age and title, 1 = age, title and link, 2 = age, title, description and link
    #[arg(
        short = 'v',
        long = "verbosity",
        value_name = "LEVEL",
        default_value_t = 2,
        value_parser = clap::value_parser!(u8).range(0..=2)
    )]
    pub verbosity: u8,

    /// Seconds to wait for the feed before giving up
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Diagnostic log filter written to stderr; RUST_LOG takes precedence
    #[arg(long = "log-level", value_name = "FILTER", default_value = "warn")]
    pub log_level: String,
}

impl CheckArgs {
    pub fn feed_url(&self) -> String {
        normalize_feed_url(&self.rssfeed)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn conditions(&self) -> Conditions {
        Conditions {
            critical_if_any: self.critical_if.clone(),
            critical_if_none_of: self.critical_not.clone(),
            max_freshness_hours: self.hours,
            warning_if_any: self.warning_if.clone(),
            warning_if_none_of: self.warning_not.clone(),
            title_only: self.title_only,
            verbosity: Verbosity::from_level(self.verbosity).unwrap_or_default(),
            emit_perfdata: self.perfdata,
        }
    }
}

/// Whether a parse failure is really a request for help or version text.
pub fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

pub fn invalid_arguments(error: &clap::Error) -> Report {
    let rendered = error.to_string();
    let reason = rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let reason = reason.trim_start_matches("error: ");
    let usage = CheckArgs::command().render_usage().to_string();
    Report::unknown(format!("Invalid argument(s): {reason} ; {}", usage.trim()))
}
