pub mod cli;
pub mod core;
pub mod logging;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;

use crate::cli::CheckArgs;
use crate::core::feed::{build_client, fetch_feed, FetchError};
use crate::core::report::Report;
use crate::core::verdict::{evaluate, Conditions};

pub const NO_NEWS: &str = "No news == good news";

/// Fetches `url` once and turns the outcome into a status line.
///
/// Fetch failures and non-200 responses are critical, an empty feed is OK,
/// and anything else goes through the verdict engine with `now` as the
/// reference time.
pub async fn check_feed(
    client: &reqwest::Client,
    url: &str,
    conditions: &Conditions,
    now: DateTime<Utc>,
) -> Report {
    let fetched = match fetch_feed(client, url).await {
        Ok(fetched) => fetched,
        Err(FetchError::Request(error)) => {
            tracing::warn!(url, %error, "feed request failed");
            return Report::critical(format!("Could not parse URL ({url}): {error}"));
        }
        Err(error) => {
            tracing::warn!(url, %error, "feed could not be read");
            return Report::critical(format!("Malformed feed: {error}"));
        }
    };

    if !fetched.is_ok_status() {
        let reason = StatusCode::from_u16(fetched.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unexpected status");
        return Report::critical(format!("Status {} - {reason}", fetched.status));
    }

    let Some(newest) = fetched.newest() else {
        return Report::ok(NO_NEWS);
    };

    let verdict = evaluate(newest, now, conditions);
    tracing::debug!(severity = ?verdict.severity, age_hours = verdict.age_hours, "evaluated newest entry");
    Report::from_verdict(verdict, conditions.emit_perfdata)
}

pub async fn run(args: &CheckArgs) -> Report {
    let client = match build_client(args.timeout()) {
        Ok(client) => client,
        Err(error) => {
            tracing::error!(%error, "failed to build http client");
            return Report::unknown(format!("Could not initialise HTTP client: {error}"));
        }
    };

    check_feed(&client, &args.feed_url(), &args.conditions(), Utc::now()).await
}
