use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

use super::parser::{newest_first, parse_feed_bytes, FeedParseError};
use super::types::{FeedEntry, FetchedFeed};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const FEED_ACCEPT: &str = "application/rss+xml, application/rdf+xml, application/atom+xml, \
     application/feed+json, application/xml;q=0.9, text/xml;q=0.8";

const USER_AGENT: &str = concat!("check_rss/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error(transparent)]
    Parse(#[from] FeedParseError),
    #[error("newest entry has no publication date")]
    MissingTimestamp,
}

pub type FetchResult = Result<FetchedFeed, FetchError>;

pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Prefixes `http://` onto a bare host or path.
pub fn normalize_feed_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// Performs a single GET and resolves the feed's entries, newest first.
///
/// A non-200 response is not an error here: it comes back with its status
/// and no entries, and the caller decides what it means.
pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> FetchResult {
    tracing::debug!(url, "fetching feed");
    let response = client.get(url).header(ACCEPT, FEED_ACCEPT).send().await?;
    let status = response.status();
    if status.as_u16() != 200 {
        tracing::warn!(url, status = status.as_u16(), "feed returned non-success status");
        return Ok(FetchedFeed {
            status: status.as_u16(),
            entries: Vec::new(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    let body = response.bytes().await?;
    tracing::debug!(url, bytes = body.len(), ?content_type, "received feed body");

    let mut parsed = parse_feed_bytes(&body)?;
    newest_first(&mut parsed.entries);

    let newest_is_dated = parsed
        .entries
        .first()
        .map_or(true, |entry| entry.published_at.is_some());
    if !newest_is_dated {
        return Err(FetchError::MissingTimestamp);
    }

    let entries: Vec<FeedEntry> = parsed
        .entries
        .into_iter()
        .filter_map(FeedEntry::from_parsed)
        .collect();
    tracing::debug!(url, title = %parsed.title, format = ?parsed.format, entries = entries.len(), "parsed feed");

    Ok(FetchedFeed {
        status: status.as_u16(),
        entries,
    })
}
