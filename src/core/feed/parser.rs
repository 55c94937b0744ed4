use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use serde::Deserialize;

use super::types::{FeedFormat, ParsedEntry, ParsedFeed};

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is empty")]
    EmptyPayload,
    #[error("xml feed parse error: {0}")]
    Xml(#[from] feed_rs::parser::ParseFeedError),
    #[error("json feed parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct JsonFeed {
    title: Option<String>,
    #[serde(default)]
    items: Vec<JsonFeedItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonFeedItem {
    title: Option<String>,
    url: Option<String>,
    summary: Option<String>,
    content_text: Option<String>,
    content_html: Option<String>,
    date_published: Option<String>,
    date_modified: Option<String>,
}

pub fn parse_feed_bytes(raw: &[u8]) -> Result<ParsedFeed, FeedParseError> {
    let trimmed = raw.trim_ascii_start();
    if trimmed.is_empty() {
        return Err(FeedParseError::EmptyPayload);
    }
    if trimmed[0] == b'{' {
        return parse_json_feed(trimmed);
    }
    parse_xml_feed(trimmed)
}

/// Orders entries newest first. Undated entries keep their relative order
/// and sink below every dated one.
pub fn newest_first(entries: &mut [ParsedEntry]) {
    entries.sort_by_key(|entry| Reverse(entry.published_at));
}

fn parse_xml_feed(raw: &[u8]) -> Result<ParsedFeed, FeedParseError> {
    let feed = feed_rs::parser::parse(raw)?;
    let title = feed
        .title
        .as_ref()
        .map(|text| text.content.clone())
        .unwrap_or_default();
    let entries = feed.entries.iter().map(entry_from_xml).collect();

    Ok(ParsedFeed {
        format: FeedFormat::XmlFeed,
        title,
        entries,
    })
}

fn parse_json_feed(raw: &[u8]) -> Result<ParsedFeed, FeedParseError> {
    let feed: JsonFeed = serde_json::from_slice(raw)?;
    let entries = feed
        .items
        .into_iter()
        .map(|item| ParsedEntry {
            title: item.title,
            description: item.summary.or(item.content_text).or(item.content_html),
            link: item.url,
            published_at: item
                .date_modified
                .or(item.date_published)
                .as_deref()
                .and_then(parse_rfc3339),
        })
        .collect();

    Ok(ParsedFeed {
        format: FeedFormat::JsonFeed,
        title: feed.title.unwrap_or_default(),
        entries,
    })
}

fn entry_from_xml(entry: &Entry) -> ParsedEntry {
    let title = entry.title.as_ref().map(|text| text.content.clone());
    let description = entry
        .summary
        .as_ref()
        .map(|text| text.content.clone())
        .or_else(|| {
            entry
                .content
                .as_ref()
                .and_then(|content| content.body.clone())
        });
    let link = entry.links.first().map(|entry_link| entry_link.href.clone());

    ParsedEntry {
        title,
        description,
        link,
        published_at: entry.updated.or(entry.published),
    }
}

fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rss_fixture_feed() {
        let xml = include_bytes!("../../../fixtures/status.rss.xml");
        let parsed = parse_feed_bytes(xml).expect("rss fixture must parse");

        assert_eq!(parsed.format, FeedFormat::XmlFeed);
        assert_eq!(parsed.title, "Example Cloud Status");
        assert_eq!(parsed.entries.len(), 2);

        let first = &parsed.entries[0];
        assert_eq!(first.title.as_deref(), Some("Service Restored"));
        assert_eq!(
            first.description.as_deref(),
            Some("All systems are operating normally.")
        );
        assert_eq!(
            first.link.as_deref(),
            Some("https://status.example.com/incidents/42")
        );
        assert_eq!(
            first.published_at,
            Some(Utc.with_ymd_and_hms(2026, 2, 24, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn parses_atom_fixture_feed() {
        let xml = include_bytes!("../../../fixtures/status.atom.xml");
        let parsed = parse_feed_bytes(xml).expect("atom fixture must parse");

        assert_eq!(parsed.format, FeedFormat::XmlFeed);
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(
            parsed.entries[0].title.as_deref(),
            Some("Elevated error rates")
        );
        assert_eq!(
            parsed.entries[0].published_at,
            Some(Utc.with_ymd_and_hms(2026, 2, 23, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn parses_json_feed() {
        let json = include_bytes!("../../../fixtures/status.jsonfeed.json");
        let parsed = parse_feed_bytes(json).expect("json feed must parse");

        assert_eq!(parsed.format, FeedFormat::JsonFeed);
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[0].title.as_deref(), Some("Scheduled maintenance"));
        assert_eq!(
            parsed.entries[0].description.as_deref(),
            Some("Database failover test")
        );
        assert_eq!(
            parsed.entries[1].published_at,
            Some(Utc.with_ymd_and_hms(2026, 2, 20, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn latest_revision_date_wins_over_first_publication() {
        let xml = br#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Incidents</title>
  <id>urn:example:incidents</id>
  <updated>2026-02-25T00:00:00Z</updated>
  <entry>
    <title>Ongoing outage</title>
    <id>urn:example:incidents:1</id>
    <published>2026-02-01T00:00:00Z</published>
    <updated>2026-02-25T00:00:00Z</updated>
  </entry>
</feed>"#;
        let parsed = parse_feed_bytes(xml).expect("atom must parse");
        assert_eq!(
            parsed.entries[0].published_at,
            Some(Utc.with_ymd_and_hms(2026, 2, 25, 0, 0, 0).unwrap())
        );

        let json = br#"{"items": [{"title": "Revised",
            "date_published": "2026-02-01T00:00:00Z",
            "date_modified": "2026-02-25T00:00:00Z"}]}"#;
        let parsed = parse_feed_bytes(json).expect("json feed must parse");
        assert_eq!(
            parsed.entries[0].published_at,
            Some(Utc.with_ymd_and_hms(2026, 2, 25, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn newest_is_chosen_by_latest_revision() {
        let xml = br#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Incidents</title>
  <id>urn:example:incidents</id>
  <updated>2026-02-25T00:00:00Z</updated>
  <entry>
    <title>Fresh notice</title>
    <id>urn:example:incidents:2</id>
    <published>2026-02-10T00:00:00Z</published>
    <updated>2026-02-10T00:00:00Z</updated>
  </entry>
  <entry>
    <title>Ongoing outage</title>
    <id>urn:example:incidents:1</id>
    <published>2026-02-01T00:00:00Z</published>
    <updated>2026-02-25T00:00:00Z</updated>
  </entry>
</feed>"#;
        let mut parsed = parse_feed_bytes(xml).expect("atom must parse");
        newest_first(&mut parsed.entries);
        assert_eq!(parsed.entries[0].title.as_deref(), Some("Ongoing outage"));
    }

    #[test]
    fn rejects_whitespace_only_payload() {
        let error = parse_feed_bytes(b"  \n\t ").expect_err("blank payload must fail");
        assert!(matches!(error, FeedParseError::EmptyPayload));
    }

    #[test]
    fn rejects_html_payload() {
        let error = parse_feed_bytes(b"<html><body>Not a feed</body></html>")
            .expect_err("html must not parse as a feed");
        assert!(matches!(error, FeedParseError::Xml(_)));
    }

    #[test]
    fn newest_first_sorts_by_timestamp_and_sinks_undated() {
        let at = |day| Some(Utc.with_ymd_and_hms(2026, 2, day, 0, 0, 0).unwrap());
        let entry = |title: &str, published_at| ParsedEntry {
            title: Some(title.to_string()),
            description: None,
            link: None,
            published_at,
        };
        let mut entries = vec![
            entry("old", at(1)),
            entry("undated", None),
            entry("new", at(20)),
            entry("middle", at(10)),
        ];

        newest_first(&mut entries);

        let titles: Vec<_> = entries
            .iter()
            .map(|entry| entry.title.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(titles, ["new", "middle", "old", "undated"]);
    }
}
