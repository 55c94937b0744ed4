use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFormat {
    XmlFeed,
    JsonFeed,
}

/// An entry as it came out of the parser, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    pub format: FeedFormat,
    pub title: String,
    pub entries: Vec<ParsedEntry>,
}

/// The newest item of a feed, with every field resolved.
///
/// Missing text fields become empty strings. The timestamp is mandatory:
/// an entry without one never reaches the verdict engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub description: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
}

impl FeedEntry {
    pub fn from_parsed(entry: ParsedEntry) -> Option<Self> {
        Some(Self {
            published_at: entry.published_at?,
            title: entry.title.unwrap_or_default(),
            description: entry.description.unwrap_or_default(),
            link: entry.link.unwrap_or_default(),
        })
    }
}

/// A completed HTTP exchange. `entries` is empty when `status` is not 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFeed {
    pub status: u16,
    pub entries: Vec<FeedEntry>,
}

impl FetchedFeed {
    pub fn is_ok_status(&self) -> bool {
        self.status == 200
    }

    pub fn newest(&self) -> Option<&FeedEntry> {
        self.entries.first()
    }
}
