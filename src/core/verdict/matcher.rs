use std::str::FromStr;

use crate::core::feed::FeedEntry;

/// Lowercased, trimmed, non-empty substrings from a comma separated list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchList {
    needles: Vec<String>,
}

impl MatchList {
    pub fn parse(input: &str) -> Self {
        let mut needles: Vec<String> = Vec::new();
        for needle in input
            .split(',')
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase)
        {
            if !needles.contains(&needle) {
                needles.push(needle);
            }
        }
        Self { needles }
    }

    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }

    pub fn needles(&self) -> &[String] {
        &self.needles
    }

    /// First needle found in the haystack, if any.
    pub fn find_in(&self, haystack: &Haystack) -> Option<&str> {
        self.needles
            .iter()
            .find(|needle| haystack.contains(needle))
            .map(String::as_str)
    }

    /// True when not a single needle is present.
    pub fn none_in(&self, haystack: &Haystack) -> bool {
        self.find_in(haystack).is_none()
    }
}

impl FromStr for MatchList {
    type Err = std::convert::Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(input))
    }
}

/// Lowercased entry text that the match lists are checked against.
#[derive(Debug, Clone)]
pub struct Haystack {
    title: String,
    description: Option<String>,
}

impl Haystack {
    pub fn new(entry: &FeedEntry, title_only: bool) -> Self {
        Self {
            title: entry.title.to_lowercase(),
            description: (!title_only).then(|| entry.description.to_lowercase()),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.title.contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.contains(needle))
    }
}
