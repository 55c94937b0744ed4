//! Turns the newest feed entry into a health verdict.
//!
//! Rules run in a fixed order and the first one that fires decides the
//! severity: critical-if-present, critical-if-missing, freshness,
//! warning-if-present, warning-if-missing. The message is built once up front
//! and is the same whatever the severity turns out to be.

pub mod matcher;

use chrono::{DateTime, Utc};

use crate::core::feed::FeedEntry;
pub use matcher::{Haystack, MatchList};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Age and title.
    Brief,
    /// Age, title and link.
    WithLink,
    /// Age, title, description and link.
    #[default]
    Full,
}

impl Verbosity {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Brief),
            1 => Some(Self::WithLink),
            2 => Some(Self::Full),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    pub critical_if_any: Option<MatchList>,
    pub critical_if_none_of: Option<MatchList>,
    pub max_freshness_hours: Option<i64>,
    pub warning_if_any: Option<MatchList>,
    pub warning_if_none_of: Option<MatchList>,
    pub title_only: bool,
    pub verbosity: Verbosity,
    pub emit_perfdata: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub severity: Severity,
    pub message: String,
    pub age_hours: i64,
}

/// Whole hours between `published_at` and `now`, truncated toward zero.
/// Future timestamps give zero or a negative age.
pub fn age_hours(published_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - published_at).num_seconds() / 3600
}

pub fn format_message(entry: &FeedEntry, age_hours: i64, verbosity: Verbosity) -> String {
    match verbosity {
        Verbosity::Brief => format!("Posted {age_hours} hrs ago ; {}", entry.title),
        Verbosity::WithLink => format!(
            "Posted {age_hours} hrs ago ; Title: {}; Link: {}",
            entry.title, entry.link
        ),
        Verbosity::Full => format!(
            "Posted {age_hours} hrs ago ; Title: {} ; Description: {} ; Link: {}",
            entry.title, entry.description, entry.link
        ),
    }
}

pub fn evaluate(entry: &FeedEntry, now: DateTime<Utc>, conditions: &Conditions) -> Verdict {
    let age_hours = age_hours(entry.published_at, now);
    let message = format_message(entry, age_hours, conditions.verbosity);
    let severity = classify(entry, age_hours, conditions);

    Verdict {
        severity,
        message,
        age_hours,
    }
}

fn classify(entry: &FeedEntry, age_hours: i64, conditions: &Conditions) -> Severity {
    let haystack = Haystack::new(entry, conditions.title_only);

    if let Some(needle) = active(&conditions.critical_if_any).and_then(|list| list.find_in(&haystack)) {
        tracing::debug!(needle, "critical: string present");
        return Severity::Critical;
    }
    if active(&conditions.critical_if_none_of).is_some_and(|list| list.none_in(&haystack)) {
        tracing::debug!("critical: none of the required strings present");
        return Severity::Critical;
    }
    if let Some(threshold) = conditions.max_freshness_hours {
        if age_hours <= threshold {
            tracing::debug!(age_hours, threshold, "critical: newest entry within freshness window");
            return Severity::Critical;
        }
    }
    if let Some(needle) = active(&conditions.warning_if_any).and_then(|list| list.find_in(&haystack)) {
        tracing::debug!(needle, "warning: string present");
        return Severity::Warning;
    }
    if active(&conditions.warning_if_none_of).is_some_and(|list| list.none_in(&haystack)) {
        tracing::debug!("warning: none of the required strings present");
        return Severity::Warning;
    }
    Severity::Ok
}

// An empty list behaves as if the flag was never given.
fn active(list: &Option<MatchList>) -> Option<&MatchList> {
    list.as_ref().filter(|list| !list.is_empty())
}
