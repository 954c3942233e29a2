//! Journal entries as handed over by the log store.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One journal entry.
///
/// `date_time` is local wall-clock time; every statistic groups entries by its
/// calendar day. Entries are immutable once produced by the log store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogItem {
    pub id: String,
    #[serde(alias = "dateTime")]
    pub date_time: NaiveDateTime,
    /// Ordinal mood score. `None` means no mood was recorded.
    #[serde(default)]
    pub rating: Option<u8>,
    /// Tag ids. May reference tags that were deleted from the registry.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub emotions: BTreeSet<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl LogItem {
    pub fn new(id: impl Into<String>, date_time: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            date_time,
            rating: None,
            tags: BTreeSet::new(),
            emotions: BTreeSet::new(),
            text: None,
        }
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_emotions<I, S>(mut self, emotions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emotions = emotions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Calendar day of the entry.
    pub fn date(&self) -> NaiveDate {
        self.date_time.date()
    }

    /// Whether the entry carries a non-blank note.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}
