//! Filter context applied to a snapshot before aggregation.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::LogItem;
use crate::error::ValidationError;

/// Highest value on the rating scale.
pub const MAX_RATING: u8 = 5;

/// Parse a `YYYY-MM-DD` calendar day.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        value: value.to_string(),
    })
}

/// Check that `value` lies on the `1..=MAX_RATING` scale.
pub fn validate_rating(value: u8) -> Result<u8, ValidationError> {
    if (1..=MAX_RATING).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidRating {
            value,
            max: MAX_RATING,
        })
    }
}

/// Inclusive calendar-day window.
///
/// A window whose `start` lies after its `end` is empty and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `[today - days, today]`, saturating at the earliest representable day.
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Every day of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Tag, date, rating and note filters chosen in the calendar.
///
/// Every unset field leaves the snapshot untouched. Set fields combine with
/// AND; within `tag_ids` an entry matches if it carries any of the tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub tag_ids: Option<BTreeSet<String>>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub ratings: Option<BTreeSet<u8>>,
    #[serde(default)]
    pub has_text: Option<bool>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_ratings<I>(mut self, ratings: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        self.ratings = Some(ratings.into_iter().collect());
        self
    }

    pub fn with_has_text(mut self, has_text: bool) -> Self {
        self.has_text = Some(has_text);
        self
    }

    /// Whether any filter would drop entries.
    pub fn is_active(&self) -> bool {
        self.tag_ids.as_ref().is_some_and(|ids| !ids.is_empty())
            || self.date_range.is_some()
            || self.ratings.as_ref().is_some_and(|r| !r.is_empty())
            || self.has_text.is_some()
    }

    pub fn matches(&self, item: &LogItem) -> bool {
        if let Some(ids) = self.tag_ids.as_ref().filter(|ids| !ids.is_empty()) {
            if !item.tags.iter().any(|t| ids.contains(t)) {
                return false;
            }
        }

        if let Some(range) = &self.date_range {
            if !range.contains(item.date()) {
                return false;
            }
        }

        if let Some(ratings) = self.ratings.as_ref().filter(|r| !r.is_empty()) {
            match item.rating {
                Some(r) if ratings.contains(&r) => {}
                _ => return false,
            }
        }

        if let Some(has_text) = self.has_text {
            if item.has_text() != has_text {
                return false;
            }
        }

        true
    }

    /// Entries passing every active filter, in snapshot order.
    pub fn apply(&self, items: &[LogItem]) -> Vec<LogItem> {
        items.iter().filter(|i| self.matches(i)).cloned().collect()
    }
}
