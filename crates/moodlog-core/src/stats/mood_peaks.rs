//! Mood peaks: entries whose rating crosses a polarity threshold inside a
//! date window.
//!
//! A peak is a flat threshold crossing. No comparison with neighbouring days
//! is made.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::journal::{DateRange, LogItem};

/// Polarity of a peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakType {
    Positive,
    Negative,
}

/// Rating cutoffs for both polarities, on a 1-5 scale by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakThresholds {
    /// Ratings at or above this value are positive peaks
    #[serde(default = "default_positive_min")]
    pub positive_min: u8,
    /// Ratings at or below this value are negative peaks
    #[serde(default = "default_negative_max")]
    pub negative_max: u8,
}

fn default_positive_min() -> u8 {
    4
}
fn default_negative_max() -> u8 {
    2
}

impl Default for PeakThresholds {
    fn default() -> Self {
        Self {
            positive_min: default_positive_min(),
            negative_max: default_negative_max(),
        }
    }
}

impl PeakType {
    pub fn qualifies(self, rating: u8, thresholds: &PeakThresholds) -> bool {
        match self {
            PeakType::Positive => rating >= thresholds.positive_min,
            PeakType::Negative => rating <= thresholds.negative_max,
        }
    }
}

/// A single qualifying entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodPeakDay {
    pub date: NaiveDate,
    pub rating: u8,
    pub item_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodPeaksData {
    pub peak_type: PeakType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Qualifying entries, ascending by date
    pub days: Vec<MoodPeakDay>,
}

pub fn mood_peaks(
    items: &[LogItem],
    peak_type: PeakType,
    window: DateRange,
    thresholds: &PeakThresholds,
) -> MoodPeaksData {
    let mut peaks: Vec<&LogItem> = items
        .iter()
        .filter(|item| window.contains(item.date()))
        .filter(|item| {
            item.rating
                .is_some_and(|rating| peak_type.qualifies(rating, thresholds))
        })
        .collect();
    peaks.sort_by(|a, b| a.date_time.cmp(&b.date_time).then_with(|| a.id.cmp(&b.id)));

    MoodPeaksData {
        peak_type,
        start_date: window.start,
        end_date: window.end,
        days: peaks
            .into_iter()
            .filter_map(|item| {
                item.rating.map(|rating| MoodPeakDay {
                    date: item.date(),
                    rating,
                    item_id: item.id.clone(),
                })
            })
            .collect(),
    }
}
