//! Mood average: rating frequencies and the most common rating.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::counting::{count_keys, percentage};
use crate::journal::LogItem;

/// Rating distribution over a set of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodAverageData {
    /// Entries considered, rated or not
    pub items_count: usize,
    /// Entries carrying a rating
    pub rated_count: usize,
    /// Frequency per rating value
    pub ratings: BTreeMap<u8, usize>,
    /// Most frequent rating; the lower rating wins a tie
    pub highest_rating_key: Option<u8>,
    /// Share of rated entries with `highest_rating_key` (0 to 100)
    pub highest_rating_percentage: u8,
}

pub fn mood_average(items: &[LogItem]) -> MoodAverageData {
    let ratings = count_keys(items.iter().filter_map(|i| i.rating));
    let rated_count: usize = ratings.values().sum();

    // Ascending iteration plus strict `>` keeps the lowest rating on ties.
    let mut highest: Option<(u8, usize)> = None;
    for (&rating, &count) in &ratings {
        if highest.map_or(true, |(_, best)| count > best) {
            highest = Some((rating, count));
        }
    }

    MoodAverageData {
        items_count: items.len(),
        rated_count,
        highest_rating_key: highest.map(|(rating, _)| rating),
        highest_rating_percentage: highest
            .map(|(_, count)| percentage(count, rated_count))
            .unwrap_or(0),
        ratings,
    }
}
