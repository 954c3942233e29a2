//! Daily mood series over a trailing window.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::journal::{DateRange, LogItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodChartDay {
    pub date: NaiveDate,
    pub items_count: usize,
    /// Mean rating of the day's rated entries
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodChartData {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Entries inside the window, rated or not
    pub items_count: usize,
    /// One point per day of the window, including empty days
    pub days: Vec<MoodChartDay>,
}

#[derive(Default)]
struct DayBucket {
    items: usize,
    rated: u32,
    rating_sum: u32,
}

pub fn mood_chart(items: &[LogItem], window: DateRange) -> MoodChartData {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for item in items.iter().filter(|i| window.contains(i.date())) {
        let bucket = buckets.entry(item.date()).or_default();
        bucket.items += 1;
        if let Some(rating) = item.rating {
            bucket.rated += 1;
            bucket.rating_sum += u32::from(rating);
        }
    }

    let items_count = buckets.values().map(|b| b.items).sum();
    let days = window
        .days()
        .map(|date| {
            let bucket = buckets.remove(&date).unwrap_or_default();
            MoodChartDay {
                date,
                items_count: bucket.items,
                average_rating: (bucket.rated > 0)
                    .then(|| f64::from(bucket.rating_sum) / f64::from(bucket.rated)),
            }
        })
        .collect();

    MoodChartData {
        start_date: window.start,
        end_date: window.end,
        items_count,
        days,
    }
}
