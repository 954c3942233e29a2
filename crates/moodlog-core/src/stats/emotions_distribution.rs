//! Emotion distribution, counted the same way as tags.

use serde::{Deserialize, Serialize};

use super::counting::{by_count_desc, count_keys};
use crate::journal::LogItem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionsDistributionData {
    pub items_count: usize,
    /// Descending by count, ties alphabetical
    pub emotions: Vec<EmotionCount>,
}

pub fn emotions_distribution(items: &[LogItem]) -> EmotionsDistributionData {
    let counts = count_keys(items.iter().flat_map(|item| item.emotions.iter()));

    let mut emotions: Vec<EmotionCount> = counts
        .into_iter()
        .map(|(emotion, count)| EmotionCount {
            emotion: emotion.clone(),
            count,
        })
        .collect();
    emotions.sort_by(|a, b| by_count_desc(a.count, b.count, || a.emotion.cmp(&b.emotion)));

    EmotionsDistributionData {
        items_count: items.len(),
        emotions,
    }
}
