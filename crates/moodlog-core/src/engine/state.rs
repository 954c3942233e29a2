use serde::{Deserialize, Serialize};

use crate::stats::{
    EmotionsDistributionData, MoodAverageData, MoodChartData, MoodPeaksData,
    TagsDistributionData, TagsPeaksData,
};

/// Every dataset derived from one snapshot under one set of filters.
///
/// The default value is the unloaded state: `loaded == false` and every
/// dataset absent. Consumers must read that as "not ready yet", not as an
/// empty journal. Instances are never patched; the cache swaps in a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsState {
    pub loaded: bool,
    /// Entries left after filtering
    pub items_count: usize,
    pub mood_avg: Option<MoodAverageData>,
    pub mood_peaks_positive: Option<MoodPeaksData>,
    pub mood_peaks_negative: Option<MoodPeaksData>,
    pub tags_distribution: Option<TagsDistributionData>,
    pub tags_peaks: Option<TagsPeaksData>,
    pub emotions_distribution: Option<EmotionsDistributionData>,
    pub mood_chart: Option<MoodChartData>,
}

impl StatisticsState {
    pub fn unloaded() -> Self {
        Self::default()
    }
}
