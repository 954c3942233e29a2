//! Availability and significance decisions over a [`StatisticsState`].
//!
//! A metric is *available* when its dataset exists and has something to
//! show. It is *highlighted* when it is available and also passes its
//! significance rule. Highlighted always implies available.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cards::{HighlightCard, HighlightsReport};
use super::state::StatisticsState;
use crate::error::ValidationError;

/// Statistics cards the engine can decide about, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    MoodChart,
    EmotionsDistribution,
    MoodAvg,
    MoodPeaksPositive,
    MoodPeaksNegative,
    TagsDistribution,
    TagsPeaks,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::MoodChart,
        Metric::EmotionsDistribution,
        Metric::MoodAvg,
        Metric::MoodPeaksPositive,
        Metric::MoodPeaksNegative,
        Metric::TagsDistribution,
        Metric::TagsPeaks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::MoodChart => "mood_chart",
            Metric::EmotionsDistribution => "emotions_distribution",
            Metric::MoodAvg => "mood_avg",
            Metric::MoodPeaksPositive => "mood_peaks_positive",
            Metric::MoodPeaksNegative => "mood_peaks_negative",
            Metric::TagsDistribution => "tags_distribution",
            Metric::TagsPeaks => "tags_peaks",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownMetric(s.to_string()))
    }
}

/// Significance cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightThresholds {
    /// Share of the most common rating needed to highlight the mood average
    #[serde(default = "default_mood_avg_min_percentage")]
    pub mood_avg_min_percentage: u8,
    /// Rated entries needed to highlight the mood average
    #[serde(default = "default_mood_avg_min_items")]
    pub mood_avg_min_items: usize,
    /// Qualifying entries needed to highlight a peaks card
    #[serde(default = "default_mood_peaks_min_days")]
    pub mood_peaks_min_days: usize,
    /// A tag group must exceed this size to count as a peak
    #[serde(default = "default_tags_peaks_min_items")]
    pub tags_peaks_min_items: usize,
    /// Entries inside the chart window needed to highlight the chart
    #[serde(default = "default_mood_chart_min_items")]
    pub mood_chart_min_items: usize,
}

fn default_mood_avg_min_percentage() -> u8 {
    40
}
fn default_mood_avg_min_items() -> usize {
    5
}
fn default_mood_peaks_min_days() -> usize {
    2
}
fn default_tags_peaks_min_items() -> usize {
    5
}
fn default_mood_chart_min_items() -> usize {
    4
}

impl Default for HighlightThresholds {
    fn default() -> Self {
        Self {
            mood_avg_min_percentage: default_mood_avg_min_percentage(),
            mood_avg_min_items: default_mood_avg_min_items(),
            mood_peaks_min_days: default_mood_peaks_min_days(),
            tags_peaks_min_items: default_tags_peaks_min_items(),
            mood_chart_min_items: default_mood_chart_min_items(),
        }
    }
}

/// Stateless decision layer configured with [`HighlightThresholds`].
#[derive(Debug, Clone, Default)]
pub struct HighlightSelector {
    thresholds: HighlightThresholds,
}

impl HighlightSelector {
    pub fn new(thresholds: HighlightThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &HighlightThresholds {
        &self.thresholds
    }

    pub fn is_available(&self, state: &StatisticsState, metric: Metric) -> bool {
        if !state.loaded {
            return false;
        }
        match metric {
            Metric::MoodAvg => state.mood_avg.as_ref().is_some_and(|d| d.rated_count > 0),
            Metric::MoodPeaksPositive => state
                .mood_peaks_positive
                .as_ref()
                .is_some_and(|d| !d.days.is_empty()),
            Metric::MoodPeaksNegative => state
                .mood_peaks_negative
                .as_ref()
                .is_some_and(|d| !d.days.is_empty()),
            Metric::TagsDistribution => state
                .tags_distribution
                .as_ref()
                .is_some_and(|d| !d.tags.is_empty()),
            Metric::TagsPeaks => state.tags_peaks.as_ref().is_some_and(|d| !d.tags.is_empty()),
            Metric::EmotionsDistribution => state
                .emotions_distribution
                .as_ref()
                .is_some_and(|d| !d.emotions.is_empty()),
            Metric::MoodChart => state.mood_chart.as_ref().is_some_and(|d| d.items_count > 0),
        }
    }

    pub fn is_highlighted(&self, state: &StatisticsState, metric: Metric) -> bool {
        if !self.is_available(state, metric) {
            return false;
        }
        let t = &self.thresholds;
        match metric {
            Metric::MoodAvg => state.mood_avg.as_ref().is_some_and(|d| {
                d.highest_rating_percentage >= t.mood_avg_min_percentage
                    && d.rated_count >= t.mood_avg_min_items
            }),
            Metric::MoodPeaksPositive => state
                .mood_peaks_positive
                .as_ref()
                .is_some_and(|d| d.days.len() >= t.mood_peaks_min_days),
            Metric::MoodPeaksNegative => state
                .mood_peaks_negative
                .as_ref()
                .is_some_and(|d| d.days.len() >= t.mood_peaks_min_days),
            Metric::TagsPeaks => state.tags_peaks.as_ref().is_some_and(|d| {
                d.tags
                    .iter()
                    .any(|group| group.items.len() > t.tags_peaks_min_items)
            }),
            Metric::TagsDistribution | Metric::EmotionsDistribution => true,
            Metric::MoodChart => state
                .mood_chart
                .as_ref()
                .is_some_and(|d| d.items_count >= t.mood_chart_min_items),
        }
    }

    /// Whether the card for `metric` belongs on the highlights screen.
    ///
    /// The tags distribution card needs only data. The emotions card sits
    /// beside the mood chart and appears only with it. Every other card
    /// must be highlighted.
    pub fn is_shown(&self, state: &StatisticsState, metric: Metric) -> bool {
        match metric {
            Metric::TagsDistribution => self.is_available(state, metric),
            Metric::EmotionsDistribution => {
                self.is_available(state, metric)
                    && self.is_highlighted(state, Metric::MoodChart)
            }
            _ => self.is_highlighted(state, metric),
        }
    }

    /// Cards to display, in display order. Empty when the state is unloaded
    /// or nothing is significant.
    pub fn highlight_cards(&self, state: &StatisticsState) -> HighlightsReport {
        let cards = Metric::ALL
            .into_iter()
            .filter(|m| self.is_shown(state, *m))
            .filter_map(|m| HighlightCard::from_state(state, m))
            .collect();

        HighlightsReport {
            items_count: state.items_count,
            cards,
        }
    }
}
