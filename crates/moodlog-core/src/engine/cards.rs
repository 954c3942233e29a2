//! Typed payload describing which highlight cards are on screen.
//!
//! Each variant carries only the figures relevant to its metric, so the
//! payload can be exported or handed to telemetry without optional fields.

use serde::{Deserialize, Serialize};

use super::highlight::Metric;
use super::state::StatisticsState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum HighlightCard {
    MoodChart { item_count: usize },
    EmotionsDistribution { emotion_count: usize },
    MoodAvg { rating: u8, percentage: u8 },
    MoodPeaksPositive { count: usize },
    MoodPeaksNegative { count: usize },
    TagsDistribution { tag_count: usize, item_count: usize },
    TagsPeaks { count: usize },
}

impl HighlightCard {
    /// Build the card for `metric` from `state`, if its dataset is present.
    pub fn from_state(state: &StatisticsState, metric: Metric) -> Option<Self> {
        let card = match metric {
            Metric::MoodChart => HighlightCard::MoodChart {
                item_count: state.mood_chart.as_ref()?.items_count,
            },
            Metric::EmotionsDistribution => HighlightCard::EmotionsDistribution {
                emotion_count: state.emotions_distribution.as_ref()?.emotions.len(),
            },
            Metric::MoodAvg => {
                let data = state.mood_avg.as_ref()?;
                HighlightCard::MoodAvg {
                    rating: data.highest_rating_key?,
                    percentage: data.highest_rating_percentage,
                }
            }
            Metric::MoodPeaksPositive => HighlightCard::MoodPeaksPositive {
                count: state.mood_peaks_positive.as_ref()?.days.len(),
            },
            Metric::MoodPeaksNegative => HighlightCard::MoodPeaksNegative {
                count: state.mood_peaks_negative.as_ref()?.days.len(),
            },
            Metric::TagsDistribution => {
                let data = state.tags_distribution.as_ref()?;
                HighlightCard::TagsDistribution {
                    tag_count: data.tags.len(),
                    item_count: data.items_count,
                }
            }
            Metric::TagsPeaks => HighlightCard::TagsPeaks {
                count: state.tags_peaks.as_ref()?.tags.len(),
            },
        };
        Some(card)
    }

    pub fn metric(&self) -> Metric {
        match self {
            HighlightCard::MoodChart { .. } => Metric::MoodChart,
            HighlightCard::EmotionsDistribution { .. } => Metric::EmotionsDistribution,
            HighlightCard::MoodAvg { .. } => Metric::MoodAvg,
            HighlightCard::MoodPeaksPositive { .. } => Metric::MoodPeaksPositive,
            HighlightCard::MoodPeaksNegative { .. } => Metric::MoodPeaksNegative,
            HighlightCard::TagsDistribution { .. } => Metric::TagsDistribution,
            HighlightCard::TagsPeaks { .. } => Metric::TagsPeaks,
        }
    }
}

/// Highlights screen content for one state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightsReport {
    pub items_count: usize,
    pub cards: Vec<HighlightCard>,
}

impl HighlightsReport {
    /// No card qualifies; the screen shows its empty state.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn metrics(&self) -> Vec<Metric> {
        self.cards.iter().map(HighlightCard::metric).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MoodAverageData;

    #[test]
    fn serializes_with_metric_tag() {
        let card = HighlightCard::MoodAvg {
            rating: 5,
            percentage: 40,
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "metric": "mood_avg", "rating": 5, "percentage": 40 })
        );
        assert_eq!(card.metric(), Metric::MoodAvg);
    }

    #[test]
    fn missing_dataset_yields_no_card() {
        let state = StatisticsState::unloaded();
        for metric in Metric::ALL {
            assert!(HighlightCard::from_state(&state, metric).is_none());
        }
    }

    #[test]
    fn mood_avg_card_needs_a_mode() {
        let state = StatisticsState {
            loaded: true,
            mood_avg: Some(MoodAverageData::default()),
            ..StatisticsState::default()
        };
        assert!(HighlightCard::from_state(&state, Metric::MoodAvg).is_none());
    }
}
