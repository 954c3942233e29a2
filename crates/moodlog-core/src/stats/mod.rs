//! Statistics module for Moodlog
//!
//! Pure calculators turning journal entries into derived datasets:
//! mood average, mood peaks, tag distribution, tag peaks, emotion
//! distribution and the daily mood chart. None of them keep state or fail;
//! sparse input produces empty datasets.

mod counting;
mod emotions_distribution;
mod mood_average;
mod mood_chart;
mod mood_peaks;
mod tags_distribution;
mod tags_peaks;

pub use emotions_distribution::{emotions_distribution, EmotionCount, EmotionsDistributionData};

pub use mood_average::{mood_average, MoodAverageData};

pub use mood_chart::{mood_chart, MoodChartData, MoodChartDay};

pub use mood_peaks::{mood_peaks, MoodPeakDay, MoodPeaksData, PeakThresholds, PeakType};

pub use tags_distribution::{tags_distribution, TagCount, TagKey, TagsDistributionData};

pub use tags_peaks::{tags_peaks, TagPeak, TagsPeaksData};
