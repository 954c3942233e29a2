//! One aggregation pass over a snapshot.

use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::highlight::HighlightThresholds;
use super::state::StatisticsState;
use crate::journal::{DateRange, FilterParams, Snapshot};
use crate::stats::{self, PeakThresholds, PeakType};

/// Longest accepted window. Larger configured values are capped to it.
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// Trailing windows used by the peak and chart datasets.
///
/// The peaks window spans `[today - peaks_window_days, today]`. The chart
/// covers the last `chart_window_days` calendar days including today, and
/// always at least today itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_days")]
    pub peaks_window_days: u32,
    #[serde(default = "default_window_days")]
    pub chart_window_days: u32,
}

fn default_window_days() -> u32 {
    14
}

impl WindowConfig {
    pub fn peaks_range(&self, today: NaiveDate) -> DateRange {
        DateRange::trailing(today, self.peaks_window_days.min(MAX_WINDOW_DAYS))
    }

    pub fn chart_range(&self, today: NaiveDate) -> DateRange {
        let days = self.chart_window_days.clamp(1, MAX_WINDOW_DAYS);
        DateRange::trailing(today, days - 1)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            peaks_window_days: default_window_days(),
            chart_window_days: default_window_days(),
        }
    }
}

/// Everything the engine needs besides the snapshot itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default)]
    pub thresholds: HighlightThresholds,
    #[serde(default)]
    pub windows: WindowConfig,
    #[serde(default)]
    pub ratings: PeakThresholds,
}

/// Aggregate `snapshot` into a fully loaded [`StatisticsState`].
///
/// Filters are applied once up front; every calculator then sees the same
/// filtered entries. `today` anchors the trailing windows.
pub fn recompute(
    snapshot: &Snapshot,
    filters: &FilterParams,
    today: NaiveDate,
    config: &StatsConfig,
) -> StatisticsState {
    let started = Instant::now();
    let items = filters.apply(&snapshot.items);
    let registry = snapshot.registry();
    let peaks_window = config.windows.peaks_range(today);
    let chart_window = config.windows.chart_range(today);

    let state = StatisticsState {
        loaded: true,
        items_count: items.len(),
        mood_avg: Some(stats::mood_average(&items)),
        mood_peaks_positive: Some(stats::mood_peaks(
            &items,
            PeakType::Positive,
            peaks_window,
            &config.ratings,
        )),
        mood_peaks_negative: Some(stats::mood_peaks(
            &items,
            PeakType::Negative,
            peaks_window,
            &config.ratings,
        )),
        tags_distribution: Some(stats::tags_distribution(&items, &registry)),
        tags_peaks: Some(stats::tags_peaks(
            &items,
            &registry,
            config.thresholds.tags_peaks_min_items,
        )),
        emotions_distribution: Some(stats::emotions_distribution(&items)),
        mood_chart: Some(stats::mood_chart(&items, chart_window)),
    };

    tracing::debug!(
        snapshot_items = snapshot.items.len(),
        filtered_items = state.items_count,
        filters_active = filters.is_active(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "statistics recomputed"
    );

    state
}
