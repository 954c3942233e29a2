//! Aggregation engine: recompute, cache and highlight decisions.
//!
//! - [`recompute`] turns one snapshot into a [`StatisticsState`]
//! - [`StatisticsCache`] keeps the latest state and notifies subscribers
//! - [`HighlightSelector`] decides which metrics are available or highlighted

mod aggregate;
mod cache;
mod cards;
mod highlight;
mod state;

pub use aggregate::{recompute, StatsConfig, WindowConfig, MAX_WINDOW_DAYS};
pub use cache::{
    ComputedState, FlushOutcome, RecomputeJob, StatisticsCache, Subscriber, SubscriptionId,
};
pub use cards::{HighlightCard, HighlightsReport};
pub use highlight::{HighlightSelector, HighlightThresholds, Metric};
pub use state::StatisticsState;
