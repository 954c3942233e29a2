//! # Moodlog Core Library
//!
//! This library provides the statistics engine behind the Moodlog journal.
//! It turns a snapshot of journal entries and tags into aggregated datasets
//! and decides which of them are significant enough to be shown as
//! highlights. The `moodlog` CLI binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Journal**: Entry, tag and filter data model plus snapshot loading
//! - **Stats**: Pure calculators, one per metric
//! - **Engine**: Recompute, coalescing cache and highlight selection
//! - **Storage**: TOML-based configuration of thresholds and windows
//! - **Simulation**: Seeded synthetic journals for demos and load tests
//!
//! ## Key Components
//!
//! - [`recompute`]: Snapshot to [`StatisticsState`] in one pass
//! - [`StatisticsCache`]: Latest state, change coalescing, subscriptions
//! - [`HighlightSelector`]: Availability and significance rules
//! - [`Config`]: Application configuration management

pub mod engine;
pub mod error;
pub mod events;
pub mod journal;
pub mod simulation;
pub mod stats;
pub mod storage;

pub use engine::{
    recompute, FlushOutcome, HighlightCard, HighlightSelector, HighlightThresholds,
    HighlightsReport, Metric, StatisticsCache, StatisticsState, StatsConfig, WindowConfig,
};
pub use error::{ConfigError, CoreError, SnapshotError, ValidationError};
pub use events::Event;
pub use journal::{DateRange, FilterParams, LogItem, Snapshot, Tag, TagColor, TagRegistry};
pub use simulation::{generate_journal, SimulationConfig, MAX_SIMULATION_DAYS};
pub use storage::Config;
