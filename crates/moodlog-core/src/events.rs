use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every change observed by the statistics cache produces an Event.
/// Presentation code subscribes to them and re-reads the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A new snapshot was recorded; statistics are stale until the next flush.
    SnapshotChanged {
        generation: u64,
        items_count: usize,
        at: DateTime<Utc>,
    },
    /// Filters changed; statistics are stale until the next flush.
    FiltersChanged {
        generation: u64,
        filters_active: bool,
        at: DateTime<Utc>,
    },
    /// A freshly computed state replaced the previous one.
    StatisticsReplaced {
        generation: u64,
        items_count: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn generation(&self) -> u64 {
        match self {
            Event::SnapshotChanged { generation, .. }
            | Event::FiltersChanged { generation, .. }
            | Event::StatisticsReplaced { generation, .. } => *generation,
        }
    }
}
