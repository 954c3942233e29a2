//! Journal data model and filter context.
//!
//! Entries and tags are owned by the log store and the tag registry; this
//! module only describes their shape and how a snapshot of them is read.

mod filter;
mod item;
mod tag;

pub use filter::{parse_date, validate_rating, DateRange, FilterParams, MAX_RATING};
pub use item::LogItem;
pub use tag::{AnonymizedTag, Tag, TagColor, TagRegistry};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// Immutable view of every journal entry and tag at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub items: Vec<LogItem>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Snapshot {
    pub fn new(items: Vec<LogItem>, tags: Vec<Tag>) -> Self {
        Self { items, tags }
    }

    /// Parse a JSON export of the log store.
    ///
    /// # Errors
    /// Returns an error if the JSON does not describe a snapshot.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON export of the log store from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn registry(&self) -> TagRegistry {
        TagRegistry::new(self.tags.iter().cloned())
    }
}
