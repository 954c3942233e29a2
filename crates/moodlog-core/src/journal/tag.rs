//! Tag reference data and by-id lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Semantic color category of a tag. Presentation maps it to actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagColor {
    #[default]
    Slate,
    Red,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Emerald,
    Teal,
    Cyan,
    Sky,
    Blue,
    Indigo,
    Violet,
    Purple,
    Fuchsia,
    Pink,
    Rose,
    /// Any category this version does not know about.
    #[serde(other)]
    Other,
}

/// A user-defined tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: TagColor,
}

/// Tag with its title replaced by a salted digest, for feedback payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizedTag {
    pub id: String,
    pub color: TagColor,
    pub title_hash: String,
    pub title_length: usize,
}

impl Tag {
    pub fn new(id: impl Into<String>, title: impl Into<String>, color: TagColor) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color,
        }
    }

    /// Strip the user-written title while keeping the tag distinguishable.
    pub fn anonymized(&self, salt: &str) -> AnonymizedTag {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(self.title.as_bytes());
        AnonymizedTag {
            id: self.id.clone(),
            color: self.color,
            title_hash: format!("{:x}", hasher.finalize())[..16].to_string(),
            title_length: self.title.chars().count(),
        }
    }
}

/// Read-only by-id view over the external tag registry.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: HashMap<String, Tag>,
}

impl TagRegistry {
    pub fn new<I>(tags: I) -> Self
    where
        I: IntoIterator<Item = Tag>,
    {
        Self {
            tags: tags.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    /// Look up a tag. `None` means the tag was deleted or never existed.
    pub fn get(&self, id: &str) -> Option<&Tag> {
        self.tags.get(id)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
