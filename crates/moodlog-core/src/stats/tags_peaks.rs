//! Tag peaks: tags used often enough to deserve their own card.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::tags_distribution::TagKey;
use crate::journal::{LogItem, Tag, TagRegistry};

/// Entries sharing one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPeak {
    pub tag: TagKey,
    pub details: Option<Tag>,
    /// Tagged entries in snapshot order
    pub items: Vec<LogItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsPeaksData {
    /// Groups with more than the minimum size, largest first
    pub tags: Vec<TagPeak>,
}

/// Group entries by tag and keep groups with more than `min_items` entries.
pub fn tags_peaks(items: &[LogItem], registry: &TagRegistry, min_items: usize) -> TagsPeaksData {
    let mut groups: BTreeMap<TagKey, Vec<LogItem>> = BTreeMap::new();
    for item in items {
        for key in TagKey::for_item(item, registry) {
            groups.entry(key).or_default().push(item.clone());
        }
    }

    let mut tags: Vec<TagPeak> = groups
        .into_iter()
        .filter(|(_, items)| items.len() > min_items)
        .map(|(tag, items)| TagPeak {
            details: tag.details(registry),
            tag,
            items,
        })
        .collect();
    // Stable sort keeps key order for equal sizes.
    tags.sort_by(|a, b| b.items.len().cmp(&a.items.len()));

    TagsPeaksData { tags }
}
