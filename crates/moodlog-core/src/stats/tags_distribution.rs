//! Tag distribution: how often each tag was used.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::counting::{by_count_desc, count_keys};
use crate::journal::{LogItem, Tag, TagRegistry};

/// Identity of a tag bucket.
///
/// References to tags missing from the registry all share the `Unknown`
/// bucket. `Unknown` sorts after every known tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKey {
    Known(String),
    Unknown,
}

impl TagKey {
    pub(crate) fn resolve(id: &str, registry: &TagRegistry) -> Self {
        if registry.get(id).is_some() {
            TagKey::Known(id.to_string())
        } else {
            TagKey::Unknown
        }
    }

    /// Distinct buckets an entry falls into, for group membership.
    pub(crate) fn for_item(item: &LogItem, registry: &TagRegistry) -> BTreeSet<TagKey> {
        item.tags.iter().map(|id| TagKey::resolve(id, registry)).collect()
    }

    pub(crate) fn details(&self, registry: &TagRegistry) -> Option<Tag> {
        match self {
            TagKey::Known(id) => registry.get(id).cloned(),
            TagKey::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: TagKey,
    /// `None` for the unknown-tag bucket
    pub details: Option<Tag>,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsDistributionData {
    /// Entries considered. Tag counts do not sum to this: an entry counts
    /// once per tag reference.
    pub items_count: usize,
    /// Descending by count, ties by title
    pub tags: Vec<TagCount>,
}

pub fn tags_distribution(items: &[LogItem], registry: &TagRegistry) -> TagsDistributionData {
    // One increment per reference, so an entry citing two deleted tags
    // adds two to the unknown bucket.
    let counts = count_keys(
        items
            .iter()
            .flat_map(|item| item.tags.iter().map(|id| TagKey::resolve(id, registry))),
    );

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            details: tag.details(registry),
            tag,
            count,
        })
        .collect();

    tags.sort_by(|a, b| {
        by_count_desc(a.count, b.count, || {
            compare_titles(a.details.as_ref(), b.details.as_ref()).then_with(|| a.tag.cmp(&b.tag))
        })
    });

    TagsDistributionData {
        items_count: items.len(),
        tags,
    }
}

/// Ordinal title comparison, untitled buckets last.
fn compare_titles(a: Option<&Tag>, b: Option<&Tag>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.title.cmp(&b.title),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::TagColor;
    use chrono::NaiveDate;

    fn registry() -> TagRegistry {
        TagRegistry::new(vec![
            Tag::new("a", "Alpha", TagColor::Red),
            Tag::new("b", "Bravo", TagColor::Blue),
            Tag::new("c", "Charlie", TagColor::Green),
        ])
    }

    fn tagged(tags: &[&[&str]]) -> Vec<LogItem> {
        let at = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        tags.iter()
            .enumerate()
            .map(|(i, t)| LogItem::new(i.to_string(), at).with_tags(t.iter().copied()))
            .collect()
    }

    fn summary(data: &TagsDistributionData) -> Vec<(TagKey, usize)> {
        data.tags.iter().map(|t| (t.tag.clone(), t.count)).collect()
    }

    #[test]
    fn counts_one_tag_per_entry() {
        let items = tagged(&[&["a"], &["a"], &["a"], &["b"], &["b"], &["c"]]);
        let data = tags_distribution(&items, &registry());

        assert_eq!(data.items_count, 6);
        assert_eq!(
            summary(&data),
            vec![
                (TagKey::Known("a".into()), 3),
                (TagKey::Known("b".into()), 2),
                (TagKey::Known("c".into()), 1),
            ]
        );
        assert_eq!(data.tags[0].details.as_ref().unwrap().title, "Alpha");
    }

    #[test]
    fn multi_tag_entries_count_per_tag() {
        let items = tagged(&[&["a", "b"], &["a", "b", "c"], &[]]);
        let data = tags_distribution(&items, &registry());
        let total: usize = data.tags.iter().map(|t| t.count).sum();
        assert_eq!(data.items_count, 3);
        assert_eq!(total, 5);
    }

    #[test]
    fn ties_break_by_title() {
        let registry = TagRegistry::new(vec![
            Tag::new("z", "apple", TagColor::Red),
            Tag::new("y", "Zebra", TagColor::Red),
            Tag::new("x", "mango", TagColor::Red),
        ]);
        let items = tagged(&[&["x"], &["y"], &["z"]]);
        let titles: Vec<_> = tags_distribution(&items, &registry)
            .tags
            .into_iter()
            .map(|t| t.details.unwrap().title)
            .collect();
        // Ordinal: uppercase sorts before lowercase
        assert_eq!(titles, vec!["Zebra", "apple", "mango"]);
    }

    #[test]
    fn deleted_tags_share_unknown_bucket() {
        let items = tagged(&[&["gone1"], &["gone2", "a"], &["gone1", "gone3"]]);
        let data = tags_distribution(&items, &registry());
        assert_eq!(
            summary(&data),
            vec![(TagKey::Unknown, 4), (TagKey::Known("a".into()), 1)]
        );
        assert!(data.tags[0].details.is_none());
    }

    #[test]
    fn every_deleted_reference_counts() {
        let items = tagged(&[&["gone1", "gone2"]]);
        let data = tags_distribution(&items, &registry());
        assert_eq!(summary(&data), vec![(TagKey::Unknown, 2)]);
    }

    #[test]
    fn unknown_bucket_sorts_after_titled_tie() {
        let items = tagged(&[&["gone"], &["b"]]);
        let data = tags_distribution(&items, &registry());
        assert_eq!(
            summary(&data),
            vec![(TagKey::Known("b".into()), 1), (TagKey::Unknown, 1)]
        );
    }

    #[test]
    fn empty_input() {
        let data = tags_distribution(&[], &registry());
        assert_eq!(data.items_count, 0);
        assert!(data.tags.is_empty());
    }
}
