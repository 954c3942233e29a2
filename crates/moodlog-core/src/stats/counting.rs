use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Count every key yielded by `keys`.
///
/// Keys come back in their natural order, which makes later stable sorts
/// deterministic regardless of snapshot order.
pub(crate) fn count_keys<K, I>(keys: I) -> BTreeMap<K, usize>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Descending by count. Equal counts fall through to `tie_break`.
pub(crate) fn by_count_desc(a: usize, b: usize, tie_break: impl FnOnce() -> Ordering) -> Ordering {
    b.cmp(&a).then_with(tie_break)
}

/// `part / whole` as a whole percentage, `0` when `whole` is zero.
pub(crate) fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let pct = (part as f64 / whole as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}
