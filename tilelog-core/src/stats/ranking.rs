use std::collections::HashMap;
use std::hash::Hash;

/// Counts keys and returns them by descending count, ties in first-seen order.
pub(crate) fn rank_by_count<K>(keys: impl IntoIterator<Item = K>) -> Vec<(K, usize)>
where
    K: Hash + Eq + Copy,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for key in keys {
        match slots.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(key, counts.len());
                counts.push((key, 1));
            }
        }
    }

    // sort_by is stable, so equal counts keep insertion (first-seen) order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
