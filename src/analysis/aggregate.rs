use std::collections::HashMap;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// Grouped counts and top-N selection
// ---------------------------------------------------------------------------

/// Count rows per key, keeping keys in first-encounter order. Zero rows in
/// means zero pairs out.
pub fn count_by<T, K, F>(rows: &[T], key: F) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for row in rows {
        let k = key(row);
        match slots.get(&k) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(k.clone(), counts.len());
                counts.push((k, 1));
            }
        }
    }
    counts
}

/// The `n` largest counts, sorted descending. The sort is stable, so ties
/// keep the first-encounter order produced by [`count_by`].
pub fn top_n<K: Clone>(counts: &[(K, usize)], n: usize) -> Vec<(K, usize)> {
    let mut sorted = counts.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted.truncate(n);
    sorted
}
