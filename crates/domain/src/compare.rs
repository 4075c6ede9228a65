//! Key-wise comparison of two flat mappings.

use std::collections::{BTreeMap, BTreeSet};

/// Partition of the keys of two mappings.
///
/// `added` and `removed` are relative to the first mapping: a key only in the
/// first mapping is "added", a key only in the second is "removed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictDiff<K: Ord, V> {
    /// Keys only in the first mapping.
    pub added: BTreeSet<K>,
    /// Keys only in the second mapping.
    pub removed: BTreeSet<K>,
    /// Keys in both mappings with different values, as `(first, second)`.
    pub modified: BTreeMap<K, (V, V)>,
    /// Keys in both mappings with equal values.
    pub same: BTreeSet<K>,
}

impl<K: Ord + Clone, V> DictDiff<K, V> {
    /// True when the two mappings hold the same keys with the same values.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Keys of `expected` that are not unchanged, in key order.
    pub fn differing_keys<'a, I>(&self, expected: I) -> Vec<K>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut keys: Vec<K> = expected
            .into_iter()
            .filter(|k| !self.same.contains(*k))
            .cloned()
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

/// Compares two mappings key by key.
#[must_use]
pub fn dict_compare<K, V>(first: &BTreeMap<K, V>, second: &BTreeMap<K, V>) -> DictDiff<K, V>
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    let mut diff = DictDiff {
        added: BTreeSet::new(),
        removed: BTreeSet::new(),
        modified: BTreeMap::new(),
        same: BTreeSet::new(),
    };

    for (key, value) in first {
        match second.get(key) {
            None => {
                diff.added.insert(key.clone());
            }
            Some(other) if other == value => {
                diff.same.insert(key.clone());
            }
            Some(other) => {
                diff.modified
                    .insert(key.clone(), (value.clone(), other.clone()));
            }
        }
    }
    diff.removed = second
        .keys()
        .filter(|k| !first.contains_key(*k))
        .cloned()
        .collect();

    diff
}

/// Compares two JSON objects member by member.
#[must_use]
pub fn json_compare(
    first: &serde_json::Map<String, serde_json::Value>,
    second: &serde_json::Map<String, serde_json::Value>,
) -> DictDiff<String, serde_json::Value> {
    let to_tree = |m: &serde_json::Map<String, serde_json::Value>| -> BTreeMap<_, _> {
        m.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    };
    dict_compare(&to_tree(first), &to_tree(second))
}
