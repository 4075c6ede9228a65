//! Property-based tests for the comparator and the JSON flattener.
//!
//! ## What is covered
//! - Comparator partitions are pairwise disjoint and cover both key sets.
//! - Comparing a mapping with itself reports no differences.
//! - Flattening an already-flat mapping is the identity, and flattening twice
//!   equals flattening once.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Test-only assertions.")]

use std::collections::{BTreeMap, BTreeSet};

use bstcheck_domain::{dict_compare, flatten_json};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z0-9-]{0,8}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn nested() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::btree_map("[a-d]{1,2}", inner.clone(), 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
            prop::collection::vec(inner, 0..3).prop_map(Value::Array),
        ]
    })
}

proptest! {
    #[test]
    fn partitions_are_disjoint_and_cover_both_key_sets(
        first in prop::collection::btree_map("[a-f]{1,2}", 0u8..4, 0..10),
        second in prop::collection::btree_map("[a-f]{1,2}", 0u8..4, 0..10),
    ) {
        let diff = dict_compare(&first, &second);
        let modified: BTreeSet<String> = diff.modified.keys().cloned().collect();

        let parts = [&diff.added, &diff.removed, &modified, &diff.same];
        for (i, a) in parts.iter().enumerate() {
            for b in parts.iter().skip(i + 1) {
                prop_assert!(a.is_disjoint(b));
            }
        }

        let union: BTreeSet<String> = parts.iter().flat_map(|p| p.iter().cloned()).collect();
        let all_keys: BTreeSet<String> = first.keys().chain(second.keys()).cloned().collect();
        prop_assert_eq!(union, all_keys);
    }

    #[test]
    fn identical_mappings_have_no_differences(
        map in prop::collection::btree_map("[a-z]{1,4}", any::<i32>(), 0..12),
    ) {
        let diff = dict_compare(&map, &map.clone());
        prop_assert!(diff.added.is_empty());
        prop_assert!(diff.removed.is_empty());
        prop_assert!(diff.modified.is_empty());
        prop_assert_eq!(diff.same.len(), map.len());
    }

    #[test]
    fn flatten_of_flat_mapping_is_identity(
        flat in prop::collection::btree_map("[a-z.]{1,6}", scalar(), 0..10),
    ) {
        let object: Map<String, Value> = flat.clone().into_iter().collect();
        let flattened: BTreeMap<String, Value> = flatten_json(&object);
        prop_assert_eq!(flattened, flat);
    }

    #[test]
    fn flatten_is_idempotent(
        object in prop::collection::btree_map("[a-d]{1,2}", nested(), 0..5),
    ) {
        let object: Map<String, Value> = object.into_iter().collect();
        let once = flatten_json(&object);
        let again = flatten_json(&once.clone().into_iter().collect());
        prop_assert!(once.values().all(|v| !v.is_object() && !v.is_array()));
        prop_assert_eq!(again, once);
    }
}
