//! Property-based checks of the invariants the engine is supposed to
//! hold regardless of insertion order.

use proptest::prelude::*;
use skiplist_engine::OrderedSet;
use std::collections::BTreeSet;

proptest! {
    #[test]
    fn forward_traversal_matches_sorted_unique_keys(mut keys in prop::collection::vec(0i64..10_000, 0..500)) {
        let set = OrderedSet::new();
        for &k in &keys {
            set.insert(k);
        }

        keys.sort_unstable();
        keys.dedup();

        let mut cursor = set.begin();
        let mut walked = Vec::new();
        while !cursor.is_sentinel() {
            walked.push(*cursor.get().unwrap());
            cursor = cursor.next();
        }
        prop_assert_eq!(walked, keys);
    }

    #[test]
    fn insert_then_erase_restores_size(keys in prop::collection::vec(0i64..10_000, 0..300)) {
        let set = OrderedSet::new();
        let unique: BTreeSet<i64> = keys.iter().copied().collect();
        for &k in &keys {
            set.insert(k);
        }
        prop_assert_eq!(set.len(), unique.len());

        for &k in &unique {
            set.erase_key(&k);
        }
        prop_assert_eq!(set.len(), 0);
        prop_assert!(set.is_empty());
    }

    #[test]
    fn find_after_erase_is_absent(keys in prop::collection::hash_set(0i64..1_000, 1..200)) {
        let set = OrderedSet::new();
        for &k in &keys {
            set.insert(k);
        }
        let victim = *keys.iter().next().unwrap();
        set.erase_key(&victim);
        prop_assert!(set.find(&victim).is_sentinel());
        prop_assert_eq!(set.len(), keys.len() - 1);
    }
}
