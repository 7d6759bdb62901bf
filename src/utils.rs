//! FNV hashed collections for the small integer keys used across the crate.

use std::hash::Hash;

pub use fnv::{FnvBuildHasher, FnvHashMap, FnvHashSet};

pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    FnvHashSet::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}

/// Presized map keyed by vertex identifiers or other short keys.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    FnvHashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}
