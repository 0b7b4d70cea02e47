//! Map Cache Module
//!
//! Baseline hash-map cache guarded by a single reader-writer lock; no
//! eviction, no expiration.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::RwLock;

use crate::stats::{CacheStats, StatsCounter};
use crate::traits::Cache;

// == Map Cache ==
/// Hash-map cache with one lock for the whole instance.
///
/// Reads take the shared lock, writes the exclusive lock. Traversal holds
/// the shared lock for its full duration, so a visitor that mutates the same
/// cache deadlocks; drain or early-exit instead.
#[derive(Debug)]
pub struct MapCache<K, V> {
    data: RwLock<HashMap<K, V>>,
    stats: StatsCounter,
}

impl<K, V> MapCache<K, V> {
    // == Constructor ==
    /// Creates a new empty MapCache.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            stats: StatsCounter::default(),
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.data.read().len())
    }
}

impl<K, V> Default for MapCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Cache<K, V> for MapCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn get(&self, key: &K) -> Option<V> {
        let data = self.data.read();
        match data.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    fn put(&self, key: K, value: V) {
        self.data.write().insert(key, value);
    }

    fn delete(&self, key: &K) {
        self.data.write().remove(key);
    }

    fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Visits entries in the map's internal order.
    fn scan<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let data = self.data.read();
        for (key, value) in data.iter() {
            if !visit(key, value) {
                return;
            }
        }
    }
}
