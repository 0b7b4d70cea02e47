//! Sorted Cache Module
//!
//! Unbounded cache ordered by last write; no eviction.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::RwLock;

use crate::list::LinkedSlab;
use crate::stats::{CacheStats, StatsCounter};
use crate::traits::Cache;

// == Sorted Cache ==
/// Unbounded cache that keeps entries in last-write order.
///
/// Same map-plus-linked-list idiom as [`LruCache`](crate::LruCache), but
/// nothing is ever evicted and `get` never repositions an entry — only `put`
/// does, always to the back. Traversal therefore runs from the oldest write
/// to the newest.
#[derive(Debug)]
pub struct SortedCache<K, V> {
    inner: RwLock<SortedInner<K, V>>,
    stats: StatsCounter,
}

#[derive(Debug)]
struct SortedInner<K, V> {
    index: HashMap<K, usize>,
    /// back = most recent write
    entries: LinkedSlab<(K, V)>,
}

impl<K, V> SortedCache<K, V> {
    // == Constructor ==
    /// Creates a new empty SortedCache.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SortedInner {
                index: HashMap::new(),
                entries: LinkedSlab::new(),
            }),
            stats: StatsCounter::default(),
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.inner.read().index.len())
    }
}

impl<K, V> Default for SortedCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Cache<K, V> for SortedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Looks up `key` without touching the write order, so the shared lock
    /// suffices.
    fn get(&self, key: &K) -> Option<V> {
        let inner = self.inner.read();
        match inner.index.get(key).and_then(|&idx| inner.entries.get(idx)) {
            Some((_, value)) => {
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Upserts `key` and moves it to the back of the write order.
    fn put(&self, key: K, value: V) {
        let mut inner = self.inner.write();
        if let Some(&idx) = inner.index.get(&key) {
            if let Some(slot) = inner.entries.get_mut(idx) {
                slot.1 = value;
            }
            inner.entries.move_to_back(idx);
            return;
        }
        let idx = inner.entries.push_back((key.clone(), value));
        inner.index.insert(key, idx);
    }

    fn delete(&self, key: &K) {
        let mut inner = self.inner.write();
        if let Some(idx) = inner.index.remove(key) {
            inner.entries.remove(idx);
        }
    }

    fn len(&self) -> usize {
        self.inner.read().index.len()
    }

    /// Visits entries from the oldest write to the newest.
    fn scan<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let inner = self.inner.read();
        for (key, value) in inner.entries.iter() {
            if !visit(key, value) {
                return;
            }
        }
    }
}
