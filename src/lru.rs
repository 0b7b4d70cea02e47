//! LRU Cache Module
//!
//! Bounded cache with strict least-recently-used eviction.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::RwLock;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::list::LinkedSlab;
use crate::stats::{CacheStats, StatsCounter};
use crate::traits::Cache;

// == LRU Cache ==
/// Bounded cache evicting the least recently used entry once full.
///
/// A map from key to node index and a doubly linked list of `(key, value)`
/// slots share one lock; the list orders entries from most- (front) to
/// least-recently-used (back), so promotion, insertion and eviction are all
/// O(1).
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: RwLock<LruInner<K, V>>,
    capacity: usize,
    stats: StatsCounter,
}

#[derive(Debug)]
struct LruInner<K, V> {
    index: HashMap<K, usize>,
    /// front = most recently used
    entries: LinkedSlab<(K, V)>,
}

impl<K, V> LruCache<K, V> {
    // == Constructor ==
    /// Creates an LRU cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is rejected with [`CacheError::InvalidCapacity`]:
    /// the cache never degrades to a zero-usable-capacity instance.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            inner: RwLock::new(LruInner {
                index: HashMap::with_capacity(capacity),
                entries: LinkedSlab::with_capacity(capacity),
            }),
            capacity,
            stats: StatsCounter::default(),
        })
    }

    /// Creates an LRU cache sized from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.lru_capacity)
    }

    /// Maximum number of entries the cache can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.inner.read().index.len())
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Looks up `key` and marks the entry as most recently used.
    ///
    /// Promotion mutates the recency list, so `get` takes the exclusive lock
    /// even though it is semantically a read; readers of an LRU cache
    /// serialize with each other.
    fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.write();
        let idx = match inner.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.stats.record_miss();
                return None;
            }
        };
        inner.entries.move_to_front(idx);
        self.stats.record_hit();
        inner.entries.get(idx).map(|(_, value)| value.clone())
    }

    /// Upserts `key`, promoting it to most recently used.
    ///
    /// Inserting a new key at capacity first evicts exactly one entry, the
    /// one at the back of the recency list.
    fn put(&self, key: K, value: V) {
        let mut inner = self.inner.write();
        if let Some(&idx) = inner.index.get(&key) {
            if let Some(slot) = inner.entries.get_mut(idx) {
                slot.1 = value;
            }
            inner.entries.move_to_front(idx);
            return;
        }

        if inner.index.len() == self.capacity {
            if let Some(tail) = inner.entries.back() {
                if let Some((evicted, _)) = inner.entries.remove(tail) {
                    inner.index.remove(&evicted);
                    self.stats.record_eviction();
                    debug!(
                        capacity = self.capacity,
                        "cache full, evicted least recently used entry"
                    );
                }
            }
        }

        let idx = inner.entries.push_front((key.clone(), value));
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

    /// Visits entries from most- to least-recently-used.
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
