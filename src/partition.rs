//! Partition Cache Module
//!
//! Shards keys across independent map caches to reduce lock contention.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::map::MapCache;
use crate::stats::CacheStats;
use crate::traits::Cache;

// == Partition Cache ==
/// Routes each key to one of N independently locked [`MapCache`] partitions.
///
/// The routing hash is built once at construction, so a key maps to the same
/// partition for the life of the cache. Operations on keys in different
/// partitions proceed fully in parallel; only same-partition operations
/// serialize on a lock.
#[derive(Debug)]
pub struct PartitionCache<K, V> {
    partitions: Vec<MapCache<K, V>>,
    hasher: RandomState,
}

impl<K, V> PartitionCache<K, V> {
    // == Constructor ==
    /// Creates a cache with `count` partitions, fixed for its lifetime.
    ///
    /// A count of zero is rejected with
    /// [`CacheError::InvalidPartitionCount`].
    pub fn new(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(CacheError::InvalidPartitionCount(count));
        }
        Ok(Self {
            partitions: (0..count).map(|_| MapCache::new()).collect(),
            hasher: RandomState::new(),
        })
    }

    /// Creates a partition cache sized from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.partitions)
    }

    /// Number of partitions the key space is sharded over.
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    // == Stats ==
    /// Returns statistics aggregated across all partitions.
    pub fn stats(&self) -> CacheStats {
        let mut total = CacheStats::default();
        for partition in &self.partitions {
            let stats = partition.stats();
            total.hits += stats.hits;
            total.misses += stats.misses;
            total.evictions += stats.evictions;
            total.entries += stats.entries;
        }
        total
    }
}

impl<K: Hash, V> PartitionCache<K, V> {
    // == Routing ==
    /// Index of the partition owning `key`; deterministic for the life of
    /// the cache.
    pub(crate) fn partition_for(&self, key: &K) -> usize {
        (self.hasher.hash_one(key) % self.partitions.len() as u64) as usize
    }
}

impl<K, V> Cache<K, V> for PartitionCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn get(&self, key: &K) -> Option<V> {
        self.partitions[self.partition_for(key)].get(key)
    }

    fn put(&self, key: K, value: V) {
        self.partitions[self.partition_for(&key)].put(key, value);
    }

    fn delete(&self, key: &K) {
        self.partitions[self.partition_for(key)].delete(key);
    }

    /// Sums per-partition counts without a global lock.
    ///
    /// Under concurrent mutation the total may combine counts taken at
    /// different instants, so it can be a value the cache never held at any
    /// single point in time.
    fn len(&self) -> usize {
        self.partitions.iter().map(|partition| partition.len()).sum()
    }

    /// Visits partitions in index order, holding only the lock of the
    /// partition currently being traversed.
    fn scan<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut stopped = false;
        for partition in &self.partitions {
            partition.scan(|key, value| {
                if visit(key, value) {
                    true
                } else {
                    stopped = true;
                    false
                }
            });
            if stopped {
                return;
            }
        }
    }
}
