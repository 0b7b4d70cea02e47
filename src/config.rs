//! Configuration Module
//!
//! Handles loading cache tuning parameters from environment variables.

use std::env;
use std::time::Duration;

/// Cache tuning parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. Consumed by the sized constructors
/// ([`LruCache::from_config`](crate::LruCache::from_config),
/// [`PartitionCache::from_config`](crate::PartitionCache::from_config)) and
/// by callers building [`ExpirableItem`](crate::ExpirableItem)s with a
/// uniform TTL.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries for LRU caches
    pub lru_capacity: usize,
    /// Number of partitions for partition caches
    pub partitions: usize,
    /// Default TTL in seconds for expirable items
    pub default_ttl_secs: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment
    /// variables.
    ///
    /// # Environment Variables
    /// - `CACHE_LRU_CAPACITY` - Maximum LRU entries (default: 1000)
    /// - `CACHE_PARTITIONS` - Partition count (default: 16)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 300)
    pub fn from_env() -> Self {
        Self {
            lru_capacity: env::var("CACHE_LRU_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            partitions: env::var("CACHE_PARTITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(16),
            default_ttl_secs: env::var("CACHE_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }

    /// The default TTL as a `Duration`, ready for
    /// [`ExpirableItem::new`](crate::ExpirableItem::new).
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            lru_capacity: 1000,
            partitions: 16,
            default_ttl_secs: 300,
        }
    }
}
