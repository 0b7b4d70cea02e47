//! TTL Cache Module
//!
//! Lazy-expiration decorator over any cache holding [`ExpirableItem`]s.

use std::marker::PhantomData;

use chrono::Utc;
use tracing::debug;

use crate::entry::ExpirableItem;
use crate::traits::Cache;

// == TTL Cache ==
/// Wraps an inner cache of [`ExpirableItem`]s with lazy expiration.
///
/// Expired entries are discovered and purged on access; there is no
/// background sweeper. The decorator adds no lock of its own and inherits
/// whichever eviction and ordering policy the wrapped cache provides, so it
/// composes with every cache in this crate.
#[derive(Debug)]
pub struct TtlCache<K, V, C> {
    inner: C,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, C> TtlCache<K, V, C>
where
    C: Cache<K, ExpirableItem<V>>,
{
    // == Constructor ==
    /// Wraps `inner`, interpreting the expiration instant of its values.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// Unwraps the decorator, returning the inner cache.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<K, V, C> Cache<K, ExpirableItem<V>> for TtlCache<K, V, C>
where
    K: Clone,
    C: Cache<K, ExpirableItem<V>>,
{
    /// Delegates to the inner cache, treating an expired entry as a miss and
    /// eagerly deleting it.
    ///
    /// The check-then-delete race is benign: a concurrent `delete` is
    /// idempotent, and a concurrent `put` racing the purge re-creates the
    /// key with a fresh deadline.
    fn get(&self, key: &K) -> Option<ExpirableItem<V>> {
        match self.inner.get(key) {
            Some(item) if !item.is_expired() => Some(item),
            _ => {
                self.inner.delete(key);
                None
            }
        }
    }

    fn put(&self, key: K, item: ExpirableItem<V>) {
        self.inner.put(key, item);
    }

    fn delete(&self, key: &K) {
        self.inner.delete(key);
    }

    /// Passes through to the inner cache, so the count may include expired
    /// entries that no access has purged yet.
    fn len(&self) -> usize {
        self.inner.len()
    }

    /// Visits live entries, purging the expired ones encountered.
    ///
    /// Every entry is judged against one clock reading taken at the start.
    /// Expired keys are collected during the inner traversal and deleted
    /// once the inner cache has released its lock — deleting mid-traversal
    /// would re-enter that lock. [`all`](Cache::all) shares this path, so
    /// every traversal purges.
    fn scan<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &ExpirableItem<V>) -> bool,
    {
        let now = Utc::now();
        let mut expired: Vec<K> = Vec::new();
        self.inner.scan(|key, item| {
            if item.is_expired_at(now) {
                expired.push(key.clone());
                return true;
            }
            visit(key, item)
        });

        if !expired.is_empty() {
            for key in &expired {
                self.inner.delete(key);
            }
            debug!(purged = expired.len(), "purged expired entries during traversal");
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::lru::LruCache;
    use crate::map::MapCache;
    use std::thread::sleep;
    use std::time::Duration;

    const SHORT_TTL: Duration = Duration::from_millis(25);
    const LONG_TTL: Duration = Duration::from_secs(60);

    fn ttl_map() -> TtlCache<String, &'static str, MapCache<String, ExpirableItem<&'static str>>> {
        TtlCache::new(MapCache::new())
    }

    #[test]
    fn test_ttl_get_before_expiry() {
        let cache = ttl_map();
        cache.put("k".to_string(), ExpirableItem::new("v", SHORT_TTL));

        let item = cache.get(&"k".to_string()).expect("fresh item should be found");
        assert_eq!(item.value, "v");
    }

    #[test]
    fn test_ttl_get_after_expiry_purges() {
        let cache = ttl_map();
        cache.put("k".to_string(), ExpirableItem::new("v", SHORT_TTL));

        sleep(SHORT_TTL * 3);
        assert!(cache.get(&"k".to_string()).is_none());

        // the expired entry was deleted from the inner cache, not just hidden
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_ttl_get_missing_key() {
        let cache = ttl_map();
        assert!(cache.get(&"missing".to_string()).is_none());
    }

    #[test]
    fn test_ttl_reads_do_not_slide_expiry() {
        let cache = ttl_map();
        cache.put("k".to_string(), ExpirableItem::new("v", Duration::from_millis(80)));

        // repeated reads must not extend the deadline
        for _ in 0..3 {
            sleep(Duration::from_millis(10));
            assert!(cache.get(&"k".to_string()).is_some());
        }
        sleep(Duration::from_millis(160));
        assert!(cache.get(&"k".to_string()).is_none());
    }

    #[test]
    fn test_ttl_fresh_put_resets_expiry() {
        let cache = ttl_map();
        cache.put("k".to_string(), ExpirableItem::new("old", SHORT_TTL));
        cache.put("k".to_string(), ExpirableItem::new("new", LONG_TTL));

        sleep(SHORT_TTL * 3);
        let item = cache.get(&"k".to_string()).expect("re-put item should survive");
        assert_eq!(item.value, "new");
    }

    #[test]
    fn test_ttl_len_may_overcount_until_access() {
        let cache = ttl_map();
        cache.put("k".to_string(), ExpirableItem::new("v", SHORT_TTL));

        sleep(SHORT_TTL * 3);
        // nothing has touched the expired entry yet
        assert_eq!(cache.len(), 1);

        cache.get(&"k".to_string());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_ttl_scan_filters_and_purges() {
        let cache = ttl_map();
        cache.put("dead".to_string(), ExpirableItem::new("x", SHORT_TTL));
        cache.put("live".to_string(), ExpirableItem::new("y", LONG_TTL));

        sleep(SHORT_TTL * 3);

        let mut seen = Vec::new();
        cache.scan(|key, item| {
            seen.push((key.clone(), item.value));
            true
        });
        assert_eq!(seen, vec![("live".to_string(), "y")]);

        // traversal removed the expired entry from the inner cache
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_ttl_all_also_purges() {
        let cache = ttl_map();
        cache.put("dead".to_string(), ExpirableItem::new("x", SHORT_TTL));
        cache.put("live".to_string(), ExpirableItem::new("y", LONG_TTL));

        sleep(SHORT_TTL * 3);

        let mut values = Vec::new();
        cache.all(|item| {
            values.push(item.value);
            true
        });
        assert_eq!(values, vec!["y"]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_ttl_scan_early_exit_still_purges_collected() {
        let cache = ttl_map();
        cache.put("dead".to_string(), ExpirableItem::new("x", SHORT_TTL));
        cache.put("live".to_string(), ExpirableItem::new("y", LONG_TTL));

        sleep(SHORT_TTL * 3);

        // stop at the first live entry; the expired keys already seen are
        // still purged
        cache.scan(|_, _| false);
        assert!(cache.get(&"dead".to_string()).is_none());
    }

    #[test]
    fn test_ttl_delete_passes_through() {
        let cache = ttl_map();
        cache.put("k".to_string(), ExpirableItem::new("v", LONG_TTL));
        cache.delete(&"k".to_string());

        assert!(cache.get(&"k".to_string()).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_ttl_composes_with_lru() {
        let cache = TtlCache::new(LruCache::new(2).unwrap());
        cache.put("a".to_string(), ExpirableItem::new(1u32, LONG_TTL));
        cache.put("b".to_string(), ExpirableItem::new(2u32, LONG_TTL));

        // the wrapped cache still applies its own eviction policy
        cache.get(&"a".to_string());
        cache.put("c".to_string(), ExpirableItem::new(3u32, LONG_TTL));

        assert!(cache.get(&"a".to_string()).is_some());
        assert!(cache.get(&"b".to_string()).is_none());
        assert!(cache.get(&"c".to_string()).is_some());
    }

    #[test]
    fn test_ttl_into_inner() {
        let cache = ttl_map();
        cache.put("k".to_string(), ExpirableItem::new("v", LONG_TTL));

        let inner = cache.into_inner();
        assert_eq!(inner.len(), 1);
    }
}
