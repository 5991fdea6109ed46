use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::models::{Fleet, TimedRecord};

#[derive(Debug)]
struct CacheEntry<V> {
    value: Arc<V>,
    stored_at: DateTime<Utc>,
}

impl<V> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self { value: Arc::clone(&self.value), stored_at: self.stored_at }
    }
}

/// Thread-safe cache of loaded data with a fixed time to live per entry
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: Arc<DashMap<String, CacheEntry<V>>>,
    ttl: Duration,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self { entries: Arc::clone(&self.entries), ttl: self.ttl }
    }
}

impl<V> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Returns the cached value if it is still within its TTL
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        let entry = self.entries.get(key)?.value().clone();
        if Utc::now() < entry.stored_at + self.ttl {
            return Some(entry.value);
        }
        // Drop it only while still stale
        self.entries.remove_if(key, |_, e| Utc::now() >= e.stored_at + self.ttl);
        None
    }

    pub fn insert(&self, key: &str, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.entries.insert(
            key.to_string(),
            CacheEntry { value: Arc::clone(&value), stored_at: Utc::now() },
        );
        value
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Clear all expired entries from the cache
    pub fn cleanup_expired(&self) {
        let now = Utc::now();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| now < entry.stored_at + ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Caches for the two loaders: series keyed by farm id, fleet keyed by feed URL
#[derive(Clone)]
pub struct DataCache {
    pub series: TtlCache<Vec<TimedRecord>>,
    pub fleet: TtlCache<Fleet>,
}

impl DataCache {
    pub fn new(series_ttl: Duration, fleet_ttl: Duration) -> Self {
        Self {
            series: TtlCache::new(series_ttl),
            fleet: TtlCache::new(fleet_ttl),
        }
    }

    pub fn clear(&self) {
        self.series.clear();
        self.fleet.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_returns_shared_value() {
        let cache: TtlCache<Vec<i32>> = TtlCache::new(Duration::hours(1));

        let stored = cache.insert("HDWF2", vec![1, 2, 3]);
        let hit = cache.get("HDWF2").unwrap();

        assert!(Arc::ptr_eq(&stored, &hit));
        assert!(cache.get("BLUFF1").is_none());
    }

    #[test]
    fn test_zero_ttl_always_misses() {
        let cache: TtlCache<u8> = TtlCache::new(Duration::zero());

        cache.insert("feed", 1);

        assert!(cache.get("feed").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_miss_leaves_fresh_entries_alone() {
        let cache: TtlCache<u8> = TtlCache::new(Duration::hours(1));
        cache.insert("HDWF2", 1);

        assert!(cache.get("WPWF").is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("HDWF2").as_deref(), Some(&1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = DataCache::new(Duration::hours(24), Duration::minutes(5));
        cache.series.insert("HDWF2", Vec::new());
        cache.series.insert("WPWF", Vec::new());
        cache.fleet.insert("https://feed", Fleet::default());

        cache.series.invalidate("HDWF2");
        assert!(cache.series.get("HDWF2").is_none());
        assert_eq!(cache.series.len(), 1);

        cache.clear();
        assert!(cache.series.is_empty());
        assert!(cache.fleet.is_empty());
    }

    #[test]
    fn test_cleanup_expired_keeps_fresh_entries() {
        let fresh: TtlCache<u8> = TtlCache::new(Duration::hours(1));
        fresh.insert("a", 1);
        fresh.cleanup_expired();
        assert_eq!(fresh.len(), 1);

        let stale: TtlCache<u8> = TtlCache::new(Duration::zero());
        stale.insert("a", 1);
        stale.cleanup_expired();
        assert_eq!(stale.len(), 0);
    }
}
