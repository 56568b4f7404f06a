//! Page Cache Store
//!
//! Bounded key/value store combining LRU ordering with per-entry TTL and
//! get-or-compute loading, safe for concurrent use from sync and async
//! call sites.

use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::RwLock;
use tracing::debug;

use crate::cache::stats::CacheCounters;
use crate::cache::{CacheEntry, CacheKey, CacheStats};
use crate::error::{PaginationError, Result};

// == Page Cache ==
/// Bounded, TTL-aware cache with LRU eviction.
///
/// The backing map sits behind a read-biased shared/exclusive lock:
/// concurrent reads proceed together, while every mutation, including the
/// recency promotion a hit performs, runs under exclusive access. Counters
/// live outside the lock and are incremented atomically.
///
/// The lock is never held while a loader runs, so callers computing
/// distinct keys do not block one another. Concurrent callers racing on the
/// same absent key may each run their own loader; the final insert wins and
/// the store is never left in a partial state.
pub struct PageCache<V> {
    /// LRU-ordered entries, newest access first
    entries: RwLock<LruCache<CacheKey, CacheEntry<V>>>,
    /// Lock-free performance counters
    counters: CacheCounters,
    /// TTL applied when `put` is called without an explicit one
    default_ttl: Duration,
}

impl<V> PageCache<V> {
    // == Constructor ==
    /// Creates a cache bounded to `max_size` entries.
    ///
    /// A `max_size` of zero is treated as one; the capacity bound must
    /// admit at least a single entry.
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_size.max(1)).expect("capacity is at least 1");
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            counters: CacheCounters::new(),
            default_ttl,
        }
    }

    // == Get ==
    /// Returns the cached value for `key` if present and not expired.
    ///
    /// The probe runs in shared mode so misses never serialize. When a
    /// candidate is found, the read guard is dropped and exclusive access
    /// is re-acquired with a recheck: a live entry is promoted to
    /// most-recently-used (a hit), an expired one is removed (a miss plus
    /// an eviction).
    pub fn get(&self, key: &CacheKey) -> Option<V>
    where
        V: Clone,
    {
        {
            let entries = self.entries.read();
            if entries.peek(key).is_none() {
                drop(entries);
                self.counters.record_miss();
                return None;
            }
        }

        // Promotion and expiry removal both mutate; recheck under the
        // exclusive lock since the entry may have changed since the probe.
        let mut entries = self.entries.write();
        match entries.peek(key) {
            Some(entry) if entry.is_expired() => {
                entries.pop(key);
                drop(entries);
                self.counters.record_miss();
                self.counters.record_eviction();
                debug!(%key, "removed expired entry on read");
                None
            }
            Some(_) => {
                let value = entries.get(key).map(|entry| entry.value.clone());
                drop(entries);
                self.counters.record_hit();
                value
            }
            None => {
                drop(entries);
                self.counters.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Inserts or overwrites `key` with the default TTL.
    pub fn put(&self, key: CacheKey, value: V) {
        self.put_with_ttl(key, value, self.default_ttl);
    }

    /// Inserts or overwrites `key`, expiring `ttl` from now.
    ///
    /// If the insert pushes the store past capacity, the single
    /// least-recently-used entry is displaced and counted as an eviction.
    pub fn put_with_ttl(&self, key: CacheKey, value: V, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl);
        let evicted = {
            let mut entries = self.entries.write();
            match entries.push(key.clone(), entry) {
                // push returns the displaced LRU pair, or the old value
                // under the same key on overwrite
                Some((displaced, _)) if displaced != key => Some(displaced),
                _ => None,
            }
        };
        if let Some(displaced) = evicted {
            self.counters.record_eviction();
            debug!(key = %displaced, "evicted least-recently-used entry");
        }
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, invoking `loader` on a miss.
    ///
    /// A successful load is timed, cached and returned; a failed load is
    /// counted and surfaced as [`PaginationError::CacheLoad`] without
    /// caching anything. The loader runs outside the lock.
    pub fn get_or_compute<F>(&self, key: &CacheKey, loader: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
        V: Clone,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let started = Instant::now();
        match loader() {
            Ok(value) => {
                self.counters.record_load_success(started.elapsed());
                self.put(key.clone(), value.clone());
                Ok(value)
            }
            Err(err) => {
                self.counters.record_load_failure();
                Err(PaginationError::CacheLoad(Box::new(err)))
            }
        }
    }

    // == Async Variants ==
    /// Non-blocking form of [`get`](PageCache::get).
    ///
    /// The lock is short-lived and never held across an await, so the sync
    /// body is safe to call directly from async contexts.
    pub async fn get_async(&self, key: &CacheKey) -> Option<V>
    where
        V: Clone,
    {
        self.get(key)
    }

    /// Non-blocking form of [`put`](PageCache::put).
    pub async fn put_async(&self, key: CacheKey, value: V) {
        self.put(key, value);
    }

    /// Non-blocking form of [`get_or_compute`](PageCache::get_or_compute)
    /// taking an async loader, awaited outside the lock.
    pub async fn get_or_compute_async<F, Fut>(&self, key: &CacheKey, loader: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
        V: Clone,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let started = Instant::now();
        match loader().await {
            Ok(value) => {
                self.counters.record_load_success(started.elapsed());
                self.put(key.clone(), value.clone());
                Ok(value)
            }
            Err(err) => {
                self.counters.record_load_failure();
                Err(PaginationError::CacheLoad(Box::new(err)))
            }
        }
    }

    // == Invalidation ==
    /// Removes `key`, reporting whether an entry existed.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.entries.write().pop(key).is_some()
    }

    /// Removes every entry.
    pub fn invalidate_all(&self) {
        self.entries.write().clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were purged.
    ///
    /// Called by the periodic sweep so entries nobody re-reads do not hold
    /// memory until displaced.
    pub fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let expired: Vec<CacheKey> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }
        expired.len()
    }

    // == Introspection ==
    /// Current number of live entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacity bound.
    pub fn max_size(&self) -> usize {
        self.entries.read().cap().get()
    }

    /// TTL used when none is given explicitly.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Builds a point-in-time statistics snapshot from the live counters.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        self.counters.snapshot(entries.len(), entries.cap().get())
    }
}

impl<V> fmt::Debug for PageCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        f.debug_struct("PageCache")
            .field("len", &entries.len())
            .field("max_size", &entries.cap().get())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const TTL: Duration = Duration::from_secs(300);

    fn key(page: usize) -> CacheKey {
        CacheKey::new("test", page, 10)
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache: PageCache<String> = PageCache::new(10, TTL);
        assert!(cache.is_empty());
        assert_eq!(cache.max_size(), 10);
    }

    #[test]
    fn test_put_and_get() {
        let cache = PageCache::new(10, TTL);
        cache.put(key(1), "page one".to_string());

        assert_eq!(cache.get(&key(1)), Some("page one".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_missing_records_miss() {
        let cache: PageCache<String> = PageCache::new(10, TTL);
        assert_eq!(cache.get(&key(1)), None);

        let stats = cache.stats();
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.hit_count, 0);
    }

    #[test]
    fn test_overwrite_is_not_an_eviction() {
        let cache = PageCache::new(10, TTL);
        cache.put(key(1), "old".to_string());
        cache.put(key(1), "new".to_string());

        assert_eq!(cache.get(&key(1)), Some("new".to_string()));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().eviction_count, 0);
    }

    #[test]
    fn test_capacity_displacement_evicts_lru() {
        let cache = PageCache::new(2, TTL);
        cache.put(key(1), "a".to_string());
        cache.put(key(2), "b".to_string());
        cache.put(key(3), "c".to_string());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&key(1)), None);
        assert!(cache.get(&key(2)).is_some());
        assert!(cache.get(&key(3)).is_some());
        assert_eq!(cache.stats().eviction_count, 1);
    }

    // put(A); put(B); get(A); put(C) with capacity 2 evicts B, since the
    // intervening read refreshed A
    #[test]
    fn test_read_refreshes_recency_order() {
        let cache = PageCache::new(2, TTL);
        cache.put(key(1), "a".to_string());
        cache.put(key(2), "b".to_string());
        assert!(cache.get(&key(1)).is_some());
        cache.put(key(3), "c".to_string());

        assert!(cache.get(&key(1)).is_some());
        assert_eq!(cache.get(&key(2)), None);
        assert!(cache.get(&key(3)).is_some());
    }

    #[test]
    fn test_expired_read_counts_miss_and_eviction() {
        let cache = PageCache::new(10, TTL);
        cache.put_with_ttl(key(1), "short-lived".to_string(), Duration::from_millis(20));

        sleep(Duration::from_millis(40));

        assert_eq!(cache.get(&key(1)), None);
        assert_eq!(cache.len(), 0);

        let stats = cache.stats();
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.eviction_count, 1);
    }

    #[test]
    fn test_entry_live_just_before_ttl() {
        let cache = PageCache::new(10, TTL);
        cache.put_with_ttl(key(1), "value".to_string(), Duration::from_secs(60));
        assert!(cache.get(&key(1)).is_some());
    }

    #[test]
    fn test_get_or_compute_loads_once_then_hits() {
        let cache = PageCache::new(10, TTL);

        let value = cache
            .get_or_compute(&key(1), || Ok("computed".to_string()))
            .unwrap();
        assert_eq!(value, "computed");

        // Second call must be served from the cache
        let value = cache
            .get_or_compute(&key(1), || {
                panic!("loader must not run on a hit");
            })
            .unwrap();
        assert_eq!(value, "computed");

        let stats = cache.stats();
        assert_eq!(stats.load_success_count, 1);
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
    }

    #[test]
    fn test_get_or_compute_failure_caches_nothing() {
        let cache: PageCache<String> = PageCache::new(10, TTL);

        let result = cache.get_or_compute(&key(1), || {
            Err(PaginationError::DataSource(anyhow::anyhow!("boom")))
        });

        assert!(matches!(result, Err(PaginationError::CacheLoad(_))));
        assert!(cache.is_empty());

        let stats = cache.stats();
        assert_eq!(stats.load_failure_count, 1);
        assert_eq!(stats.load_success_count, 0);
    }

    #[test]
    fn test_invalidate_single_key() {
        let cache = PageCache::new(10, TTL);
        cache.put(key(1), "a".to_string());
        cache.put(key(2), "b".to_string());

        assert!(cache.invalidate(&key(1)));
        assert!(!cache.invalidate(&key(1)));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key(2)).is_some());
    }

    #[test]
    fn test_invalidate_all() {
        let cache = PageCache::new(10, TTL);
        cache.put(key(1), "a".to_string());
        cache.put(key(2), "b".to_string());

        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cleanup_expired_purges_only_stale_entries() {
        let cache = PageCache::new(10, TTL);
        cache.put_with_ttl(key(1), "stale".to_string(), Duration::from_millis(20));
        cache.put_with_ttl(key(2), "fresh".to_string(), Duration::from_secs(60));

        sleep(Duration::from_millis(40));

        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key(2)).is_some());
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        use std::sync::Arc;
        use std::thread;

        let cache = Arc::new(PageCache::new(64, TTL));
        let mut handles = Vec::new();

        for worker in 0..4 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..200 {
                    let k = CacheKey::new("concurrent", worker * 1000 + i, 10);
                    cache.put(k.clone(), format!("value-{worker}-{i}"));
                    let _ = cache.get(&k);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 64);
        let stats = cache.stats();
        assert_eq!(stats.current_size, cache.len());
    }

    #[tokio::test]
    async fn test_async_put_and_get() {
        let cache = PageCache::new(10, TTL);
        cache.put_async(key(1), "async".to_string()).await;
        assert_eq!(cache.get_async(&key(1)).await, Some("async".to_string()));
    }

    #[tokio::test]
    async fn test_get_or_compute_async_loads_and_caches() {
        let cache = PageCache::new(10, TTL);

        let value = cache
            .get_or_compute_async(&key(1), || async { Ok("loaded".to_string()) })
            .await
            .unwrap();
        assert_eq!(value, "loaded");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().load_success_count, 1);
    }

    #[tokio::test]
    async fn test_get_or_compute_async_failure_is_wrapped() {
        let cache: PageCache<String> = PageCache::new(10, TTL);

        let result = cache
            .get_or_compute_async(&key(1), || async {
                Err(PaginationError::DataSource(anyhow::anyhow!("offline")))
            })
            .await;

        assert!(matches!(result, Err(PaginationError::CacheLoad(_))));
        assert!(cache.is_empty());
        assert_eq!(cache.stats().load_failure_count, 1);
    }

    #[tokio::test]
    async fn test_concurrent_async_loads_same_key_stay_consistent() {
        use std::sync::Arc;

        let cache = Arc::new(PageCache::new(10, TTL));
        let mut handles = Vec::new();

        for i in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_compute_async(&key(1), || async move {
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        Ok(format!("load-{i}"))
                    })
                    .await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        // Duplicate loads are permitted; exactly one value survives
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key(1)).is_some());
    }
}
