//! Cache Statistics Module
//!
//! Lock-free performance counters and the immutable snapshot built from
//! them on request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

// == Cache Counters ==
/// Live counters, incremented atomically and independently of the map lock.
///
/// Counters are monotonic; snapshots may be torn across counters under
/// concurrent load but each individual counter is always exact.
#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    load_successes: AtomicU64,
    load_failures: AtomicU64,
    total_load_time_micros: AtomicU64,
}

impl CacheCounters {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_load_success(&self, elapsed: Duration) {
        self.load_successes.fetch_add(1, Ordering::Relaxed);
        self.total_load_time_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Builds a point-in-time snapshot combined with the map's size figures.
    pub(crate) fn snapshot(&self, current_size: usize, max_size: usize) -> CacheStats {
        CacheStats {
            hit_count: self.hits.load(Ordering::Relaxed),
            miss_count: self.misses.load(Ordering::Relaxed),
            eviction_count: self.evictions.load(Ordering::Relaxed),
            load_success_count: self.load_successes.load(Ordering::Relaxed),
            load_failure_count: self.load_failures.load(Ordering::Relaxed),
            total_load_time: Duration::from_micros(
                self.total_load_time_micros.load(Ordering::Relaxed),
            ),
            current_size,
            max_size,
        }
    }
}

// == Cache Stats ==
/// Immutable snapshot of cache performance, rebuilt on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads answered from the cache
    pub hit_count: u64,
    /// Reads that found nothing usable (absent or expired)
    pub miss_count: u64,
    /// Entries removed by LRU displacement or detected expiry
    pub eviction_count: u64,
    /// Loader invocations that completed and were cached
    pub load_success_count: u64,
    /// Loader invocations that failed; nothing was cached
    pub load_failure_count: u64,
    /// Time spent in successful loaders, cumulative
    pub total_load_time: Duration,
    /// Entries currently held
    pub current_size: usize,
    /// Capacity bound
    pub max_size: usize,
}

impl CacheStats {
    /// Fraction of reads answered from the cache, 0.0 with no reads yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }

    /// Fraction of capacity in use.
    pub fn utilization(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            self.current_size as f64 / self.max_size as f64
        }
    }

    /// Mean latency of successful loads, zero with no loads yet.
    pub fn average_load_time(&self) -> Duration {
        if self.load_success_count == 0 {
            Duration::ZERO
        } else {
            self.total_load_time / self.load_success_count as u32
        }
    }
}
