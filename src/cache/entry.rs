//! Cache Entry Module
//!
//! A cached value paired with its absolute expiry instant.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// One cached value with TTL metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant the entry was created
    pub created_at: Instant,
    /// Instant after which the entry is stale
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Creates an entry expiring `ttl` from now.
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Whether the entry's TTL has elapsed.
    ///
    /// The comparison is strict: an entry is live up to and including its
    /// expiry instant.
    pub fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }

    /// Remaining time before expiry, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
