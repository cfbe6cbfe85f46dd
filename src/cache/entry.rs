//! Cache Entry Module
//!
//! Defines a single cached value together with its absolute expiry time.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with its expiry deadline.
///
/// Entries are never updated in place: overwriting a key replaces the whole
/// entry, which also restarts its expiry window.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant at or after which the entry is considered absent
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` after now.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self::with_deadline(value, Instant::now() + ttl)
    }

    /// Creates a cache entry with an explicit deadline.
    pub fn with_deadline(value: V, expires_at: Instant) -> Self {
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired relative to `now`.
    ///
    /// Boundary condition: an entry whose deadline equals `now` is expired.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
