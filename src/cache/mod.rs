//! Cache Module
//!
//! Response cache with TTL expiration. Two implementations share the
//! [`ResponseCache`] contract: [`CacheStore`] keeps entries and sweeps them
//! in the background, [`NoopCache`] keeps nothing and is used when caching
//! is disabled.

mod entry;
mod noop;
mod store;


use std::sync::Arc;
use std::time::Duration;

use tracing::info;

// Re-export public types
pub use entry::CacheEntry;
pub use noop::NoopCache;
pub use store::{CacheStore, EntryMap};

// == Public Constants ==
/// Interval between two background sweeps of expired entries
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Identifier under which a response is cached
pub type CacheKey = i64;

// == Response Cache ==
/// Capability shared by every cache implementation.
///
/// None of the operations can fail; a missing or expired entry is reported
/// as `None`. Implementations must tolerate `len` being polled concurrently
/// with `get` and `set`.
pub trait ResponseCache<V>: Send + Sync {
    /// Returns the value stored under `key`, unless absent or expired.
    fn get(&self, key: CacheKey) -> Option<V>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: CacheKey, value: V);

    /// Returns the number of retained entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stops any background work owned by the cache.
    fn shutdown(&self) {}
}

/// Selects the cache implementation for the configured TTL.
///
/// A zero or missing TTL disables caching. Otherwise a [`CacheStore`] is
/// created, which requires a running tokio runtime.
pub fn build_cache<V>(ttl: Option<Duration>) -> Arc<dyn ResponseCache<V>>
where
    V: Clone + Send + Sync + 'static,
{
    match ttl.filter(|ttl| !ttl.is_zero()) {
        Some(ttl) => {
            info!("Using cache expiry (ttl={:?})", ttl);
            Arc::new(CacheStore::<V>::new(ttl))
        }
        None => {
            info!("Response cache disabled");
            Arc::new(NoopCache)
        }
    }
}
