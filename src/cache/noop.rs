//! No-op cache used when caching is disabled.

use crate::cache::{CacheKey, ResponseCache};

/// Cache that never retains anything: every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl<V> ResponseCache<V> for NoopCache {
    fn get(&self, _key: CacheKey) -> Option<V> {
        None
    }

    fn set(&self, _key: CacheKey, _value: V) {}

    fn len(&self) -> usize {
        0
    }
}
