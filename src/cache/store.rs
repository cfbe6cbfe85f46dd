//! Cache Store Module
//!
//! Mutex-guarded map of entries with lazy expiry on read and a background
//! sweep that removes expired entries once per interval.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::cache::{CacheEntry, CacheKey, ResponseCache, SWEEP_INTERVAL};
use crate::tasks::spawn_cleanup_task;

// == Entry Map ==
/// Key-value storage shared between a [`CacheStore`] and its sweep task.
///
/// Every method takes the lock only for the duration of the map access.
#[derive(Debug)]
pub struct EntryMap<V> {
    entries: Mutex<HashMap<CacheKey, CacheEntry<V>>>,
}

impl<V> EntryMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a clone of the value stored under `key` unless it expired
    /// at or before `now`.
    pub fn get(&self, key: CacheKey, now: Instant) -> Option<V>
    where
        V: Clone,
    {
        let entries = self.entries.lock();
        entries
            .get(&key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value.clone())
    }

    /// Inserts or wholesale replaces the entry for `key`.
    pub fn insert(&self, key: CacheKey, entry: CacheEntry<V>) {
        self.entries.lock().insert(key, entry);
    }

    // == Cleanup Expired ==
    /// Removes all entries expired at or before `now`.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<V> Default for EntryMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Cache Store ==
/// TTL cache whose expired entries are swept by a background task.
///
/// Construction spawns the sweep onto the current tokio runtime, so it must
/// be called from within one. The sweep stops when [`CacheStore::shutdown`]
/// is called or the store is dropped.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Entries shared with the sweep task
    entries: Arc<EntryMap<V>>,
    /// TTL stamped on every entry at set time
    ttl: Duration,
    /// Stops the sweep task
    shutdown: CancellationToken,
}

impl<V> CacheStore<V>
where
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a new store with the given TTL and the default sweep interval.
    pub fn new(ttl: Duration) -> Self {
        Self::with_sweep_interval(ttl, SWEEP_INTERVAL)
    }

    /// Creates a new store sweeping expired entries every `interval`.
    pub fn with_sweep_interval(ttl: Duration, interval: Duration) -> Self {
        let entries = Arc::new(EntryMap::new());
        let shutdown = CancellationToken::new();
        spawn_cleanup_task(entries.clone(), interval, shutdown.clone());

        Self {
            entries,
            ttl,
            shutdown,
        }
    }
}

impl<V> ResponseCache<V> for CacheStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Get ==
    fn get(&self, key: CacheKey) -> Option<V> {
        self.entries.get(key, Instant::now())
    }

    // == Set ==
    fn set(&self, key: CacheKey, value: V) {
        self.entries.insert(key, CacheEntry::new(value, self.ttl));
    }

    // == Length ==
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl<V> Drop for CacheStore<V> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
