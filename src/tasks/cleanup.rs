//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::EntryMap;

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The task sleeps for `interval` between cleanup runs and takes the map's
/// lock only while scanning it. It exits once `shutdown` is cancelled.
///
/// # Example
/// ```ignore
/// let entries = Arc::new(EntryMap::<String>::new());
/// let shutdown = CancellationToken::new();
/// let handle = spawn_cleanup_task(entries.clone(), Duration::from_secs(1), shutdown.clone());
/// // Later, during shutdown:
/// shutdown.cancel();
/// ```
pub fn spawn_cleanup_task<V>(
    entries: Arc<EntryMap<V>>,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        debug!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("TTL cleanup task stopped");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            let removed = entries.cleanup_expired(Instant::now());

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheEntry;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let entries = Arc::new(EntryMap::new());
        entries.insert(1, CacheEntry::new("value", Duration::from_millis(100)));

        let shutdown = CancellationToken::new();
        let handle =
            spawn_cleanup_task(entries.clone(), Duration::from_millis(200), shutdown.clone());

        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(entries.is_empty(), "Expired entry should have been cleaned up");

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let entries = Arc::new(EntryMap::new());
        entries.insert(1, CacheEntry::new("value", Duration::from_secs(3600)));

        let shutdown = CancellationToken::new();
        let handle =
            spawn_cleanup_task(entries.clone(), Duration::from_millis(100), shutdown.clone());

        tokio::time::sleep(Duration::from_millis(350)).await;

        assert_eq!(entries.get(1, Instant::now()), Some("value"));

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_cleanup_task_stops_on_cancel() {
        let entries: Arc<EntryMap<String>> = Arc::new(EntryMap::new());
        let shutdown = CancellationToken::new();

        let handle = spawn_cleanup_task(entries, Duration::from_secs(1), shutdown.clone());

        shutdown.cancel();

        tokio::time::timeout(Duration::from_millis(500), handle)
            .await
            .expect("Task should stop promptly after cancellation")
            .unwrap();
    }
}
