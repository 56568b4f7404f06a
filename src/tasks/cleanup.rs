//! TTL Cleanup Task
//!
//! Background task that periodically removes expired page-cache entries,
//! bounding the memory held by pages nobody re-reads.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::PageCache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the given interval
/// between sweeps. Each sweep takes the cache's exclusive section like any
/// other mutation.
///
/// # Arguments
/// * `cache` - Shared reference to the page cache
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// when the cache's owner shuts down.
pub fn spawn_cleanup_task<V>(cache: Arc<PageCache<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired();

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
    use crate::cache::CacheKey;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = Arc::new(PageCache::new(100, Duration::from_secs(300)));
        cache.put_with_ttl(
            CacheKey::new("sweep", 1, 10),
            "value".to_string(),
            Duration::from_millis(20),
        );

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(
            cache.is_empty(),
            "Expired entry should have been cleaned up"
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = Arc::new(PageCache::new(100, Duration::from_secs(300)));
        cache.put(CacheKey::new("sweep", 1, 10), "long-lived".to_string());

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(
            cache.get(&CacheKey::new("sweep", 1, 10)),
            Some("long-lived".to_string()),
            "Valid entry should not be removed"
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache: Arc<PageCache<String>> = Arc::new(PageCache::new(100, Duration::from_secs(300)));

        let handle = spawn_cleanup_task(cache, Duration::from_millis(50));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
