//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired cache entries.
//! Expired entries are already invisible to reads; the sweep reclaims memory
//! held by keys nobody asks for again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns a task that removes expired entries every `cleanup_interval_secs`.
///
/// Returns the task handle so shutdown can abort it.
///
/// # Example
/// ```ignore
/// let cache = MemoryCache::new(1000);
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: MemoryCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));
    let store = cache.store();

    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "Starting cache cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.write().await.cleanup_expired();

            if removed > 0 {
                info!(removed, "Cache cleanup removed expired entries");
            } else {
                debug!("Cache cleanup found no expired entries");
            }
        }
    })
}
