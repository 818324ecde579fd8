//! In-process cache backend
//!
//! Shares a [`CacheStore`] behind `Arc<RwLock<..>>` and exposes it through
//! the [`CacheBackend`] contract.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheBackend, CacheStats, CacheStore};
use crate::error::CacheResult;

// == Memory Cache ==
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Shared handle to the underlying store, used by the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.store)
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// True when a live entry exists for `key`. Does not count as a read.
    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.peek(key).is_some()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        // Write lock: reads update LRU order and counters
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        self.store.write().await.set(key.to_string(), value, ttl)
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.store.write().await.delete(key);
        Ok(())
    }
}
