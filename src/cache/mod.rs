//! Cache Module
//!
//! The cache contract consumed by the order service, plus an in-process
//! implementation with TTL expiration and LRU eviction.
//!
//! A cache here is disposable: it may drop any entry at any time and the
//! service must stay correct.

mod entry;
mod lru;
mod memory;
mod stats;
mod store;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheResult;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use memory::MemoryCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Cache Backend ==
/// Key/value cache over opaque bytes with per-entry TTL.
///
/// A miss is `Ok(None)`, never an error. Errors mean the cache itself
/// misbehaved; callers decide whether that matters.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> CacheResult<()>;
}
