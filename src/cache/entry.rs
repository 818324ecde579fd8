//! Cache Entry Module
//!
//! A single cached payload and its expiry deadline.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Opaque cached bytes plus the instant they stop being valid.
///
/// Deadlines use tokio's clock so a paused test runtime controls expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Vec<u8>,
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(value: Vec<u8>, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
