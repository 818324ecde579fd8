//! Cache Store Module
//!
//! Capacity-bounded byte cache with per-entry TTL and LRU eviction.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{CacheError, CacheResult};

// == Cache Store ==
/// Synchronous cache engine. Callers share it behind a lock.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store that holds at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    ///
    /// A new key arriving at capacity evicts the least recently used key.
    pub fn set(&mut self, key: String, value: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::KeyTooLong {
                max: MAX_KEY_LENGTH,
            });
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::ValueTooLarge {
                max: MAX_VALUE_SIZE,
            });
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            let evicted = self
                .lru
                .evict_oldest()
                .ok_or_else(|| CacheError::Full(format!("capacity is {}", self.max_entries)))?;
            self.entries.remove(&evicted);
            self.stats.record_eviction();
        }

        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value, ttl));
        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`.
    ///
    /// An expired entry is dropped on sight and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let now = Instant::now();
        let live = self
            .entries
            .get(key)
            .map(|entry| (!entry.is_expired_at(now)).then(|| entry.value.clone()));

        if let Some(None) = live {
            self.remove_entry(key);
        }
        let live = live.flatten();

        match live {
            Some(value) => {
                self.stats.record_hit();
                self.lru.touch(key);
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Reads a live entry without touching LRU order or statistics.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key).filter(|entry| !entry.is_expired())
    }

    // == Delete ==
    /// Removes `key`, returning whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }

    // == Cleanup Expired ==
    /// Drops every expired entry and returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }
        expired.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            ..self.stats
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
