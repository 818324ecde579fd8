//! LRU Tracker Module
//!
//! Orders cache keys by last access so the coldest one can be evicted.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Access-order index over cache keys.
///
/// Every touch stamps the key with a monotonically increasing tick; the
/// smallest tick in `by_tick` is the least recently used key.
#[derive(Debug, Default)]
pub struct LruTracker {
    next_tick: u64,
    by_tick: BTreeMap<u64, String>,
    ticks: HashMap<String, u64>,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, inserting it if unknown.
    pub fn touch(&mut self, key: &str) {
        let tick = self.next_tick;
        self.next_tick += 1;

        if let Some(previous) = self.ticks.insert(key.to_string(), tick) {
            self.by_tick.remove(&previous);
        }
        self.by_tick.insert(tick, key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.by_tick.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_tick.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.ticks.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}
