//! Cache Store Module
//!
//! Process-lifetime map from request key to upstream response.

use std::collections::HashMap;

use crate::cache::{CacheKey, CacheStats, CachedResponse};

// == Response Cache ==
/// In-memory response cache.
///
/// Entries live until the process exits: there is no expiry, no eviction
/// and no size bound. Writes to an existing key replace the old payload.
#[derive(Debug, Default)]
pub struct ResponseCache {
    /// Key to payload storage
    entries: HashMap<CacheKey, CachedResponse>,
    /// Performance statistics
    stats: CacheStats,
}

impl ResponseCache {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Looks up a key, counting the lookup as a hit or a miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<CachedResponse> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores a payload under `key`.
    ///
    /// Returns true if an earlier payload for the same key was replaced.
    pub fn insert(&mut self, key: CacheKey, response: CachedResponse) -> bool {
        let replaced = self.entries.insert(key, response).is_some();
        self.stats.record_store(replaced);
        self.stats.set_total_entries(self.entries.len());
        replaced
    }

    // == Contains ==
    /// Checks for a key without touching the statistics.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
