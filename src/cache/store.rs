//! Response Cache Module
//!
//! Main cache engine combining HashMap storage with LRU tracking, per-entry
//! TTL expiration and short-lived negative entries.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::{
    CacheEntry, CacheStats, LruTracker, DEFAULT_MAX_ENTRIES, DEFAULT_NEGATIVE_TTL_MS,
    DEFAULT_TTL_MS,
};

// == Response Cache ==
/// Bounded response cache with LRU eviction, TTL expiry and negative caching.
///
/// Keys are full request URLs, which are unique per resource across the
/// endpoint catalog, so positive entries, negative entries and in-flight
/// registrations all share one key namespace safely.
///
/// There is no background sweep: expiry is checked only on read, so an
/// expired key may occupy capacity until its next read or an eviction.
#[derive(Debug)]
pub struct ResponseCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL in milliseconds for positive entries
    ttl_ms: u64,
    /// TTL in milliseconds for negative entries
    negative_ttl_ms: u64,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates a new ResponseCache with the given capacity and TTLs.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `ttl_ms` - TTL in milliseconds for positive entries
    /// * `negative_ttl_ms` - TTL in milliseconds for negative entries
    pub fn new(max_entries: usize, ttl_ms: u64, negative_ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl_ms,
            negative_ttl_ms,
        }
    }

    // == Get ==
    /// Retrieves a cached payload by key.
    ///
    /// Returns None if the key is unknown or expired; expired entries are
    /// removed as a side effect. A live read refreshes the key's LRU position.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired(self.ttl_ms, self.negative_ttl_ms) => {
                self.purge(key);
                self.stats.record_expiration();
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
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

    // == Set ==
    /// Stores a payload under a key, evicting the least recently used entries
    /// if the cache is at capacity.
    ///
    /// Overwriting an existing key refreshes its timestamp and LRU position
    /// without changing the cache size.
    ///
    /// # Arguments
    /// * `key` - Request URL the payload was fetched from
    /// * `value` - Decoded response payload
    /// * `negative` - Marks an empty/no-data result, which expires faster
    pub fn set(&mut self, key: String, value: Value, negative: bool) {
        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.max_entries {
                match self.lru.evict_oldest() {
                    Some(evicted) => {
                        self.entries.remove(&evicted);
                        self.stats.record_eviction();
                    }
                    // Tracker and map hold the same keys, so this is unreachable
                    None => break,
                }
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, negative));
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Has ==
    /// Checks whether a live (unexpired) entry exists for the key.
    ///
    /// Performs the same expiry check as `get`, including purging an expired
    /// entry and refreshing the LRU position of a live one, but does not
    /// count toward hit/miss statistics.
    pub fn has(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired(self.ttl_ms, self.negative_ttl_ms) => {
                self.purge(key);
                self.stats.record_expiration();
                false
            }
            Some(_) => {
                self.lru.touch(key);
                true
            }
            None => false,
        }
    }

    // == Delete ==
    /// Removes an entry and its LRU tracking. No-op if the key is absent.
    pub fn delete(&mut self, key: &str) {
        self.purge(key);
    }

    // == Clear ==
    /// Empties the store and LRU tracking. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the backing store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Purge ==
    /// Removes an entry from both the store and the LRU tracker.
    fn purge(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MS, DEFAULT_NEGATIVE_TTL_MS)
    }
}
