//! Cache Entry Module
//!
//! Defines the structure for individual cached responses.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A single cached response payload with storage metadata.
///
/// Entries do not carry their own expiry deadline; the owning store applies
/// the positive or negative TTL at read time, so TTL reconfiguration never
/// requires rewriting existing entries.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The decoded response payload
    pub value: Value,
    /// Storage timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Negative entries represent "no data" results and expire faster
    pub negative: bool,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(value: Value, negative: bool) -> Self {
        Self {
            value,
            stored_at: current_timestamp_ms(),
            negative,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was stored.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.stored_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived its applicable TTL.
    ///
    /// Boundary condition: an entry is visible while `age <= ttl` and expired
    /// once the age strictly exceeds it.
    ///
    /// # Arguments
    /// * `ttl_ms` - TTL applied to positive entries
    /// * `negative_ttl_ms` - TTL applied to negative entries
    pub fn is_expired(&self, ttl_ms: u64, negative_ttl_ms: u64) -> bool {
        let applicable = if self.negative { negative_ttl_ms } else { ttl_ms };
        self.age_ms() > applicable
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
