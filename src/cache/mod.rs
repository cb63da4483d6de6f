//! Cache Module
//!
//! Provides in-memory response caching with TTL expiration, negative entries
//! and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::ResponseCache;

// == Public Constants ==
/// Default maximum number of cached responses
pub const DEFAULT_MAX_ENTRIES: usize = 500;

/// Default TTL for positive entries in milliseconds (5 minutes)
pub const DEFAULT_TTL_MS: u64 = 300_000;

/// Default TTL for negative entries in milliseconds (30 seconds)
pub const DEFAULT_NEGATIVE_TTL_MS: u64 = 30_000;
