//! Prefetch Module
//!
//! Batched-concurrency badge prefetching with cancellation and per-league
//! fetch status tracking.

mod engine;

pub use engine::{BadgeEntry, BadgeStatus, PrefetchEngine};

// == Public Constants ==
/// Default number of badge fetches issued concurrently per batch
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Default pacing delay between batches in milliseconds
pub const DEFAULT_BATCH_DELAY_MS: u64 = 100;
