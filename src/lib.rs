//! leaguecache - Client-side data access layer for TheSportsDB
//!
//! Fetches the league catalog, caches responses with TTL and LRU eviction,
//! coalesces concurrent requests for the same resource, and prefetches
//! season badges in paced concurrent batches with cancellation support.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod prefetch;

pub use client::{HttpTransport, RequestClient, Transport};
pub use config::Config;
pub use error::{ApiError, Result};
pub use prefetch::PrefetchEngine;
