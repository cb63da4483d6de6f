//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_NEGATIVE_TTL_MS, DEFAULT_TTL_MS};
use crate::client::DEFAULT_REQUEST_TIMEOUT_MS;
use crate::prefetch::{DEFAULT_BATCH_DELAY_MS, DEFAULT_BATCH_SIZE};

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of TheSportsDB JSON API
    pub base_url: String,
    /// API key injected into request paths (free tier uses "123")
    pub api_key: String,
    /// Maximum number of entries the response cache can hold
    pub max_entries: usize,
    /// TTL in milliseconds for positive cache entries
    pub ttl_ms: u64,
    /// TTL in milliseconds for negative (empty-result) cache entries
    pub negative_ttl_ms: u64,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Number of badge fetches issued concurrently per batch
    pub batch_size: usize,
    /// Pacing delay in milliseconds between prefetch batches
    pub batch_delay_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SPORTSDB_BASE_URL` - API base URL (default: https://www.thesportsdb.com/api/v1/json)
    /// - `SPORTSDB_API_KEY` - API key (default: 123, the free tier key)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 500)
    /// - `CACHE_TTL_MS` - Positive entry TTL in ms (default: 300000)
    /// - `CACHE_NEGATIVE_TTL_MS` - Negative entry TTL in ms (default: 30000)
    /// - `REQUEST_TIMEOUT_MS` - Request timeout in ms (default: 10000)
    /// - `PREFETCH_BATCH_SIZE` - Concurrent fetches per batch (default: 5)
    /// - `PREFETCH_BATCH_DELAY_MS` - Delay between batches in ms (default: 100)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("SPORTSDB_BASE_URL").unwrap_or(defaults.base_url),
            api_key: env::var("SPORTSDB_API_KEY").unwrap_or(defaults.api_key),
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            ttl_ms: env::var("CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_ms),
            negative_ttl_ms: env::var("CACHE_NEGATIVE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.negative_ttl_ms),
            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            batch_size: env::var("PREFETCH_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.batch_size),
            batch_delay_ms: env::var("PREFETCH_BATCH_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.batch_delay_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://www.thesportsdb.com/api/v1/json".to_string(),
            api_key: "123".to_string(),
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl_ms: DEFAULT_TTL_MS,
            negative_ttl_ms: DEFAULT_NEGATIVE_TTL_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay_ms: DEFAULT_BATCH_DELAY_MS,
        }
    }
}
