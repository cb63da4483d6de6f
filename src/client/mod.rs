//! Client Module
//!
//! Cached, coalescing HTTP GET client for the upstream API.
//!
//! Request flow: cache lookup -> in-flight coalescing -> transport call with
//! timeout and cancellation -> error normalization -> cache store.

mod inflight;
mod request;
mod transport;

// Re-export public types
pub use inflight::{FlightRole, InFlightRegistry};
pub use request::RequestClient;
pub use transport::{HttpTransport, RawResponse, Transport};

// == Public Constants ==
/// Default per-request timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
