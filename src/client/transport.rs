//! Transport Module
//!
//! The HTTP primitive behind `RequestClient`. Kept behind a trait so tests
//! can substitute a scripted transport and count upstream calls.

use async_trait::async_trait;

use crate::error::{ApiError, Result};

// == Raw Response ==
/// Status and body of a completed HTTP exchange, before decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body text
    pub body: String,
}

impl RawResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// == Transport Trait ==
/// Performs a single GET request.
///
/// Implementations must abort the underlying connection when the returned
/// future is dropped; `RequestClient` relies on this for cancellation and
/// timeout propagation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET for `url` and returns the raw status and body.
    ///
    /// Connection-level failures are reported as `ApiError::Network`;
    /// non-success HTTP statuses are returned in the `RawResponse`, not as
    /// errors.
    async fn fetch(&self, url: &str) -> Result<RawResponse>;
}

// == HTTP Transport ==
/// Production transport backed by `reqwest`.
///
/// No client-level timeout is configured; the deadline belongs to
/// `RequestClient`, which races the transport future against its own timer.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    // == Constructor ==
    /// Creates a new HTTP transport.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("leaguecache/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Unknown(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<RawResponse> {
        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
