//! Common test utilities
//!
//! A scripted transport with per-URL responses, optional latency and a call
//! log, so tests can count upstream calls and observe batch timing.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use leaguecache::client::{RawResponse, Transport};
use leaguecache::error::Result;

struct Scripted {
    reply: RawResponse,
    delay: Duration,
}

/// Transport stub returning canned responses.
///
/// Unknown URLs get a 404 so a missing script shows up as an `Http` error
/// instead of a hang.
#[derive(Default)]
pub struct StubTransport {
    scripts: Mutex<HashMap<String, Scripted>>,
    default_delay: Mutex<Duration>,
    calls: Mutex<Vec<(String, Instant)>>,
}

#[allow(dead_code)] // Used across multiple test crates
impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the latency applied to responses scripted after this call.
    pub fn set_delay(&self, delay: Duration) {
        *self.default_delay.lock() = delay;
    }

    /// Scripts a response for a URL with the current default latency.
    pub fn respond(&self, url: &str, status: u16, body: &str) {
        let delay = *self.default_delay.lock();
        self.respond_delayed(url, status, body, delay);
    }

    /// Scripts a response for a URL with an explicit latency.
    pub fn respond_delayed(&self, url: &str, status: u16, body: &str, delay: Duration) {
        self.scripts.lock().insert(
            url.to_string(),
            Scripted {
                reply: RawResponse { status, body: body.to_string() },
                delay,
            },
        );
    }

    /// All calls made so far, in order, with their start instants.
    pub fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().clone()
    }

    /// Total number of transport calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Number of transport calls for one URL.
    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().iter().filter(|(u, _)| u == url).count()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn fetch(&self, url: &str) -> Result<RawResponse> {
        self.calls.lock().push((url.to_string(), Instant::now()));

        let scripted = {
            let scripts = self.scripts.lock();
            scripts.get(url).map(|s| (s.reply.clone(), s.delay))
        };

        match scripted {
            Some((reply, delay)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(reply)
            }
            None => Ok(RawResponse { status: 404, body: "unscripted".to_string() }),
        }
    }
}
