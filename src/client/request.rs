//! Request Client Module
//!
//! Wraps a single logical GET: consults the response cache, coalesces
//! concurrent identical requests, applies a timeout independent of any
//! caller-supplied cancellation, and normalizes all failures into `ApiError`.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::ResponseCache;
use crate::client::inflight::{FlightOutcome, FlightRole, InFlightRegistry};
use crate::client::transport::Transport;
use crate::config::Config;
use crate::error::{ApiError, Result};

// == Request Client ==
/// Cached, coalescing GET client.
///
/// Cloning is cheap and every clone shares the same cache and in-flight
/// registry; construct one per process to get process-wide response sharing.
#[derive(Clone)]
pub struct RequestClient {
    /// Shared response cache
    cache: Arc<RwLock<ResponseCache>>,
    /// Pending requests, keyed by URL
    inflight: Arc<InFlightRegistry>,
    /// HTTP primitive
    transport: Arc<dyn Transport>,
    /// Per-request deadline, always active
    timeout: Duration,
}

impl RequestClient {
    // == Constructor ==
    /// Creates a new RequestClient over the given transport.
    ///
    /// # Arguments
    /// * `transport` - HTTP primitive performing the actual GETs
    /// * `config` - Cache capacity, TTLs and request timeout
    pub fn new(transport: Arc<dyn Transport>, config: &Config) -> Self {
        let cache = ResponseCache::new(config.max_entries, config.ttl_ms, config.negative_ttl_ms);
        Self {
            cache: Arc::new(RwLock::new(cache)),
            inflight: Arc::new(InFlightRegistry::new()),
            transport,
            timeout: Duration::from_millis(config.request_timeout_ms),
        }
    }

    /// Shared handle to the response cache, for inspection and explicit clears.
    pub fn cache(&self) -> &Arc<RwLock<ResponseCache>> {
        &self.cache
    }

    // == Get (typed) ==
    /// Fetches `url` and decodes the payload into `T`.
    ///
    /// See [`RequestClient::get_json`] for the caching, coalescing and
    /// cancellation semantics.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<T> {
        let value = self.get_json(url, cancel).await?;
        serde_json::from_value(value)
            .map_err(|e| ApiError::Unknown(format!("payload shape mismatch: {e}")))
    }

    // == Get (raw JSON) ==
    /// Fetches `url`, returning the cached payload when one is live.
    ///
    /// A cache hit short-circuits everything, including an already-fired
    /// `cancel` token. On a miss, concurrent callers for the same URL share a
    /// single transport call and all observe its outcome. The transport call
    /// races the client timeout against the caller's cancellation: the caller
    /// signal yields `Cancelled`, the internal timer `Timeout`.
    ///
    /// Successful payloads are cached under `url`; empty payloads are stored
    /// as negative entries so repeated futile lookups stay cheap. Failures
    /// are never cached, and the in-flight registration is removed on every
    /// outcome path.
    pub async fn get_json(
        &self,
        url: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Value> {
        if let Some(hit) = self.cache.write().await.get(url) {
            debug!(url, "cache hit");
            return Ok(hit);
        }

        match self.inflight.begin(url) {
            FlightRole::Follower(mut rx) => {
                debug!(url, "coalescing onto in-flight request");
                match cancel {
                    Some(token) => tokio::select! {
                        _ = token.cancelled() => Err(ApiError::Cancelled),
                        res = rx.recv() => recv_outcome(res),
                    },
                    None => recv_outcome(rx.recv().await),
                }
            }
            FlightRole::Leader => {
                let outcome = self.perform(url, cancel).await;
                self.inflight.settle(url, &outcome);
                outcome
            }
        }
    }

    // == Perform ==
    /// Issues the transport call for a cache miss, racing the caller's
    /// cancellation (if any) against the client timeout, and stores a
    /// successful payload in the cache.
    async fn perform(&self, url: &str, cancel: Option<&CancellationToken>) -> Result<Value> {
        // A fresh token never fires, so uncancellable callers share the path
        let caller = cancel.cloned().unwrap_or_default();

        tokio::select! {
            _ = caller.cancelled() => {
                debug!(url, "request cancelled by caller");
                Err(ApiError::Cancelled)
            }
            raced = tokio::time::timeout(self.timeout, self.transport.fetch(url)) => {
                match raced {
                    Err(_) => {
                        debug!(url, timeout_ms = self.timeout.as_millis() as u64, "request timed out");
                        Err(ApiError::Timeout)
                    }
                    Ok(Err(err)) => Err(err),
                    Ok(Ok(raw)) if !raw.is_success() => {
                        debug!(url, status = raw.status, "upstream returned error status");
                        Err(ApiError::Http(raw.status))
                    }
                    Ok(Ok(raw)) => {
                        let value: Value = serde_json::from_str(&raw.body)
                            .map_err(|e| ApiError::Unknown(format!("invalid JSON payload: {e}")))?;
                        let negative = is_empty_payload(&value);
                        self.cache
                            .write()
                            .await
                            .set(url.to_string(), value.clone(), negative);
                        debug!(url, negative, "response cached");
                        Ok(value)
                    }
                }
            }
        }
    }
}

// == Helper Functions ==
/// Flattens a broadcast receive into the shared request outcome.
fn recv_outcome(
    res: std::result::Result<FlightOutcome, broadcast::error::RecvError>,
) -> Result<Value> {
    match res {
        Ok(outcome) => outcome,
        Err(_) => Err(ApiError::Unknown(
            "in-flight request settled without a result".to_string(),
        )),
    }
}

/// Classifies a decoded payload as "no data".
///
/// The upstream wraps collections as `{ "items": [...] | null }`, so an
/// object counts as empty when every field is null or an empty array.
fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields
            .values()
            .all(|v| matches!(v, Value::Null) || matches!(v, Value::Array(a) if a.is_empty())),
        _ => false,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transport::RawResponse;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // == Empty Payload Classification ==

    #[test]
    fn test_empty_payload_null_and_empty_collections() {
        assert!(is_empty_payload(&json!(null)));
        assert!(is_empty_payload(&json!([])));
        assert!(is_empty_payload(&json!({})));
        assert!(is_empty_payload(&json!({ "seasons": null })));
        assert!(is_empty_payload(&json!({ "seasons": [] })));
        assert!(is_empty_payload(&json!({ "leagues": null, "extra": [] })));
    }

    #[test]
    fn test_non_empty_payload() {
        assert!(!is_empty_payload(&json!({ "seasons": [{ "strSeason": "2024" }] })));
        assert!(!is_empty_payload(&json!({ "leagues": null, "seasons": [1] })));
        assert!(!is_empty_payload(&json!([1, 2])));
        assert!(!is_empty_payload(&json!("text")));
        assert!(!is_empty_payload(&json!(42)));
    }

    // == Scripted Transport ==

    struct ScriptedTransport {
        calls: AtomicUsize,
        delay: Duration,
        reply: RawResponse,
    }

    impl ScriptedTransport {
        fn new(status: u16, body: &str, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay,
                reply: RawResponse { status, body: body.to_string() },
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn fetch(&self, _url: &str) -> Result<RawResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(self.reply.clone())
        }
    }

    fn client_over(transport: Arc<ScriptedTransport>) -> RequestClient {
        RequestClient::new(transport, &Config::default())
    }

    // == Behavior Tests ==

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_gets_share_one_transport_call() {
        let transport = ScriptedTransport::new(200, r#"{"leagues":[1]}"#, Duration::from_millis(50));
        let client = client_over(transport.clone());

        let (a, b) = tokio::join!(
            client.get_json("/api/leagues", None),
            client.get_json("/api/leagues", None),
        );

        assert_eq!(a.unwrap(), json!({"leagues": [1]}));
        assert_eq!(b.unwrap(), json!({"leagues": [1]}));
        assert_eq!(transport.calls(), 1, "coalesced callers must share one call");
    }

    #[tokio::test(start_paused = true)]
    async fn test_followers_observe_shared_failure() {
        let transport = ScriptedTransport::new(503, "oops", Duration::from_millis(50));
        let client = client_over(transport.clone());

        let (a, b) = tokio::join!(
            client.get_json("/api/leagues", None),
            client.get_json("/api/leagues", None),
        );

        assert_eq!(a, Err(ApiError::Http(503)));
        assert_eq!(b, Err(ApiError::Http(503)));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fires_before_slow_transport() {
        let transport = ScriptedTransport::new(200, "{}", Duration::from_secs(60));
        let client = client_over(transport.clone());

        let outcome = client.get_json("/api/slow", None).await;

        assert_eq!(outcome, Err(ApiError::Timeout));
        // The failed flight is cleared, so a retry issues a fresh call
        let retry = client.get_json("/api/slow", None).await;
        assert_eq!(retry, Err(ApiError::Timeout));
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_caller_cancellation_beats_timeout() {
        let transport = ScriptedTransport::new(200, "{}", Duration::from_secs(60));
        let client = client_over(transport);

        let token = CancellationToken::new();
        let pending = client.get_json("/api/slow", Some(&token));
        tokio::pin!(pending);

        tokio::select! {
            _ = &mut pending => panic!("request should still be pending"),
            _ = tokio::time::sleep(Duration::from_millis(10)) => token.cancel(),
        }

        assert_eq!(pending.await, Err(ApiError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_hit_ignores_fired_cancellation() {
        let transport = ScriptedTransport::new(200, r#"{"leagues":[1]}"#, Duration::ZERO);
        let client = client_over(transport.clone());

        client.get_json("/api/leagues", None).await.unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let hit = client.get_json("/api/leagues", Some(&token)).await;

        assert_eq!(hit.unwrap(), json!({"leagues": [1]}));
        assert_eq!(transport.calls(), 1, "cache hit must not touch the transport");
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_outcomes_are_not_cached() {
        let transport = ScriptedTransport::new(404, "missing", Duration::ZERO);
        let client = client_over(transport.clone());

        assert_eq!(client.get_json("/api/gone", None).await, Err(ApiError::Http(404)));
        assert_eq!(client.get_json("/api/gone", None).await, Err(ApiError::Http(404)));

        assert_eq!(transport.calls(), 2, "failures must not be served from cache");
        assert_eq!(client.cache().read().await.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_payload_is_cached_negative() {
        let transport = ScriptedTransport::new(200, r#"{"seasons":null}"#, Duration::ZERO);
        let client = client_over(transport.clone());

        let first = client.get_json("/api/seasons?id=1", None).await.unwrap();
        assert_eq!(first, json!({"seasons": null}));

        // Second call is served by the negative entry
        client.get_json("/api/seasons?id=1", None).await.unwrap();
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_json_maps_to_unknown() {
        let transport = ScriptedTransport::new(200, "not json", Duration::ZERO);
        let client = client_over(transport);

        let outcome = client.get_json("/api/broken", None).await;
        assert!(matches!(outcome, Err(ApiError::Unknown(_))));
    }
}
