//! Prefetch Engine Module
//!
//! Fetches season badges for many leagues in fixed-size concurrent batches,
//! paced between batches to stay inside the upstream's informal rate limits,
//! with run-wide cancellation and per-league status tracking.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{fetch_season_badge, Endpoints};
use crate::client::RequestClient;
use crate::config::Config;
use crate::models::SeasonBadge;

// == Badge Status ==
/// Per-league fetch state machine: `Idle -> Loading -> {Success | Error}`.
///
/// `Error` is terminal until an explicit retry; a cancellation observed while
/// `Loading` resets to `Idle` so the league stays eligible for a later run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStatus {
    /// Never fetched, or reset after cancellation
    Idle,
    /// A fetch is in flight
    Loading,
    /// Fetch settled; the badge may still be absent
    Success,
    /// Fetch failed; waiting for an explicit retry
    Error,
}

// == Badge Entry ==
/// Fetch status and result for one league.
#[derive(Debug, Clone)]
pub struct BadgeEntry {
    pub status: BadgeStatus,
    pub badge: Option<SeasonBadge>,
}

impl BadgeEntry {
    fn with_status(status: BadgeStatus) -> Self {
        Self { status, badge: None }
    }
}

// == Prefetch Engine ==
/// Batched badge prefetcher.
///
/// Clones share the status map and the running prefetch's cancellation
/// token, so one engine per process memoizes badge work across all callers.
/// Entries are created only by the engine's own fetch routine; an absent
/// entry means the league was never requested.
#[derive(Clone)]
pub struct PrefetchEngine {
    /// Request client used for badge lookups
    client: RequestClient,
    /// Upstream URL catalog
    endpoints: Endpoints,
    /// Per-league fetch state, shared across clones
    badges: Arc<Mutex<HashMap<String, BadgeEntry>>>,
    /// Cancellation token of the currently running prefetch, if any
    run_token: Arc<Mutex<Option<CancellationToken>>>,
    /// Fetches issued concurrently per batch
    batch_size: usize,
    /// Pacing delay between batches
    batch_delay: Duration,
}

impl PrefetchEngine {
    // == Constructor ==
    /// Creates a new engine over the given client.
    ///
    /// # Arguments
    /// * `client` - Shared request client (brings the cache along)
    /// * `endpoints` - Upstream URL catalog
    /// * `config` - Batch size and pacing delay
    pub fn new(client: RequestClient, endpoints: Endpoints, config: &Config) -> Self {
        Self {
            client,
            endpoints,
            badges: Arc::new(Mutex::new(HashMap::new())),
            run_token: Arc::new(Mutex::new(None)),
            batch_size: config.batch_size.max(1),
            batch_delay: Duration::from_millis(config.batch_delay_ms),
        }
    }

    // == Prefetch ==
    /// Prefetches badges for the given leagues in paced concurrent batches.
    ///
    /// Any previously running prefetch is cancelled first. Leagues that are
    /// already loading, succeeded or failed are skipped; only absent or
    /// `Idle` entries are scheduled. Within a batch all fetches run
    /// concurrently and the batch is joined before the next one starts;
    /// between batches the engine waits the pacing delay. If the run is
    /// cancelled, unscheduled leagues are simply never started.
    ///
    /// Individual failures never abort the run; they surface as per-league
    /// `Error` status.
    pub async fn prefetch(&self, league_ids: &[String]) {
        let token = self.replace_run_token();

        let to_fetch: Vec<String> = {
            let badges = self.badges.lock();
            league_ids
                .iter()
                .filter(|id| {
                    badges
                        .get(id.as_str())
                        .map_or(true, |entry| entry.status == BadgeStatus::Idle)
                })
                .cloned()
                .collect()
        };

        debug!(
            requested = league_ids.len(),
            scheduled = to_fetch.len(),
            batch_size = self.batch_size,
            "starting badge prefetch"
        );

        let total = to_fetch.len();
        for (index, batch) in to_fetch.chunks(self.batch_size).enumerate() {
            if token.is_cancelled() {
                debug!(batch = index, "prefetch cancelled; leaving remaining leagues idle");
                break;
            }

            // Explicit barrier: every fetch in the batch settles before the
            // next batch starts.
            join_all(batch.iter().map(|id| self.fetch_one(id, &token))).await;

            let more_remaining = (index + 1) * self.batch_size < total;
            if more_remaining && !token.is_cancelled() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }
    }

    // == Fetch One ==
    /// Fetches the badge for a single league and records the outcome.
    ///
    /// No-op when the league's status is anything but absent or `Idle`.
    /// Cancellation resets the league to `Idle`; any other failure marks it
    /// `Error`. A settled `Success` may carry no badge (league has no
    /// artwork); the empty upstream response is negatively cached by the
    /// client, so re-checking such a league stays cheap.
    async fn fetch_one(&self, league_id: &str, cancel: &CancellationToken) {
        {
            let mut badges = self.badges.lock();
            match badges.get(league_id) {
                Some(entry) if entry.status != BadgeStatus::Idle => return,
                _ => {
                    badges.insert(
                        league_id.to_string(),
                        BadgeEntry::with_status(BadgeStatus::Loading),
                    );
                }
            }
        }

        match fetch_season_badge(&self.client, &self.endpoints, league_id, Some(cancel)).await {
            Ok(badge) => {
                self.badges.lock().insert(
                    league_id.to_string(),
                    BadgeEntry { status: BadgeStatus::Success, badge },
                );
            }
            Err(err) if err.is_cancelled() => {
                debug!(league_id, "badge fetch cancelled; resetting to idle");
                self.badges.lock().insert(
                    league_id.to_string(),
                    BadgeEntry::with_status(BadgeStatus::Idle),
                );
            }
            Err(err) => {
                debug!(league_id, error = %err, "badge fetch failed");
                self.badges.lock().insert(
                    league_id.to_string(),
                    BadgeEntry::with_status(BadgeStatus::Error),
                );
            }
        }
    }

    // == Retry ==
    /// Re-runs the fetch for one league, bypassing the prefetch skip filter.
    ///
    /// The league is forced back to `Idle` first, so even a terminal `Error`
    /// gets a fresh attempt.
    pub async fn retry(&self, league_id: &str) {
        self.badges.lock().insert(
            league_id.to_string(),
            BadgeEntry::with_status(BadgeStatus::Idle),
        );
        // A retry is deliberate and single-shot; it is not tied to any
        // running prefetch, so it gets its own never-fired token.
        self.fetch_one(league_id, &CancellationToken::new()).await;
    }

    // == Cancel ==
    /// Cancels the currently running prefetch, if any. Idempotent.
    ///
    /// Leagues still `Loading` reset to `Idle` as their fetches observe the
    /// cancellation; already-settled leagues are untouched.
    pub fn cancel(&self) {
        if let Some(token) = self.run_token.lock().take() {
            debug!("cancelling running prefetch");
            token.cancel();
        }
    }

    // == Reads ==
    /// Returns the badge for a league, if one was fetched successfully.
    pub fn badge(&self, league_id: &str) -> Option<SeasonBadge> {
        self.badges
            .lock()
            .get(league_id)
            .and_then(|entry| entry.badge.clone())
    }

    /// Returns the full fetch entry for a league. Absent means never requested.
    pub fn entry(&self, league_id: &str) -> Option<BadgeEntry> {
        self.badges.lock().get(league_id).cloned()
    }

    // == Replace Run Token ==
    /// Cancels any previous run and installs a fresh token for the new one.
    fn replace_run_token(&self) -> CancellationToken {
        let mut slot = self.run_token.lock();
        if let Some(previous) = slot.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        *slot = Some(token.clone());
        token
    }
}
