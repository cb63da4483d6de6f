//! In-Flight Registry Module
//!
//! Tracks pending requests by URL so concurrent callers for the same resource
//! share one transport call (request coalescing).

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::Result;

/// Outcome broadcast to every caller waiting on one request.
pub type FlightOutcome = Result<Value>;

// == Flight Role ==
/// What a caller becomes after registering interest in a URL.
pub enum FlightRole {
    /// First caller: performs the transport call and must settle the flight
    Leader,
    /// Subsequent caller: awaits the leader's broadcast outcome
    Follower(broadcast::Receiver<FlightOutcome>),
}

// == In-Flight Registry ==
/// Registry of pending requests keyed by URL.
///
/// The lock is never held across an await point; registration and settlement
/// are single synchronous critical sections.
#[derive(Debug, Default)]
pub struct InFlightRegistry {
    pending: Mutex<HashMap<String, broadcast::Sender<FlightOutcome>>>,
}

impl InFlightRegistry {
    // == Constructor ==
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // == Begin ==
    /// Registers interest in `key`.
    ///
    /// The first caller for a key becomes the `Leader` and owes a matching
    /// `settle` call on every outcome path; later callers become `Follower`s
    /// subscribed to the leader's result.
    pub fn begin(&self, key: &str) -> FlightRole {
        let mut pending = self.pending.lock();
        if let Some(sender) = pending.get(key) {
            FlightRole::Follower(sender.subscribe())
        } else {
            let (sender, _) = broadcast::channel(1);
            pending.insert(key.to_string(), sender);
            FlightRole::Leader
        }
    }

    // == Settle ==
    /// Removes the registration for `key` and broadcasts the outcome to any
    /// followers. Removal is unconditional: success and failure both clear
    /// the entry so later calls are eligible to retry.
    pub fn settle(&self, key: &str, outcome: &FlightOutcome) {
        let sender = self.pending.lock().remove(key);
        if let Some(sender) = sender {
            // Send fails when no follower subscribed, which is fine
            let _ = sender.send(outcome.clone());
        }
    }

    // == Length ==
    /// Number of requests currently in flight.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
