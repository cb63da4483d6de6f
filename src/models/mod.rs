//! Models Module
//!
//! Serde shapes for the upstream API payloads.

mod league;

pub use league::{League, LeaguesResponse, SeasonBadge, SeasonsResponse};
