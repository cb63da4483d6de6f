//! Endpoints Module
//!
//! Builds upstream request URLs with the API key injected into the path,
//! matching TheSportsDB's `{base}/{key}/{resource}` scheme.

use crate::config::Config;

// == Endpoints ==
/// Upstream URL catalog.
///
/// URLs double as cache and coalescing keys, so each resource must format to
/// a distinct string; the two resources here never collide.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// `{base_url}/{api_key}`, precomputed
    root: String,
}

impl Endpoints {
    // == Constructor ==
    /// Creates the endpoint catalog from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            root: format!("{}/{}", config.base_url.trim_end_matches('/'), config.api_key),
        }
    }

    // == All Leagues ==
    /// URL of the full league catalog.
    pub fn all_leagues(&self) -> String {
        format!("{}/all_leagues.php", self.root)
    }

    // == Season Badges ==
    /// URL of the season badge lookup for one league.
    pub fn season_badges(&self, league_id: &str) -> String {
        format!("{}/search_all_seasons.php?badge=1&id={}", self.root, league_id)
    }
}
