//! League Models
//!
//! Payload shapes for TheSportsDB's league catalog and season badge lookups.
//! The upstream wraps every collection in an object whose list field may be
//! null instead of empty.

use serde::{Deserialize, Serialize};

// == League ==
/// One league from the `all_leagues.php` catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    /// Upstream league identifier, used for season badge lookups
    #[serde(rename = "idLeague")]
    pub id: String,
    /// Display name
    #[serde(rename = "strLeague")]
    pub name: String,
    /// Sport the league belongs to
    #[serde(rename = "strSport")]
    pub sport: String,
    /// Alternate name, often absent
    #[serde(rename = "strLeagueAlternate")]
    pub alternate_name: Option<String>,
}

/// Response wrapper for the league catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaguesResponse {
    pub leagues: Option<Vec<League>>,
}

// == Season Badge ==
/// One season entry from the badge lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonBadge {
    /// Season label, e.g. "2023-2024"
    #[serde(rename = "strSeason")]
    pub season: String,
    /// Badge image URL; may be absent for seasons without artwork
    #[serde(rename = "strBadge")]
    pub badge_url: Option<String>,
}

impl SeasonBadge {
    /// True when the season carries a usable badge image.
    pub fn has_badge(&self) -> bool {
        self.badge_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Response wrapper for the season badge endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonsResponse {
    pub seasons: Option<Vec<SeasonBadge>>,
}
