//! Leagues API
//!
//! Typed fetchers for the league catalog and season badges.

use tokio_util::sync::CancellationToken;

use crate::api::Endpoints;
use crate::client::RequestClient;
use crate::error::Result;
use crate::models::{League, LeaguesResponse, SeasonBadge, SeasonsResponse};

// == Fetch All Leagues ==
/// Fetches the full league catalog.
///
/// The upstream returns `{ "leagues": null }` on an empty catalog; that maps
/// to an empty vec, not an error. Results are sorted by sport, then league
/// name, for stable presentation ordering.
pub async fn fetch_all_leagues(
    client: &RequestClient,
    endpoints: &Endpoints,
    cancel: Option<&CancellationToken>,
) -> Result<Vec<League>> {
    let response: LeaguesResponse = client.get(&endpoints.all_leagues(), cancel).await?;
    let mut leagues = response.leagues.unwrap_or_default();
    sort_leagues(&mut leagues);
    Ok(leagues)
}

/// Sorts leagues by sport, then by league name.
fn sort_leagues(leagues: &mut [League]) {
    leagues.sort_by(|a, b| a.sport.cmp(&b.sport).then_with(|| a.name.cmp(&b.name)));
}

// == Fetch Season Badge ==
/// Fetches the most recent season badge for a league.
///
/// Seasons arrive oldest-first; the pick scans from the end for the first
/// season carrying a usable badge URL. `Ok(None)` means the league has no
/// badge artwork at all, which is a valid (and negatively cached) outcome.
pub async fn fetch_season_badge(
    client: &RequestClient,
    endpoints: &Endpoints,
    league_id: &str,
    cancel: Option<&CancellationToken>,
) -> Result<Option<SeasonBadge>> {
    let url = endpoints.season_badges(league_id);
    let response: SeasonsResponse = client.get(&url, cancel).await?;
    Ok(most_recent_badge(response.seasons.unwrap_or_default()))
}

/// Picks the most recent season with a usable badge, scanning from the end.
fn most_recent_badge(seasons: Vec<SeasonBadge>) -> Option<SeasonBadge> {
    seasons.into_iter().rev().find(SeasonBadge::has_badge)
}

// == Extract Sport Types ==
/// Unique sport names across the catalog, sorted alphabetically.
pub fn extract_sport_types(leagues: &[League]) -> Vec<String> {
    let mut sports: Vec<String> = leagues
        .iter()
        .map(|league| league.sport.clone())
        .filter(|sport| !sport.is_empty())
        .collect();
    sports.sort();
    sports.dedup();
    sports
}
