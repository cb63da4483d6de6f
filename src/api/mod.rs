//! API Module
//!
//! Endpoint catalog and typed fetchers over `RequestClient`.
//!
//! # Endpoints
//! - `all_leagues.php` - full league catalog
//! - `search_all_seasons.php?badge=1&id={league}` - season badges for one league

mod endpoints;
mod leagues;

pub use endpoints::Endpoints;
pub use leagues::{extract_sport_types, fetch_all_leagues, fetch_season_badge};
