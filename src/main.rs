//! leaguecache demo binary
//!
//! Fetches the league catalog, summarizes it by sport, then prefetches
//! season badges for the first page of leagues and reports their status.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leaguecache::api::{extract_sport_types, fetch_all_leagues, Endpoints};
use leaguecache::prefetch::BadgeStatus;
use leaguecache::{Config, HttpTransport, PrefetchEngine, RequestClient};

/// Number of leagues whose badges the demo prefetches.
const DEMO_PREFETCH_COUNT: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leaguecache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting leaguecache demo");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, ttl_ms={}, batch_size={}, batch_delay_ms={}",
        config.max_entries, config.ttl_ms, config.batch_size, config.batch_delay_ms
    );

    let transport = Arc::new(HttpTransport::new()?);
    let client = RequestClient::new(transport, &config);
    let endpoints = Endpoints::new(&config);
    let engine = PrefetchEngine::new(client.clone(), endpoints.clone(), &config);

    // Fetch the catalog
    let leagues = fetch_all_leagues(&client, &endpoints, None).await?;
    let sports = extract_sport_types(&leagues);
    info!("Fetched {} leagues across {} sports", leagues.len(), sports.len());

    // Prefetch badges for the first page of leagues
    let page: Vec<String> = leagues
        .iter()
        .take(DEMO_PREFETCH_COUNT)
        .map(|league| league.id.clone())
        .collect();
    engine.prefetch(&page).await;

    for league in leagues.iter().take(DEMO_PREFETCH_COUNT) {
        let status = engine.entry(&league.id).map(|entry| entry.status);
        let badge = engine.badge(&league.id);
        match (status, badge) {
            (Some(BadgeStatus::Success), Some(badge)) => {
                println!("{:40} [{}] {}", league.name, badge.season, badge.badge_url.unwrap_or_default());
            }
            (Some(BadgeStatus::Success), None) => {
                println!("{:40} no badge artwork", league.name);
            }
            (Some(status), _) => println!("{:40} {:?}", league.name, status),
            (None, _) => println!("{:40} not requested", league.name),
        }
    }

    let stats = client.cache().read().await.stats();
    info!(
        "Cache: {} entries, {} hits, {} misses, hit rate {:.0}%",
        stats.total_entries,
        stats.hits,
        stats.misses,
        stats.hit_rate() * 100.0
    );

    Ok(())
}
