//! Anime Gateway
//!
//! A caching HTTP gateway in front of two anime data providers:
//! - A video catalog service (search, details, episodes, downloads, listings)
//! - AniList GraphQL (recommendations, upcoming and trending titles)

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::cache::SystemClock;
use infrastructure::{
    analytics::{InMemoryViewCounter, TracingErrorRecorder},
    cache::InMemoryCacheStore,
    services::AnimeService,
    upstream::{AnilistSource, HttpCatalogSource, HttpClient},
};
use tracing::info;

/// Create the application state with default configuration
pub fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state with custom configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let upstream = &config.upstream;
    let timeout = Duration::from_secs(upstream.timeout_secs);

    let catalog_client = HttpClient::with_options("catalog", timeout, &upstream.user_agent)?;
    let anilist_client = HttpClient::with_options("anilist", timeout, &upstream.user_agent)?;

    let catalog = HttpCatalogSource::new(Arc::new(catalog_client), &upstream.catalog_base_url);
    let metadata = AnilistSource::new(Arc::new(anilist_client), &upstream.metadata_base_url);

    info!(
        catalog = %upstream.catalog_base_url,
        metadata = %upstream.metadata_base_url,
        "Upstream providers configured"
    );

    let anime_service = AnimeService::new(
        Arc::new(InMemoryCacheStore::new()),
        Arc::new(SystemClock),
        Arc::new(catalog),
        Arc::new(metadata),
    )
    .with_popular_page_size(upstream.popular_page_size);

    Ok(AppState::new(
        Arc::new(anime_service),
        Arc::new(InMemoryViewCounter::new()),
        Arc::new(TracingErrorRecorder::new()),
    ))
}
