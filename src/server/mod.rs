//! HTTP surface of the scoring service
//!
//! Two routes: `/api/dependencies_score` returns the JSON report and
//! `/badge.svg` returns an SVG badge for the aggregate score. Both take the
//! root module as a `url` query parameter and share one report cache, so a
//! badge request warms the report route and vice versa.

pub mod routes;

use crate::badge::BadgeClient;
use crate::config::ServerConfig;
use crate::graph::remote::RemoteGraphProvider;
use crate::score::cache::ReportCache;
use crate::score::registry::RegistryTable;
use crate::score::report::Scorer;
use anyhow::Context;
use routes::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// Builds the shared application state from configuration
pub fn build_state(config: &ServerConfig) -> AppState {
    let provider = Arc::new(RemoteGraphProvider::new(&config.graph_api));
    let registries = Arc::new(RegistryTable::default());
    let scorer = Arc::new(Scorer::new(provider, registries));

    AppState {
        cache: ReportCache::new(scorer, Duration::from_secs(config.cache_aging_secs)),
        badge: BadgeClient::default(),
    }
}

/// Binds the listener and serves requests until the process stops
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(build_state(&config));
    let app = routes::build_router(state);

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", config.addr))?;

    info!("deps-score server is running at {}", listener.local_addr()?);

    axum::serve(listener, app).await.map_err(anyhow::Error::msg)
}
