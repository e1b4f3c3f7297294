// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardAggregator;
use crate::infrastructure::config::load_portal_config;
use crate::infrastructure::http_repository::HttpPortalRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_dashboard_status, health_check, refresh_all, refresh_metric,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = load_portal_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpPortalRepository::new(
        config.api.base_url,
        config.api.token,
        Duration::from_secs(config.api.timeout_secs),
    )?);

    // Create the aggregator (application layer)
    let aggregator = Arc::new(DashboardAggregator::new(repository));

    // Warm the snapshot before serving. Sections whose source is down
    // keep their zeroed defaults until a retry succeeds.
    let outcome = aggregator.fetch_all().await;
    if !outcome.success {
        tracing::warn!("initial dashboard refresh incomplete: {:?}", outcome.errors);
    }

    let state = Arc::new(AppState { aggregator });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/status", get(get_dashboard_status))
        .route("/dashboard/refresh", post(refresh_all))
        .route("/dashboard/refresh/:metric", post(refresh_metric))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.listen.parse()?;
    tracing::info!("Starting commerce-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
