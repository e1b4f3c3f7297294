// HTTP request handlers
use crate::domain::metric::MetricKey;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard snapshot
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.aggregator.snapshot())
}

/// Per-metric loading flags and error slots
pub async fn get_dashboard_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.aggregator.metric_statuses())
}

/// Full refresh: fan out to every metric and report the outcome
pub async fn refresh_all(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.aggregator.fetch_all().await)
}

/// Targeted refresh of a single metric
pub async fn refresh_metric(
    Path(metric): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match metric.parse::<MetricKey>() {
        Ok(key) => Json(state.aggregator.refresh_metric(key).await).into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}
