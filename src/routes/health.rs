use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/cache", get(cache_status))
}

async fn health() -> &'static str {
    info!("GET /health - Health check");
    "OK"
}

#[derive(Debug, Serialize)]
struct CacheStatus {
    series_entries: usize,
    fleet_entries: usize,
    fleet_feed: String,
}

async fn cache_status(State(state): State<AppState>) -> Json<CacheStatus> {
    info!("GET /health/cache - Cache status");
    state.cache.series.cleanup_expired();
    state.cache.fleet.cleanup_expired();
    Json(CacheStatus {
        series_entries: state.cache.series.len(),
        fleet_entries: state.cache.fleet.len(),
        fleet_feed: state.fleet_source.cache_key().to_string(),
    })
}
