use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{MapChart, WindowChoice, WindowOption};
use crate::services::dashboard_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/map", get(get_map_chart))
}

pub fn windows_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_windows))
}

pub fn cache_router() -> Router<AppState> {
    Router::new()
        .route("/invalidate", post(invalidate_cache))
}

#[derive(Debug, Deserialize)]
pub struct MapQuery {
    /// IANA zone for the "last update" label (default: configured reference zone)
    tz: Option<String>,
}

pub async fn get_map_chart(
    Query(query): Query<MapQuery>,
    State(state): State<AppState>,
) -> Result<Json<MapChart>, AppError> {
    info!("GET /fleet/map - tz={:?}", query.tz);
    let chart = dashboard_service::map_chart(&state, query.tz.as_deref())
        .await
        .map_err(|e| {
            error!("Failed to build fleet map: {}", e);
            e
        })?;
    Ok(Json(chart))
}

pub async fn list_windows(State(state): State<AppState>) -> Json<Vec<WindowOption>> {
    info!("GET /windows - Listing window choices");
    let options = WindowChoice::ALL
        .iter()
        .map(|choice| WindowOption {
            choice: *choice,
            label: choice.label(),
            days: state.config.windows.length_days(*choice),
        })
        .collect();
    Json(options)
}

pub async fn invalidate_cache(State(state): State<AppState>) -> StatusCode {
    info!(
        "POST /cache/invalidate - Dropping {} series and {} fleet entries",
        state.cache.series.len(),
        state.cache.fleet.len()
    );
    state.cache.clear();
    StatusCode::NO_CONTENT
}
