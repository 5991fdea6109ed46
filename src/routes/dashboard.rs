use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{ChartPayload, SeriesChart, WindowChoice};
use crate::services::dashboard_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:farm_id", get(get_dashboard))
}

pub fn farms_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_farms))
        .route("/:farm_id/series", get(get_series_chart))
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    /// last_week | last_month | last_six_months | last_year (default: last_month)
    #[serde(default)]
    window: WindowChoice,

    /// Instant the window ends at; the configured anchor or now when omitted
    anchor: Option<String>,
}

/// Both charts for one farm in a single payload
///
/// # Example
/// ```text
/// GET /api/dashboard/HDWF2?window=last_week&anchor=2020-02-01T00:00:00
/// ```
pub async fn get_dashboard(
    Path(farm_id): Path<String>,
    Query(query): Query<WindowQuery>,
    State(state): State<AppState>,
) -> Result<Json<ChartPayload>, AppError> {
    info!("GET /dashboard/{} - window={:?}", farm_id, query.window);
    let payload = dashboard_service::dashboard(&state, &farm_id, query.window, query.anchor.as_deref())
        .await
        .map_err(|e| {
            error!("Failed to build dashboard for {}: {}", farm_id, e);
            e
        })?;
    Ok(Json(payload))
}

pub async fn get_series_chart(
    Path(farm_id): Path<String>,
    Query(query): Query<WindowQuery>,
    State(state): State<AppState>,
) -> Result<Json<SeriesChart>, AppError> {
    info!("GET /farms/{}/series - window={:?}", farm_id, query.window);
    let chart = dashboard_service::series_chart(&state, &farm_id, query.window, query.anchor.as_deref())
        .await
        .map_err(|e| {
            error!("Failed to build series chart for {}: {}", farm_id, e);
            e
        })?;
    Ok(Json(chart))
}

pub async fn list_farms(State(state): State<AppState>) -> Json<Vec<String>> {
    info!("GET /farms - Listing farms with predictions");
    Json(state.config.predicted_farms.clone())
}
