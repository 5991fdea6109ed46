use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{ChartPayload, Fleet, MapChart, SeriesChart, TimedRecord, WindowChoice, WindowSpec};
use crate::services::time_codec::parse_instant;
use crate::services::{chart_builder, fleet_selector, series_windower};
use crate::state::AppState;

fn farm_id_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").ok()).as_ref()
}

/// Checks the farm id is well formed and has predictions available.
pub fn validate_farm(state: &AppState, farm_id: &str) -> Result<(), AppError> {
    let well_formed = farm_id_pattern().is_some_and(|re| re.is_match(farm_id));
    if !well_formed {
        return Err(AppError::Validation(format!("Invalid farm id: {:?}", farm_id)));
    }
    if !state.config.predicted_farms.iter().any(|f| f == farm_id) {
        return Err(AppError::NotFound(format!("No predictions for farm {}", farm_id)));
    }
    Ok(())
}

/// Picks the window anchor: request parameter, then configured anchor, then now.
pub fn resolve_anchor(state: &AppState, requested: Option<&str>) -> Result<DateTime<Utc>, AppError> {
    match requested {
        Some(raw) => Ok(parse_instant(raw)?),
        None => Ok(state.config.anchor.unwrap_or_else(Utc::now)),
    }
}

pub async fn load_series(state: &AppState, farm_id: &str) -> Result<Arc<Vec<TimedRecord>>, AppError> {
    if let Some(series) = state.cache.series.get(farm_id) {
        return Ok(series);
    }

    let series = state.series_source.load_series(farm_id).await.map_err(|e| {
        error!("Failed to load series for farm {}: {}", farm_id, e);
        e
    })?;
    Ok(state.cache.series.insert(farm_id, series))
}

pub async fn load_fleet(state: &AppState) -> Result<Arc<Fleet>, AppError> {
    let key = state.fleet_source.cache_key().to_string();
    if let Some(fleet) = state.cache.fleet.get(&key) {
        return Ok(fleet);
    }

    let fleet = state.fleet_source.load_fleet().await.map_err(|e| {
        error!("Failed to load fleet snapshot from {}: {}", key, e);
        e
    })?;
    Ok(state.cache.fleet.insert(&key, fleet))
}

pub async fn series_chart(
    state: &AppState,
    farm_id: &str,
    choice: WindowChoice,
    anchor: Option<&str>,
) -> Result<SeriesChart, AppError> {
    validate_farm(state, farm_id)?;
    let window = WindowSpec::new(resolve_anchor(state, anchor)?, state.config.windows.length_days(choice))?;

    let series = load_series(state, farm_id).await?;
    let windowed = series_windower::select_window(&series, &window)?;

    info!(
        "Windowed {} of {} records for {} ({} days before {})",
        windowed.len(),
        series.len(),
        farm_id,
        window.length_days(),
        window.anchor()
    );
    Ok(chart_builder::build_series_chart(&windowed, farm_id))
}

pub async fn map_chart(state: &AppState, zone: Option<&str>) -> Result<MapChart, AppError> {
    let zone = zone.unwrap_or(&state.config.reference_timezone);

    let fleet = load_fleet(state).await?;
    let (selected, as_of_local) = fleet_selector::select(&fleet, &state.config.station_allow_list, zone)?;

    Ok(chart_builder::build_map_chart(&selected, &as_of_local, &state.config.map_view))
}

/// Builds both charts, loading the series and the fleet concurrently.
pub async fn dashboard(
    state: &AppState,
    farm_id: &str,
    choice: WindowChoice,
    anchor: Option<&str>,
) -> Result<ChartPayload, AppError> {
    let (series, map) = tokio::try_join!(
        series_chart(state, farm_id, choice, anchor),
        map_chart(state, None),
    )?;
    Ok(ChartPayload { series, map })
}
