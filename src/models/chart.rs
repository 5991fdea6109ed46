use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::serialize_timestamp;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStyle {
    pub name: String,
    pub line_color: String,
}

/// Line chart of observed against predicted output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesChart {
    #[serde(with = "serialize_timestamp::seq")]
    pub xs: Vec<DateTime<Utc>>,
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
    pub title: String,
    pub traces: [TraceStyle; 2],
    pub range_slider: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
    pub size: f64,
    pub color_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Map framing that does not depend on the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub region: String,
    pub center: GeoPoint,
    pub zoom: f64,
    pub color_scale: String,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            region: "SA".to_string(),
            center: GeoPoint { lat: -35.5, lon: 137.0 },
            zoom: 4.5,
            color_scale: "haline".to_string(),
        }
    }
}

/// Scatter map of current output per station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapChart {
    pub points: Vec<MapPoint>,
    pub title: String,
    pub as_of_local: String,
    pub view: MapView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub series: SeriesChart,
    pub map: MapChart,
}
