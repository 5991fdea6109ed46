use std::time::Duration;

use async_trait::async_trait;
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::{info, warn};

use crate::external::SourceError;
use crate::models::{Fleet, FleetRow};

/// Loads the fleet-wide snapshot of current output.
#[async_trait]
pub trait FleetSource: Send + Sync {
    async fn load_fleet(&self) -> Result<Fleet, SourceError>;

    /// Key under which the loaded fleet is cached.
    fn cache_key(&self) -> &str;
}

/// Columns the feed must carry. Only `Station Name` may be absent.
const REQUIRED_COLUMNS: [&str; 5] = [
    "DUID",
    "Lat",
    "Lon",
    "Current Output (MW)",
    "Most Recent Output Time (AEST)",
];

#[derive(Debug, Deserialize)]
struct FeedRow {
    #[serde(rename = "DUID")]
    duid: String,
    #[serde(rename = "Station Name", default)]
    station_name: Option<String>,
    #[serde(rename = "Lat", default, deserialize_with = "csv::invalid_option")]
    lat: Option<f64>,
    #[serde(rename = "Lon", default, deserialize_with = "csv::invalid_option")]
    lon: Option<f64>,
    #[serde(rename = "Current Output (MW)", default, deserialize_with = "csv::invalid_option")]
    current_output_mw: Option<f64>,
    #[serde(rename = "Most Recent Output Time (AEST)", default)]
    most_recent_output_time: Option<String>,
}

impl From<FeedRow> for FleetRow {
    fn from(row: FeedRow) -> Self {
        FleetRow {
            station_id: row.duid,
            lat: row.lat,
            lon: row.lon,
            name: non_blank(row.station_name),
            current_output_mw: row.current_output_mw,
            as_of: non_blank(row.most_recent_output_time),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses the wind feed CSV, keyed by the `DUID` column.
pub fn parse_fleet_csv(content: &str) -> Result<Fleet, SourceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?;
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(SourceError::Parse(format!("missing column {:?}", missing)));
    }

    let rows = reader
        .deserialize::<FeedRow>()
        .map(|r| r.map(FleetRow::from))
        .collect::<Result<Vec<_>, _>>()?;

    let (fleet, duplicates) = Fleet::from_rows(rows);
    if !duplicates.is_empty() {
        warn!("Fleet feed repeats station ids {:?}, keeping first occurrence", duplicates);
    }

    Ok(fleet)
}

/// Fetches the fleet feed over HTTP.
pub struct HttpFleetSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFleetSource {
    pub fn new(url: &str) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, url: url.to_string() })
    }
}

#[async_trait]
impl FleetSource for HttpFleetSource {
    async fn load_fleet(&self) -> Result<Fleet, SourceError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::BadResponse(format!("{} returned {}", self.url, status)));
        }

        let body = response.text().await?;
        let fleet = parse_fleet_csv(&body)?;
        info!("Fetched fleet snapshot with {} stations from {}", fleet.len(), self.url);
        Ok(fleet)
    }

    fn cache_key(&self) -> &str {
        &self.url
    }
}
