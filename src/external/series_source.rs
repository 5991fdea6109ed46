use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::{info, warn};

use crate::external::SourceError;
use crate::models::TimedRecord;
use crate::services::time_codec::parse_instant;

/// Loads the historical observed/predicted series of one farm.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    async fn load_series(&self, farm_id: &str) -> Result<Vec<TimedRecord>, SourceError>;
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    time: String,
    power: f64,
    pred: f64,
}

/// Reads `<dir>/<FARM>.csv` files with `time,power,pred` columns.
pub struct CsvSeriesSource {
    dir: PathBuf,
}

impl CsvSeriesSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl SeriesSource for CsvSeriesSource {
    async fn load_series(&self, farm_id: &str) -> Result<Vec<TimedRecord>, SourceError> {
        let path = self.dir.join(format!("{}.csv", farm_id));

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::NotFound(farm_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let records = parse_series_csv(&content)?;
        info!("Loaded {} records for {} from {:?}", records.len(), farm_id, path);
        Ok(records)
    }
}

/// Parses a series file, sorting it by time if the rows are out of order.
pub fn parse_series_csv(content: &str) -> Result<Vec<TimedRecord>, SourceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (line_num, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        let timestamp = parse_instant(&row.time)
            .map_err(|e| SourceError::Parse(format!("line {}: {}", line_num + 2, e)))?;
        records.push(TimedRecord::new(timestamp, row.power, row.pred));
    }

    if records.windows(2).any(|w| w[0].timestamp > w[1].timestamp) {
        warn!("Series rows are out of order, sorting {} records by time", records.len());
        records.sort_by_key(|r| r.timestamp);
    }

    Ok(records)
}
