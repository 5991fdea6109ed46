use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serialize_timestamp;

// One observation of a farm's output next to the pre-computed prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedRecord {
    #[serde(with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub power: f64,
    pub predicted_power: f64,
}

impl TimedRecord {
    pub fn new(timestamp: DateTime<Utc>, power: f64, predicted_power: f64) -> Self {
        Self { timestamp, power, predicted_power }
    }
}
