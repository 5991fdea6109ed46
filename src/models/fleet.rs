use serde::Serialize;

/// A station row as delivered by the fleet feed. Any cell may be blank.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FleetRow {
    pub station_id: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub name: Option<String>,
    pub current_output_mw: Option<f64>,
    pub as_of: Option<String>,
}

impl FleetRow {
    /// True when no field needs filling.
    pub fn is_complete(&self) -> bool {
        self.lat.is_some()
            && self.lon.is_some()
            && self.name.is_some()
            && self.current_output_mw.is_some()
            && self.as_of.is_some()
    }
}

/// Fleet-wide snapshot keyed by station id, kept in feed order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fleet {
    rows: Vec<FleetRow>,
}

impl Fleet {
    /// Builds a fleet, keeping the first row seen for each station id.
    /// Returns the fleet and the ids that were dropped as duplicates.
    pub fn from_rows(rows: impl IntoIterator<Item = FleetRow>) -> (Self, Vec<String>) {
        let mut kept: Vec<FleetRow> = Vec::new();
        let mut duplicates = Vec::new();

        for row in rows {
            if kept.iter().any(|r| r.station_id == row.station_id) {
                duplicates.push(row.station_id);
            } else {
                kept.push(row);
            }
        }

        (Self { rows: kept }, duplicates)
    }

    pub fn get(&self, station_id: &str) -> Option<&FleetRow> {
        self.rows.iter().find(|r| r.station_id == station_id)
    }

    pub fn rows(&self) -> &[FleetRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// A station with every field defined, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSnapshot {
    pub station_id: String,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub current_output_mw: f64,
    pub as_of: String,
}

impl StationSnapshot {
    /// Fills blank numeric cells with zero and blank text with an empty string.
    pub fn filled_from(row: &FleetRow) -> Self {
        Self {
            station_id: row.station_id.clone(),
            lat: row.lat.unwrap_or(0.0),
            lon: row.lon.unwrap_or(0.0),
            name: row.name.clone().unwrap_or_default(),
            current_output_mw: row.current_output_mw.unwrap_or(0.0),
            as_of: row.as_of.clone().unwrap_or_default(),
        }
    }
}
