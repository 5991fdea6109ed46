use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};

use crate::models::{MapView, WindowTable};
use crate::services::time_codec::{parse_instant, parse_zone};

pub const DEFAULT_FLEET_FEED_URL: &str = "https://services.aremi.data61.io/aemo/v6/csv/wind";

/// South Australian wind farms shown on the fleet map.
pub const DEFAULT_STATION_ALLOW_LIST: [&str; 13] = [
    "BLUFF1", "CATHROCK", "CLEMGPWF", "HALLWF2", "HDWF2", "LKBONNY2", "MTMILLAR",
    "NBHWF1", "SNOWNTH1", "SNOWSTH1", "STARHLWF", "WATERLWF", "WPWF",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub results_dir: PathBuf,
    pub fleet_feed_url: String,
    pub reference_timezone: String,
    pub station_allow_list: Vec<String>,
    pub predicted_farms: Vec<String>,
    /// Fixed "now" for windowing; the wall clock is used when unset.
    pub anchor: Option<DateTime<Utc>>,
    pub windows: WindowTable,
    pub series_cache_ttl: Duration,
    pub fleet_cache_ttl: Duration,
    pub map_view: MapView,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            results_dir: PathBuf::from("./results"),
            fleet_feed_url: DEFAULT_FLEET_FEED_URL.to_string(),
            reference_timezone: "Australia/Adelaide".to_string(),
            station_allow_list: DEFAULT_STATION_ALLOW_LIST.iter().map(|s| s.to_string()).collect(),
            predicted_farms: vec!["HDWF2".to_string()],
            anchor: None,
            windows: WindowTable::default(),
            series_cache_ttl: Duration::hours(24),
            fleet_cache_ttl: Duration::minutes(5),
            map_view: MapView::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .map_err(|_| format!("BIND_ADDR is not a socket address: {}", addr))?;
        }
        if let Some(dir) = lookup("RESULTS_DIR") {
            config.results_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("FLEET_FEED_URL") {
            config.fleet_feed_url = url;
        }
        if let Some(zone) = lookup("REFERENCE_TIMEZONE") {
            config.reference_timezone = zone;
        }
        if let Some(list) = lookup("STATION_ALLOW_LIST") {
            config.station_allow_list = split_list(&list);
        }
        if let Some(list) = lookup("PREDICTED_FARMS") {
            config.predicted_farms = split_list(&list);
        }
        if let Some(anchor) = lookup("DASHBOARD_ANCHOR") {
            config.anchor = Some(
                parse_instant(&anchor).map_err(|e| format!("DASHBOARD_ANCHOR: {}", e))?,
            );
        }
        if let Some(days) = lookup("WINDOW_DAYS") {
            config.windows = parse_window_days(&days)?;
        }
        if let Some(secs) = lookup("SERIES_CACHE_TTL_SECS") {
            config.series_cache_ttl = parse_ttl("SERIES_CACHE_TTL_SECS", &secs)?;
        }
        if let Some(secs) = lookup("FLEET_CACHE_TTL_SECS") {
            config.fleet_cache_ttl = parse_ttl("FLEET_CACHE_TTL_SECS", &secs)?;
        }
        if let Some(region) = lookup("MAP_REGION") {
            config.map_view.region = region;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        parse_zone(&self.reference_timezone).map_err(|e| format!("REFERENCE_TIMEZONE: {}", e))?;
        url::Url::parse(&self.fleet_feed_url).map_err(|e| format!("FLEET_FEED_URL: {}", e))?;
        if self.station_allow_list.is_empty() {
            return Err("STATION_ALLOW_LIST is empty".to_string());
        }
        if self.predicted_farms.is_empty() {
            return Err("PREDICTED_FARMS is empty".to_string());
        }
        Ok(())
    }
}

/// Splits a comma list, dropping blanks and repeats while keeping order.
fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|i| i == item) {
            items.push(item.to_string());
        }
    }
    items
}

fn parse_window_days(raw: &str) -> Result<WindowTable, String> {
    let days = raw
        .split(',')
        .map(|d| d.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("WINDOW_DAYS: {}", e))?;

    let days: [i64; 4] = days
        .try_into()
        .map_err(|_| "WINDOW_DAYS needs exactly four values".to_string())?;

    WindowTable::from_days(days).map_err(|e| format!("WINDOW_DAYS: {}", e))
}

fn parse_ttl(key: &str, raw: &str) -> Result<Duration, String> {
    raw.trim()
        .parse::<u32>()
        .map(|secs| Duration::seconds(secs.into()))
        .map_err(|e| format!("{}: {}", key, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, String> {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.station_allow_list.len(), 13);
        assert_eq!(config.predicted_farms, vec!["HDWF2".to_string()]);
        assert_eq!(config.reference_timezone, "Australia/Adelaide");
        assert_eq!(config.windows, WindowTable::default());
        assert!(config.anchor.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STATION_ALLOW_LIST", "WPWF, BLUFF1,,WPWF"),
            ("DASHBOARD_ANCHOR", "2020-02-01 00:00:00"),
            ("WINDOW_DAYS", "1,2,3,4"),
            ("FLEET_CACHE_TTL_SECS", "60"),
            ("MAP_REGION", "VIC"),
        ])
        .unwrap();

        assert_eq!(config.station_allow_list, vec!["WPWF".to_string(), "BLUFF1".to_string()]);
        assert_eq!(config.anchor, Some(parse_instant("2020-02-01T00:00:00").unwrap()));
        assert_eq!(config.windows.last_year, 4);
        assert_eq!(config.fleet_cache_ttl, Duration::seconds(60));
        assert_eq!(config.map_view.region, "VIC");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("REFERENCE_TIMEZONE", "Mars/Olympus")]).is_err());
        assert!(config_from(&[("WINDOW_DAYS", "7,30,180")]).is_err());
        assert!(config_from(&[("WINDOW_DAYS", "7,30,-1,365")]).is_err());
        assert!(config_from(&[("DASHBOARD_ANCHOR", "soon")]).is_err());
        assert!(config_from(&[("PREDICTED_FARMS", " , ")]).is_err());
        assert!(config_from(&[("BIND_ADDR", "localhost")]).is_err());
        assert!(config_from(&[("FLEET_FEED_URL", "not a url")]).is_err());
    }
}
