use std::sync::Arc;

use crate::config::AppConfig;
use crate::external::{FleetSource, SeriesSource};
use crate::services::data_cache::DataCache;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub series_source: Arc<dyn SeriesSource>,
    pub fleet_source: Arc<dyn FleetSource>,
    pub cache: DataCache,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        series_source: Arc<dyn SeriesSource>,
        fleet_source: Arc<dyn FleetSource>,
    ) -> Self {
        let cache = DataCache::new(config.series_cache_ttl, config.fleet_cache_ttl);
        Self {
            config: Arc::new(config),
            series_source,
            fleet_source,
            cache,
        }
    }
}
