pub mod chart_builder;
pub mod dashboard_service;
pub mod data_cache;
pub mod fleet_selector;
pub mod series_windower;
pub mod time_codec;
