use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use windboard::app;
use windboard::config::AppConfig;
use windboard::external::{CsvSeriesSource, HttpFleetSource};
use windboard::logging::{init_logging, LoggingConfig};
use windboard::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;

    let series_source = Arc::new(CsvSeriesSource::new(config.results_dir.clone()));
    let fleet_source = Arc::new(
        HttpFleetSource::new(&config.fleet_feed_url).context("building fleet feed client")?,
    );
    tracing::info!(
        "Serving predictions for {:?} from {:?}, fleet feed {}",
        config.predicted_farms,
        config.results_dir,
        config.fleet_feed_url
    );

    let addr = config.bind_addr;
    let state = AppState::new(config, series_source, fleet_source);
    let app = app::create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("Windboard running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
