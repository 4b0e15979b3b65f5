use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::{initialize_app_state, AppConfig};
use crate::router::create_router;

/// Loads configuration and the dataset, then serves the API until Ctrl-C.
pub async fn serve(bind_address: Option<String>, data_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load()
        .context("Invalid configuration")?
        .with_overrides(bind_address, data_path);
    let bind_address = config.server.bind_address.clone();
    debug!(data_path = %config.server.data_path.display(), %bind_address, "configuration loaded");

    let state = initialize_app_state(config).inspect_err(|e| {
        error!("Failed to initialize application state: {:#}", e);
    })?;
    info!(
        series = state.dataset.series_count(),
        last_date = %state.dataset.last_date(),
        language_model = %state.model.describe(),
        "forecast dataset ready"
    );
    if !state.model.is_configured() {
        warn!("No language model API key configured; /analyze and /chat will answer 503");
    }

    let app = create_router(state);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind to address {}", bind_address))?;

    info!("Bloodcast API listening on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| error!("Server error: {}", e))?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Unable to listen for the shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
