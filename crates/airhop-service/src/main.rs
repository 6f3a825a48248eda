//! Airhop HTTP service binary.
//!
//! # Configuration
//!
//! - `AIRHOP_DATA_DIR` - directory with airports.dat and routes.dat
//! - `AIRHOP_PROXIMITY_KM` - ground connection radius (default: 100)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - log level (default: info)
//! - `LOG_FORMAT` - log format: json (default) or text

use anyhow::{Context, Result};
use tracing::{error, info};

use airhop_service::{init_logging, router, AppState, LoggingConfig, ServiceConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());

    let config = ServiceConfig::from_env()?;
    info!(
        data_dir = %config.data_dir.display(),
        proximity_km = config.proximity_km,
        port = config.port,
        "starting airhop service"
    );

    let state = AppState::load(&config.dataset(), &config.network_options()).map_err(|e| {
        error!(error = %e, data_dir = %config.data_dir.display(), "failed to load dataset");
        e
    })?;
    info!(
        airports = state.network().airports().len(),
        nodes = state.network().graph().node_count(),
        "route network loaded"
    );

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
