//! Lucra signal API server
//!
//! Standalone entry point serving `/api/analise` and `/api/ultimate` (plus
//! health and metrics). Hosted deployments mount `create_router` directly and
//! never run this binary.

use dotenvy::dotenv;
use lucra::config::AppConfig;
use lucra::core::http::{start_server, AppState};
use lucra::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env();
    info!("Starting Lucra signal API server");
    info!(environment = %config.environment, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(
        ultimate_enabled = config.ultimate_enabled,
        analysis_configured = config.analysis_url.is_some(),
        "Ultimate endpoint"
    );

    let state = AppState::from_config(&config)?;

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        result = start_server(state, config.port) => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
                return Err(e);
            }
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
