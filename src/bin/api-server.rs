//! Marketlens API Server
//!
//! Serves indicator series for Alpha Vantage symbols over HTTP.

use dotenvy::dotenv;
use marketlens::config::{self, ProviderConfig};
use marketlens::core::http::start_server;
use marketlens::logging;
use marketlens::services::alpha_vantage::AlphaVantageProvider;
use marketlens::services::AnalysisService;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let port = config::get_port();
    let env = config::get_environment();
    info!("Starting Marketlens API Server");
    info!(environment = %env, "Environment");

    let provider_config = ProviderConfig::from_env()?;
    info!(base_url = %provider_config.base_url, "Alpha Vantage endpoint");
    let service = AnalysisService::new(Arc::new(AlphaVantageProvider::new(provider_config)));

    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, service).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
