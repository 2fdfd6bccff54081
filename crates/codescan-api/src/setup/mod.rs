//! Application setup and initialization
//!
//! Everything main.rs needs before serving: configuration checks, tracing, the
//! decoder backend and the router.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use codescan_core::Config;
use codescan_decoder::create_decoder;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        decoder_backend = %config.decoder_backend(),
        "Configuration loaded and validated successfully"
    );

    let decoder = create_decoder(&config).await;
    let state = Arc::new(AppState::new(config.clone(), decoder));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
