//! # Warehouse Backbone Runtime
//!
//! Entry point. See the library crate for the startup sequence.

use anyhow::{Context, Result};
use backbone_runtime::{BackboneConfig, BackboneRuntime};
use shared_bus::InMemoryBroker;
use tracing::info;
use wh_telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = BackboneConfig::from_env()?;

    // Initialize logging and metrics
    let _telemetry =
        init_telemetry(config.telemetry.clone()).context("Failed to initialize telemetry")?;

    // Create and check the runtime
    let runtime = BackboneRuntime::new(config, InMemoryBroker::new())?;
    runtime.self_check().await?;

    // Keep running
    info!("Backbone is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    // Graceful shutdown
    let closed = runtime.shutdown_checked().await?;
    info!(closed, "Backbone stopped");
    Ok(())
}
