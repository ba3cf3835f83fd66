//! # Backbone Configuration
//!
//! Everything the runtime needs, read once from the environment at startup.

use anyhow::{Context, Result};
use shared_bus::BusConfig;
use wh_01_token_service::TokenServiceConfig;
use wh_telemetry::TelemetryConfig;

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct BackboneConfig {
    pub telemetry: TelemetryConfig,
    pub tokens: TokenServiceConfig,
    pub bus: BusConfig,
}

impl BackboneConfig {
    /// Load every section from environment variables.
    ///
    /// Fails when `JWT_SECRET` is missing or a numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            telemetry: TelemetryConfig::for_service("backbone-runtime"),
            tokens: TokenServiceConfig::from_env().context("Failed to load token configuration")?,
            bus: BusConfig::from_env(),
        })
    }
}
