//! # Warehouse Telemetry
//!
//! Logging and metrics for the warehouse backbone services.
//!
//! ## Components
//!
//! - **Logs**: `tracing` events rendered by `tracing-subscriber`, pretty for
//!   development and JSON inside containers
//! - **Metrics**: Prometheus counters and histograms in a shared registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wh_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // Application code
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WH_SERVICE_NAME` | `warehouse-backbone` | Service name on every log line |
//! | `WH_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `WH_LOG_FORMAT` | `pretty` | `json` or `pretty` |

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod config;
mod logging;
pub mod metrics;

pub use config::{LogFormat, TelemetryConfig};
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, CHANNELS_CREATED, CLOSE_FAILURES,
    MESSAGES_PUBLISHED, REGISTRY, TOKENS_ISSUED, TOKEN_VALIDATION_DURATION,
    TOKEN_VALIDATION_FAILURES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize log subscriber: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and register metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so early log lines can already count
    let metrics_handle = register_metrics()?;
    init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        format = config.format.as_str(),
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
        metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
    metrics: MetricsHandle,
}

impl TelemetryGuard {
    #[must_use]
    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
