//! Telemetry configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::TelemetryError;

/// Log line rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, for development
    Pretty,
    /// One JSON object per line, for log shippers
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(TelemetryError::Config(format!("unknown log format: {other}"))),
        }
    }
}

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name for log lines
    pub service_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or `EnvFilter` syntax)
    pub log_level: String,

    pub format: LogFormat,

    /// Whether to write logs to stdout at all
    pub console_output: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "warehouse-backbone".to_string(),
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
            console_output: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WH_SERVICE_NAME`: Service name (default: warehouse-backbone)
    /// - `WH_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `WH_LOG_FORMAT`: `json` or `pretty` (default: json in containers, pretty otherwise)
    /// - `WH_CONSOLE_OUTPUT`: Enable console output (default: true)
    ///
    /// An unrecognised `WH_LOG_FORMAT` falls back to the default.
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();
        let default_format = if is_container {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        };

        Self {
            service_name: env::var("WH_SERVICE_NAME")
                .unwrap_or_else(|_| "warehouse-backbone".to_string()),

            log_level: env::var("WH_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            format: env::var("WH_LOG_FORMAT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default_format),

            console_output: env::var("WH_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    /// Configuration with a specific service name.
    #[must_use]
    pub fn for_service(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            ..Self::from_env()
        }
    }
}
