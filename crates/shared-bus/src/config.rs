//! Bus configuration from environment variables.

use std::env;

/// Default broker list when `KAFKA_BROKERS` is unset.
pub const DEFAULT_BROKERS: &str = "localhost:9092";

/// Broker addresses the channel registry connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    pub brokers: Vec<String>,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            brokers: parse_broker_list(DEFAULT_BROKERS),
        }
    }
}

impl BusConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `KAFKA_BROKERS`: Comma-separated `host:port` list (default: localhost:9092)
    pub fn from_env() -> Self {
        let raw = env::var("KAFKA_BROKERS").unwrap_or_else(|_| DEFAULT_BROKERS.to_string());
        Self {
            brokers: parse_broker_list(&raw),
        }
    }
}

/// Split a comma-separated broker list, dropping blanks.
#[must_use]
pub fn parse_broker_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(str::to_string)
        .collect()
}
