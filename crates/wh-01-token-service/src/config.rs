//! Token service configuration from environment variables.

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::domain::secret::SigningSecret;
use crate::{DEFAULT_ISSUER, DEFAULT_TTL_SECS};

/// Errors loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Settings for a [`crate::TokenService`].
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    pub secret: SigningSecret,

    /// Value stamped into and required from `iss`
    pub issuer: String,

    /// Lifetime used by callers that do not pick one
    pub default_ttl: Duration,

    /// Clock skew tolerated on both ends of the window
    pub leeway: Duration,
}

impl TokenServiceConfig {
    /// Configuration with the default issuer, TTL and zero leeway.
    #[must_use]
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            secret,
            issuer: DEFAULT_ISSUER.to_string(),
            default_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            leeway: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JWT_SECRET`: HMAC key (required, non-empty)
    /// - `JWT_ISSUER`: Issuer (default: warehouse-dashboard)
    /// - `JWT_TTL_SECS`: Default token lifetime (default: 86400)
    /// - `JWT_LEEWAY_SECS`: Clock skew tolerance (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        let secret = SigningSecret::new(secret).ok_or(ConfigError::Invalid {
            var: "JWT_SECRET",
            reason: "must not be empty".to_string(),
        })?;

        Ok(Self {
            secret,
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string()),
            default_ttl: Duration::from_secs(secs_var("JWT_TTL_SECS", DEFAULT_TTL_SECS)?),
            leeway: Duration::from_secs(secs_var("JWT_LEEWAY_SECS", 0)?),
        })
    }
}

fn secs_var(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(raw) => parse_secs(var, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_secs(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|e| ConfigError::Invalid {
        var,
        reason: format!("{raw:?}: {e}"),
    })
}
