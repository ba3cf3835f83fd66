//! # Token Service (WH-01)
//!
//! Issues and verifies the signed identity tokens that every warehouse
//! service accepts at request entry.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Claims, secrets, header inspection, errors
//! - **Ports Layer** (`ports/`): `TokenApi` inbound, `TimeSource` outbound
//! - **Service Layer** (`service.rs`): Signs and verifies with `jsonwebtoken`
//!
//! ## Security Notes
//!
//! - **HS256 only**: the header algorithm is read before the signature is
//!   checked, and anything else (including `none`) is rejected
//! - **Stateless**: no revocation; a token stays valid until `exp`
//! - **Secrets**: zeroized on drop, never printed

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::{ConfigError, TokenServiceConfig};
pub use domain::claims::TokenClaims;
pub use domain::errors::AuthError;
pub use domain::secret::SigningSecret;
pub use ports::inbound::TokenApi;
pub use ports::outbound::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use service::TokenService;

pub use shared_types::{AccessTier, Role};

/// Issuer stamped into tokens when none is configured.
pub const DEFAULT_ISSUER: &str = "warehouse-dashboard";

/// Token lifetime when none is configured (24 hours).
pub const DEFAULT_TTL_SECS: u64 = 86_400;
