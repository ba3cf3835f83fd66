//! # Token Claims
//!
//! The JSON body of a token. Timestamps are seconds since the Unix epoch.

use serde::{Deserialize, Serialize};
use shared_types::{AccessTier, Role};

/// Identity and permission carried by a token.
///
/// Wire names: `userId`, `username`, `role`, `accessLevel`, `iss`, `iat`,
/// `nbf`, `exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// Subject identifier
    pub user_id: String,
    /// Display name
    pub username: String,
    pub role: Role,
    pub access_level: AccessTier,
    /// Issuer
    pub iss: String,
    /// Issued at
    pub iat: i64,
    /// Not before
    pub nbf: i64,
    /// Expires at
    pub exp: i64,
}
