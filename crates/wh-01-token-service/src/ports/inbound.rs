//! # Inbound Ports (Driving Ports / API)
//!
//! The token operations request middleware and login handlers call.
//! Implementations must be thread-safe (`Send + Sync`).

use std::time::Duration;

use shared_types::{AccessTier, Role};

use crate::domain::claims::TokenClaims;
use crate::domain::errors::AuthError;

/// Primary Token API.
pub trait TokenApi: Send + Sync {
    // =========================================================================
    // Issuance
    // =========================================================================

    /// Sign a new token valid from now for `ttl`.
    fn issue(
        &self,
        subject_id: &str,
        display_name: &str,
        role: Role,
        tier: AccessTier,
        ttl: Duration,
    ) -> Result<String, AuthError>;

    /// Like [`TokenApi::issue`], with the tier taken from `role.default_tier()`.
    fn issue_with_default_tier(
        &self,
        subject_id: &str,
        display_name: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        self.issue(subject_id, display_name, role, role.default_tier(), ttl)
    }

    /// Validate `token`, then issue a fresh one with the same identity.
    ///
    /// The presented token is not revoked.
    fn refresh(&self, token: &str, new_ttl: Duration) -> Result<String, AuthError>;

    // =========================================================================
    // Verification
    // =========================================================================

    /// Verify algorithm, signature, issuer and time window, returning the claims.
    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Tier comparison by rank. Unknown tiers rank 0.
    fn has_permission(&self, actual: &str, required: &str) -> bool {
        shared_types::has_permission(actual, required)
    }

    /// Validate `token` and require at least `required`.
    fn authorize(&self, token: &str, required: AccessTier) -> Result<TokenClaims, AuthError> {
        let claims = self.validate(token)?;
        if claims.access_level.satisfies(required) {
            Ok(claims)
        } else {
            Err(AuthError::InsufficientTier {
                actual: claims.access_level,
                required,
            })
        }
    }
}
