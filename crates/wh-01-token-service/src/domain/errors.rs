//! # Auth Errors
//!
//! Every variant means "reject the request". None are retried.

use shared_types::AccessTier;
use thiserror::Error;

/// Errors from issuing, validating or authorizing a token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Not a compact JWS, bad base64/JSON, or a required claim is missing
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// MAC does not match the service secret
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Header names an algorithm other than HS256
    #[error("Unexpected signing algorithm: {0}")]
    UnexpectedAlgorithm(String),

    #[error("Token expired at {exp} (now {now})")]
    Expired { exp: i64, now: i64 },

    #[error("Token not valid before {nbf} (now {now})")]
    NotYetValid { nbf: i64, now: i64 },

    #[error("Invalid issuer: expected {expected}, got {actual}")]
    InvalidIssuer { expected: String, actual: String },

    #[error("Insufficient access tier: have {actual}, need {required}")]
    InsufficientTier {
        actual: AccessTier,
        required: AccessTier,
    },

    /// The token library refused to encode
    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Short label used for the `reason` metric dimension.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MalformedToken(_) => "malformed",
            AuthError::InvalidSignature => "signature",
            AuthError::UnexpectedAlgorithm(_) => "algorithm",
            AuthError::Expired { .. } => "expired",
            AuthError::NotYetValid { .. } => "not_yet_valid",
            AuthError::InvalidIssuer { .. } => "issuer",
            AuthError::InsufficientTier { .. } => "tier",
            AuthError::Signing(_) => "signing",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => AuthError::UnexpectedAlgorithm(err.to_string()),
            _ => AuthError::MalformedToken(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::{Error, ErrorKind};

    #[test]
    fn test_library_error_mapping() {
        assert_eq!(
            AuthError::from(Error::from(ErrorKind::InvalidSignature)),
            AuthError::InvalidSignature
        );
        assert!(matches!(
            AuthError::from(Error::from(ErrorKind::InvalidAlgorithm)),
            AuthError::UnexpectedAlgorithm(_)
        ));
        assert!(matches!(
            AuthError::from(Error::from(ErrorKind::InvalidToken)),
            AuthError::MalformedToken(_)
        ));
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(AuthError::InvalidSignature.reason(), "signature");
        assert_eq!(AuthError::Expired { exp: 1, now: 2 }.reason(), "expired");
    }
}
