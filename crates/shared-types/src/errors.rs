//! # Error Types
//!
//! Errors shared by every crate that handles envelopes.

use thiserror::Error;

/// Envelope encoding/decoding failure.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Payload could not be encoded as JSON.
    #[error("Envelope encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Bytes were not a valid envelope.
    #[error("Envelope decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
