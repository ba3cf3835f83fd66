//! # Broker Errors

use thiserror::Error;

/// A handle that failed to close during shutdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseFailure {
    /// `publisher` or `subscriber`.
    pub kind: ChannelKind,
    /// Topic the handle was bound to.
    pub topic: String,
    /// Consumer group, for subscribers.
    pub group: Option<String>,
    /// Rendered close error.
    pub reason: String,
}

/// Which side of the broker a handle talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Publisher,
    Subscriber,
}

impl ChannelKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Publisher => "publisher",
            ChannelKind::Subscriber => "subscriber",
        }
    }
}

/// Errors from broker clients and the channel registry.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The broker rejected or could not accept a message.
    #[error("Publish to {topic} failed: {reason}")]
    Publish { topic: String, reason: String },

    /// Reading from a subscription failed.
    #[error("Receive from {topic} failed: {reason}")]
    Receive { topic: String, reason: String },

    /// Offset commit failed.
    #[error("Commit on {topic} failed: {reason}")]
    Commit { topic: String, reason: String },

    /// Closing a client failed.
    #[error("Close failed: {0}")]
    Close(String),

    /// The client has already been closed.
    #[error("Client for {topic} is closed")]
    Closed { topic: String },

    /// The registry was shut down; no new handles are handed out.
    #[error("Channel registry is closed")]
    RegistryClosed,

    /// A registry needs at least one broker address.
    #[error("No broker addresses configured")]
    NoBrokers,

    /// The connector could not build a client.
    #[error("Failed to create client for {topic}: {reason}")]
    Connect { topic: String, reason: String },

    /// Envelope could not be serialized.
    #[error("Encode failed: {0}")]
    Encode(#[source] shared_types::EnvelopeError),

    /// Received bytes were not a valid envelope.
    #[error("Decode failed: {0}")]
    Decode(#[source] shared_types::EnvelopeError),

    /// One or more handles failed to close during `close_all`.
    #[error("Shutdown completed with {} close failure(s)", failures.len())]
    Shutdown { failures: Vec<CloseFailure> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_variants() {
        let errors = vec![
            BrokerError::Publish {
                topic: "scan-events".to_string(),
                reason: "leader unavailable".to_string(),
            },
            BrokerError::Receive {
                topic: "scan-events".to_string(),
                reason: "rebalance".to_string(),
            },
            BrokerError::Close("socket reset".to_string()),
            BrokerError::Closed {
                topic: "user-events".to_string(),
            },
            BrokerError::RegistryClosed,
            BrokerError::NoBrokers,
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn test_shutdown_error_counts_failures() {
        let failure = CloseFailure {
            kind: ChannelKind::Subscriber,
            topic: "shipment-events".to_string(),
            group: Some("analytics".to_string()),
            reason: "timeout".to_string(),
        };
        let err = BrokerError::Shutdown {
            failures: vec![failure.clone(), failure],
        };
        assert_eq!(err.to_string(), "Shutdown completed with 2 close failure(s)");
    }
}
