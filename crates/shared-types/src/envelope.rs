//! # `EventEnvelope`
//!
//! Uniform transport wrapper for every domain event put on the broker.
//!
//! ## Wire Format
//!
//! ```json
//! {
//!   "eventType": "shipment_status_changed",
//!   "eventId": "6f1c0d9e-...",
//!   "timestamp": "2024-03-01T08:15:00.123Z",
//!   "data": { ... }
//! }
//! ```
//!
//! Key order follows field declaration order. The payload is carried
//! verbatim; its shape is the producer's business.

use crate::errors::EnvelopeError;
use crate::events::{EventTopic, EventType};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A domain event wrapped for transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope<T = serde_json::Value> {
    /// Event type tag.
    pub event_type: EventType,

    /// Fresh per envelope. Downstream consumers dedupe on this.
    pub event_id: Uuid,

    /// Creation time (UTC, RFC 3339 on the wire).
    pub timestamp: DateTime<Utc>,

    /// Opaque payload.
    pub data: T,
}

impl<T> EventEnvelope<T> {
    /// Wrap `data`, stamping a new v4 id and the current time.
    pub fn wrap(event_type: EventType, data: T) -> Self {
        Self {
            event_type,
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            data,
        }
    }

    /// Topic the event type routes to.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        self.event_type.topic()
    }
}

impl<T: Serialize> EventEnvelope<T> {
    pub fn to_json(&self) -> Result<String, EnvelopeError> {
        serde_json::to_string(self).map_err(EnvelopeError::Encode)
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, EnvelopeError> {
        serde_json::to_vec(self).map_err(EnvelopeError::Encode)
    }
}

impl<T: DeserializeOwned> EventEnvelope<T> {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        serde_json::from_slice(bytes).map_err(EnvelopeError::Decode)
    }
}
