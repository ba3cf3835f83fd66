//! # Publisher Handle
//!
//! Registry-owned sending side of a topic. Clones share one client.

use crate::broker::ProducerClient;
use crate::errors::BrokerError;
use serde::Serialize;
use shared_types::EventEnvelope;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use wh_telemetry::{metric_inc, MESSAGES_PUBLISHED};

/// Handle for publishing to a single topic.
///
/// Callers get clones from [`EventChannelRegistry::publisher`]; only the
/// registry can close the underlying client.
///
/// [`EventChannelRegistry::publisher`]: crate::EventChannelRegistry::publisher
#[derive(Clone)]
pub struct Publisher {
    topic: Arc<str>,
    client: Arc<dyn ProducerClient>,
}

impl Publisher {
    pub(crate) fn new(topic: &str, client: Arc<dyn ProducerClient>) -> Self {
        Self {
            topic: Arc::from(topic),
            client,
        }
    }

    /// Topic this publisher is bound to.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Send raw bytes.
    pub async fn send(&self, key: &[u8], value: &[u8]) -> Result<(), BrokerError> {
        match self.client.send(key, value).await {
            Ok(()) => {
                metric_inc!(MESSAGES_PUBLISHED, &[self.topic()]);
                debug!(topic = %self.topic, bytes = value.len(), "Message published");
                Ok(())
            }
            Err(e) => {
                warn!(topic = %self.topic, error = %e, "Publish failed");
                Err(e)
            }
        }
    }

    /// Serialize `envelope` and send it keyed by its event id.
    pub async fn publish<T: Serialize + Sync>(
        &self,
        envelope: &EventEnvelope<T>,
    ) -> Result<(), BrokerError> {
        let value = envelope.to_json_bytes().map_err(BrokerError::Encode)?;
        let key = envelope.event_id.to_string();
        self.send(key.as_bytes(), &value).await
    }

    /// Whether both handles share the same underlying client.
    #[must_use]
    pub fn same_handle(&self, other: &Publisher) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.client), Arc::as_ptr(&other.client))
    }

    pub(crate) async fn close(&self) -> Result<(), BrokerError> {
        self.client.close().await
    }
}

impl fmt::Debug for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("topic", &self.topic)
            .finish_non_exhaustive()
    }
}
