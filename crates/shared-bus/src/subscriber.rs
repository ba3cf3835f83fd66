//! # Subscriber Handle
//!
//! Registry-owned receiving side of a (topic, consumer group) pair.

use crate::broker::{BrokerMessage, ConsumerClient};
use crate::errors::BrokerError;
use serde::de::DeserializeOwned;
use shared_types::EventEnvelope;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry key for a subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberKey {
    pub topic: String,
    pub group: String,
}

impl SubscriberKey {
    pub fn new(topic: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            group: group.into(),
        }
    }
}

impl fmt::Display for SubscriberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.topic, self.group)
    }
}

/// Handle for consuming a topic as a member of one consumer group.
#[derive(Clone)]
pub struct Subscriber {
    key: Arc<SubscriberKey>,
    client: Arc<dyn ConsumerClient>,
}

impl Subscriber {
    pub(crate) fn new(key: SubscriberKey, client: Arc<dyn ConsumerClient>) -> Self {
        Self {
            key: Arc::new(key),
            client,
        }
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.key.topic
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.key.group
    }

    /// Wait for the next raw message.
    pub async fn recv(&self) -> Result<BrokerMessage, BrokerError> {
        let message = self.client.recv().await?;
        debug!(
            topic = %self.key.topic,
            group = %self.key.group,
            offset = message.offset,
            "Message received"
        );
        Ok(message)
    }

    /// Wait for the next message and decode it as an envelope.
    ///
    /// Returns the raw message alongside so the caller can commit it.
    pub async fn recv_envelope<T: DeserializeOwned>(
        &self,
    ) -> Result<(EventEnvelope<T>, BrokerMessage), BrokerError> {
        let message = self.recv().await?;
        match EventEnvelope::from_json_slice(&message.value) {
            Ok(envelope) => Ok((envelope, message)),
            Err(e) => {
                warn!(
                    topic = %self.key.topic,
                    offset = message.offset,
                    error = %e,
                    "Undecodable envelope"
                );
                Err(BrokerError::Decode(e))
            }
        }
    }

    pub async fn commit(&self, message: &BrokerMessage) -> Result<(), BrokerError> {
        self.client.commit(message).await
    }

    /// Whether both handles share the same underlying client.
    #[must_use]
    pub fn same_handle(&self, other: &Subscriber) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.client), Arc::as_ptr(&other.client))
    }

    pub(crate) async fn close(&self) -> Result<(), BrokerError> {
        self.client.close().await
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("topic", &self.key.topic)
            .field("group", &self.key.group)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared_types::EventType;

    struct FixedConsumer {
        value: Vec<u8>,
    }

    #[async_trait]
    impl ConsumerClient for FixedConsumer {
        async fn recv(&self) -> Result<BrokerMessage, BrokerError> {
            Ok(BrokerMessage {
                topic: "user-events".to_string(),
                offset: 7,
                key: Vec::new(),
                value: self.value.clone(),
            })
        }

        async fn commit(&self, _message: &BrokerMessage) -> Result<(), BrokerError> {
            Ok(())
        }

        async fn close(&self) -> Result<(), BrokerError> {
            Ok(())
        }
    }

    fn subscriber_with(value: &[u8]) -> Subscriber {
        Subscriber::new(
            SubscriberKey::new("user-events", "audit"),
            Arc::new(FixedConsumer {
                value: value.to_vec(),
            }),
        )
    }

    #[tokio::test]
    async fn test_recv_envelope_decodes() {
        let envelope = EventEnvelope::wrap(EventType::UserLogin, serde_json::json!({"userId": "USR-2024-001"}));
        let subscriber = subscriber_with(&envelope.to_json_bytes().unwrap());

        let (decoded, message) = subscriber.recv_envelope::<serde_json::Value>().await.unwrap();
        assert_eq!(decoded.event_id, envelope.event_id);
        assert_eq!(decoded.event_type, EventType::UserLogin);
        assert_eq!(message.offset, 7);
    }

    #[tokio::test]
    async fn test_recv_envelope_rejects_garbage() {
        let subscriber = subscriber_with(b"not json");
        let result = subscriber.recv_envelope::<serde_json::Value>().await;
        assert!(matches!(result, Err(BrokerError::Decode(_))));
    }

    #[test]
    fn test_key_display() {
        let subscriber = subscriber_with(b"");
        assert_eq!(subscriber.topic(), "user-events");
        assert_eq!(subscriber.group(), "audit");
        assert_eq!(SubscriberKey::new("a", "b").to_string(), "a/b");
    }
}
