//! # Broker Ports
//!
//! The seam between the channel registry and whatever broker client backs
//! it. A connector builds clients; it must not block on the network while
//! doing so, since the registry calls it while holding its lock.

use crate::errors::BrokerError;
use async_trait::async_trait;
use std::sync::Arc;

/// A message as delivered by the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerMessage {
    /// Topic the message was read from.
    pub topic: String,
    /// Position within the topic.
    pub offset: u64,
    /// Partitioning key.
    pub key: Vec<u8>,
    /// Encoded payload.
    pub value: Vec<u8>,
}

/// Sending side of a broker client, bound to one topic.
#[async_trait]
pub trait ProducerClient: Send + Sync {
    /// Send one keyed message.
    async fn send(&self, key: &[u8], value: &[u8]) -> Result<(), BrokerError>;

    /// Flush and release the client.
    async fn close(&self) -> Result<(), BrokerError>;
}

/// Receiving side of a broker client, bound to one topic and consumer group.
#[async_trait]
pub trait ConsumerClient: Send + Sync {
    /// Wait for the next message.
    async fn recv(&self) -> Result<BrokerMessage, BrokerError>;

    /// Mark `message` (and everything before it) as processed for the group.
    async fn commit(&self, message: &BrokerMessage) -> Result<(), BrokerError>;

    /// Leave the group and release the client.
    async fn close(&self) -> Result<(), BrokerError>;
}

/// Factory for broker clients.
pub trait BrokerConnector: Send + Sync {
    /// Build a producer for `topic` against `brokers`.
    fn producer(
        &self,
        brokers: &[String],
        topic: &str,
    ) -> Result<Arc<dyn ProducerClient>, BrokerError>;

    /// Build a consumer for `topic` in consumer group `group`.
    fn consumer(
        &self,
        brokers: &[String],
        topic: &str,
        group: &str,
    ) -> Result<Arc<dyn ConsumerClient>, BrokerError>;
}
