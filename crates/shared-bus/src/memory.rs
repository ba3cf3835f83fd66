//! # In-Memory Broker
//!
//! A `BrokerConnector` backed by `tokio::sync::broadcast`, one channel per
//! topic. Suitable for single-process deployments and tests; distributed
//! deployments plug a real broker client in behind the same ports.
//!
//! ## Semantics
//!
//! - Offsets increase monotonically per topic, starting at 0.
//! - Each consumer client holds its own receiver, so every consumer group
//!   sees every message published after it subscribed (fan-out).
//! - Messages published while a topic has no consumers are dropped.
//! - A closed client fails every later call with `BrokerError::Closed`.
//! - Nothing is persisted, so `commit` only checks the message belongs to
//!   the consumer's topic. Offsets are not tracked.
//! - A capacity of 0 is raised to 1.

use crate::broker::{BrokerConnector, BrokerMessage, ConsumerClient, ProducerClient};
use crate::errors::BrokerError;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

struct TopicLog {
    sender: broadcast::Sender<BrokerMessage>,
    next_offset: u64,
}

#[derive(Default)]
struct BrokerState {
    topics: HashMap<String, TopicLog>,
}

impl BrokerState {
    fn topic_mut(&mut self, topic: &str, capacity: usize) -> &mut TopicLog {
        self.topics.entry(topic.to_string()).or_insert_with(|| {
            let (sender, _) = broadcast::channel(capacity);
            TopicLog {
                sender,
                next_offset: 0,
            }
        })
    }
}

/// Process-local broker. Clones share the same topics.
#[derive(Clone)]
pub struct InMemoryBroker {
    state: Arc<Mutex<BrokerState>>,
    capacity: usize,
}

impl InMemoryBroker {
    /// Create a broker with default per-topic capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a broker buffering at most `capacity` messages per consumer.
    /// Zero is raised to 1.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(BrokerState::default())),
            capacity: capacity.max(1),
        }
    }

    /// Total messages ever accepted on `topic`.
    #[must_use]
    pub fn published(&self, topic: &str) -> u64 {
        self.state
            .lock()
            .topics
            .get(topic)
            .map_or(0, |log| log.next_offset)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl BrokerConnector for InMemoryBroker {
    fn producer(
        &self,
        brokers: &[String],
        topic: &str,
    ) -> Result<Arc<dyn ProducerClient>, BrokerError> {
        debug!(brokers = ?brokers, topic = %topic, "In-memory producer created");
        Ok(Arc::new(InMemoryProducer {
            topic: topic.to_string(),
            broker: self.clone(),
            closed: AtomicBool::new(false),
        }))
    }

    fn consumer(
        &self,
        brokers: &[String],
        topic: &str,
        group: &str,
    ) -> Result<Arc<dyn ConsumerClient>, BrokerError> {
        let receiver = self
            .state
            .lock()
            .topic_mut(topic, self.capacity)
            .sender
            .subscribe();
        let (closed, _) = watch::channel(false);

        debug!(brokers = ?brokers, topic = %topic, group = %group, "In-memory consumer created");
        Ok(Arc::new(InMemoryConsumer {
            topic: topic.to_string(),
            group: group.to_string(),
            receiver: tokio::sync::Mutex::new(receiver),
            closed,
        }))
    }
}

struct InMemoryProducer {
    topic: String,
    broker: InMemoryBroker,
    closed: AtomicBool,
}

#[async_trait]
impl ProducerClient for InMemoryProducer {
    async fn send(&self, key: &[u8], value: &[u8]) -> Result<(), BrokerError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BrokerError::Closed {
                topic: self.topic.clone(),
            });
        }

        let mut state = self.broker.state.lock();
        let log = state.topic_mut(&self.topic, self.broker.capacity);
        let message = BrokerMessage {
            topic: self.topic.clone(),
            offset: log.next_offset,
            key: key.to_vec(),
            value: value.to_vec(),
        };
        log.next_offset += 1;

        if log.sender.send(message).is_err() {
            debug!(topic = %self.topic, "Message dropped (no consumers)");
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), BrokerError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(BrokerError::Closed {
                topic: self.topic.clone(),
            });
        }
        Ok(())
    }
}

struct InMemoryConsumer {
    topic: String,
    group: String,
    receiver: tokio::sync::Mutex<broadcast::Receiver<BrokerMessage>>,
    closed: watch::Sender<bool>,
}

impl InMemoryConsumer {
    fn closed_error(&self) -> BrokerError {
        BrokerError::Closed {
            topic: self.topic.clone(),
        }
    }
}

async fn next_message(
    receiver: &mut broadcast::Receiver<BrokerMessage>,
    topic: &str,
    group: &str,
) -> Result<BrokerMessage, BrokerError> {
    loop {
        match receiver.recv().await {
            Ok(message) => return Ok(message),
            Err(broadcast::error::RecvError::Lagged(count)) => {
                warn!(topic = %topic, group = %group, lagged = count, "Consumer lagged, messages dropped");
            }
            Err(broadcast::error::RecvError::Closed) => {
                return Err(BrokerError::Receive {
                    topic: topic.to_string(),
                    reason: "topic channel closed".to_string(),
                })
            }
        }
    }
}

#[async_trait]
impl ConsumerClient for InMemoryConsumer {
    async fn recv(&self) -> Result<BrokerMessage, BrokerError> {
        let mut closed = self.closed.subscribe();
        if *closed.borrow_and_update() {
            return Err(self.closed_error());
        }

        let mut receiver = self.receiver.lock().await;
        tokio::select! {
            biased;
            _ = closed.changed() => Err(self.closed_error()),
            message = next_message(&mut *receiver, &self.topic, &self.group) => message,
        }
    }

    async fn commit(&self, message: &BrokerMessage) -> Result<(), BrokerError> {
        if *self.closed.borrow() {
            return Err(self.closed_error());
        }
        if message.topic != self.topic {
            return Err(BrokerError::Commit {
                topic: self.topic.clone(),
                reason: format!("message belongs to {}", message.topic),
            });
        }
        debug!(topic = %self.topic, group = %self.group, offset = message.offset, "Offset committed");
        Ok(())
    }

    async fn close(&self) -> Result<(), BrokerError> {
        if self.closed.send_replace(true) {
            return Err(self.closed_error());
        }
        debug!(topic = %self.topic, group = %self.group, "Consumer left group");
        Ok(())
    }
}
