//! # Event Channel Registry
//!
//! Lazily creates broker clients and hands out shared handles.
//!
//! ## Invariants
//!
//! - At most one publisher per topic for the registry's lifetime.
//! - At most one subscriber per (topic, group) for the registry's lifetime.
//! - Lookup-or-create runs under a single lock guarding both maps, so
//!   concurrent first calls for the same key construct exactly one client.
//! - `close_all` attempts every handle, even after failures, and reports
//!   all of them.

use crate::broker::BrokerConnector;
use crate::config::BusConfig;
use crate::errors::{BrokerError, ChannelKind, CloseFailure};
use crate::publisher::Publisher;
use crate::subscriber::{Subscriber, SubscriberKey};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use wh_telemetry::{metric_inc, CHANNELS_CREATED, CLOSE_FAILURES};

#[derive(Default)]
struct Channels {
    publishers: HashMap<String, Publisher>,
    subscribers: HashMap<SubscriberKey, Subscriber>,
    closed: bool,
}

/// Outcome of [`EventChannelRegistry::close_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Number of handles a close was attempted on.
    pub attempted: usize,
    /// Every handle that failed to close.
    pub failures: Vec<CloseFailure>,
}

impl ShutdownReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// `Err(BrokerError::Shutdown)` carrying every failure, if any.
    pub fn into_result(self) -> Result<usize, BrokerError> {
        if self.failures.is_empty() {
            Ok(self.attempted)
        } else {
            Err(BrokerError::Shutdown {
                failures: self.failures,
            })
        }
    }
}

/// Registry of publishers and subscribers over a fixed broker list.
pub struct EventChannelRegistry<C> {
    brokers: Vec<String>,
    connector: C,
    channels: Mutex<Channels>,
}

impl<C: BrokerConnector> EventChannelRegistry<C> {
    /// Create a registry over `brokers`. The list must not be empty.
    pub fn new(brokers: Vec<String>, connector: C) -> Result<Self, BrokerError> {
        if brokers.is_empty() {
            return Err(BrokerError::NoBrokers);
        }
        info!(brokers = ?brokers, "Channel registry created");
        Ok(Self {
            brokers,
            connector,
            channels: Mutex::new(Channels::default()),
        })
    }

    pub fn from_config(config: &BusConfig, connector: C) -> Result<Self, BrokerError> {
        Self::new(config.brokers.clone(), connector)
    }

    /// Publisher for `topic`, created on first use.
    pub fn publisher(&self, topic: &str) -> Result<Publisher, BrokerError> {
        let mut channels = self.channels.lock();
        if channels.closed {
            return Err(BrokerError::RegistryClosed);
        }
        if let Some(existing) = channels.publishers.get(topic) {
            return Ok(existing.clone());
        }

        let client = self.connector.producer(&self.brokers, topic)?;
        let publisher = Publisher::new(topic, client);
        channels
            .publishers
            .insert(topic.to_string(), publisher.clone());

        metric_inc!(CHANNELS_CREATED, &[ChannelKind::Publisher.as_str()]);
        info!(topic = %topic, "Created publisher");
        Ok(publisher)
    }

    /// Subscriber for `topic` in consumer group `group`, created on first use.
    pub fn subscriber(&self, topic: &str, group: &str) -> Result<Subscriber, BrokerError> {
        let key = SubscriberKey::new(topic, group);

        let mut channels = self.channels.lock();
        if channels.closed {
            return Err(BrokerError::RegistryClosed);
        }
        if let Some(existing) = channels.subscribers.get(&key) {
            return Ok(existing.clone());
        }

        let client = self.connector.consumer(&self.brokers, topic, group)?;
        let subscriber = Subscriber::new(key.clone(), client);
        channels.subscribers.insert(key, subscriber.clone());

        metric_inc!(CHANNELS_CREATED, &[ChannelKind::Subscriber.as_str()]);
        info!(topic = %topic, group = %group, "Created subscriber");
        Ok(subscriber)
    }

    /// Close every handle this registry created.
    ///
    /// The registry stops handing out handles as soon as this is called.
    pub async fn close_all(&self) -> ShutdownReport {
        let (publishers, subscribers) = {
            let mut channels = self.channels.lock();
            channels.closed = true;
            (
                std::mem::take(&mut channels.publishers),
                std::mem::take(&mut channels.subscribers),
            )
        };

        let mut report = ShutdownReport::default();

        for (topic, publisher) in publishers {
            report.attempted += 1;
            if let Err(e) = publisher.close().await {
                warn!(topic = %topic, error = %e, "Error closing publisher");
                metric_inc!(CLOSE_FAILURES);
                report.failures.push(CloseFailure {
                    kind: ChannelKind::Publisher,
                    topic,
                    group: None,
                    reason: e.to_string(),
                });
            } else {
                debug!(topic = %topic, "Publisher closed");
            }
        }

        for (key, subscriber) in subscribers {
            report.attempted += 1;
            if let Err(e) = subscriber.close().await {
                warn!(subscriber = %key, error = %e, "Error closing subscriber");
                metric_inc!(CLOSE_FAILURES);
                report.failures.push(CloseFailure {
                    kind: ChannelKind::Subscriber,
                    topic: key.topic,
                    group: Some(key.group),
                    reason: e.to_string(),
                });
            } else {
                debug!(subscriber = %key, "Subscriber closed");
            }
        }

        info!(
            attempted = report.attempted,
            failed = report.failures.len(),
            "Channel registry closed"
        );
        report
    }

    #[must_use]
    pub fn brokers(&self) -> &[String] {
        &self.brokers
    }

    #[must_use]
    pub fn publisher_count(&self) -> usize {
        self.channels.lock().publishers.len()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.channels.lock().subscribers.len()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.channels.lock().closed
    }
}
