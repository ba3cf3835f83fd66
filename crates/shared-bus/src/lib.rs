//! # Shared Bus - Broker Channel Registry
//!
//! Lazily provisions and reuses message-broker clients for the warehouse
//! services.
//!
//! ```text
//!   application code                     background consumer
//!         │ publisher("shipment-events")        │ subscriber("scan-events", "analytics")
//!         ▼                                      ▼
//!   ┌──────────────────────────────────────────────────┐
//!   │              EventChannelRegistry                │
//!   │  topic ──► Publisher     (topic, group) ──► Subscriber
//!   └───────────────────────┬──────────────────────────┘
//!                           │ BrokerConnector
//!                           ▼
//!                 broker client (in-memory, ...)
//! ```
//!
//! ## Ownership
//!
//! - Handles are owned by the registry; callers hold clones and never close them.
//! - `close_all` shuts every handle down and reports all failures.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod broker;
pub mod config;
pub mod errors;
pub mod memory;
pub mod publisher;
pub mod registry;
pub mod subscriber;

// Re-export main types
pub use broker::{BrokerConnector, BrokerMessage, ConsumerClient, ProducerClient};
pub use config::BusConfig;
pub use errors::{BrokerError, ChannelKind, CloseFailure};
pub use memory::InMemoryBroker;
pub use publisher::Publisher;
pub use registry::{EventChannelRegistry, ShutdownReport};
pub use subscriber::{Subscriber, SubscriberKey};

/// Maximum messages buffered per in-memory consumer before it lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
