//! # Shared Types Crate
//!
//! Data shapes shared across the warehouse backbone:
//!
//! - **`EventEnvelope<T>`**: the transport wrapper for every domain event.
//! - **`EventType` / `EventTopic`**: the closed set of event tags and the
//!   broker topics they route to.
//! - **Tier table**: the one authoritative `level_N` → rank mapping and the
//!   `has_permission` predicate built on it.

pub mod envelope;
pub mod errors;
pub mod events;
pub mod tier;

pub use envelope::EventEnvelope;
pub use errors::EnvelopeError;
pub use events::{EventTopic, EventType, InventoryEvent, ScanEvent, ShipmentEvent, UserEvent};
pub use tier::{has_permission, tier_rank, AccessTier, ParseLevelError, Role, TIER_RANKS};
