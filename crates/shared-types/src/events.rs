//! # Domain Events
//!
//! Event type tags and topics for everything the warehouse services publish,
//! plus the payload shapes carried in an envelope's `data` field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Broker topics, one per event family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    #[serde(rename = "inventory-events")]
    Inventory,
    #[serde(rename = "shipment-events")]
    Shipment,
    #[serde(rename = "scan-events")]
    Scan,
    #[serde(rename = "user-events")]
    User,
}

impl EventTopic {
    /// Topic name as registered on the broker.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventTopic::Inventory => "inventory-events",
            EventTopic::Shipment => "shipment-events",
            EventTopic::Scan => "scan-events",
            EventTopic::User => "user-events",
        }
    }
}

impl fmt::Display for EventTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All event type tags that can appear in an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    // =========================================================================
    // INVENTORY
    // =========================================================================
    ItemCreated,
    ItemUpdated,
    ItemDeleted,
    StockUpdated,

    // =========================================================================
    // SHIPMENT
    // =========================================================================
    ShipmentCreated,
    ShipmentUpdated,
    ShipmentStatusChanged,
    ShipmentDelivered,

    // =========================================================================
    // SCAN
    // =========================================================================
    BarcodeScanned,
    ValidationSuccess,
    ValidationFailure,

    // =========================================================================
    // USER
    // =========================================================================
    UserLogin,
    UserLogout,
    UserCreated,
    PermissionChanged,
}

impl EventType {
    /// Wire tag, e.g. `shipment_status_changed`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventType::ItemCreated => "item_created",
            EventType::ItemUpdated => "item_updated",
            EventType::ItemDeleted => "item_deleted",
            EventType::StockUpdated => "stock_updated",
            EventType::ShipmentCreated => "shipment_created",
            EventType::ShipmentUpdated => "shipment_updated",
            EventType::ShipmentStatusChanged => "shipment_status_changed",
            EventType::ShipmentDelivered => "shipment_delivered",
            EventType::BarcodeScanned => "barcode_scanned",
            EventType::ValidationSuccess => "validation_success",
            EventType::ValidationFailure => "validation_failure",
            EventType::UserLogin => "user_login",
            EventType::UserLogout => "user_logout",
            EventType::UserCreated => "user_created",
            EventType::PermissionChanged => "permission_changed",
        }
    }

    /// Topic this event type is published on.
    #[must_use]
    pub const fn topic(&self) -> EventTopic {
        match self {
            EventType::ItemCreated
            | EventType::ItemUpdated
            | EventType::ItemDeleted
            | EventType::StockUpdated => EventTopic::Inventory,
            EventType::ShipmentCreated
            | EventType::ShipmentUpdated
            | EventType::ShipmentStatusChanged
            | EventType::ShipmentDelivered => EventTopic::Shipment,
            EventType::BarcodeScanned
            | EventType::ValidationSuccess
            | EventType::ValidationFailure => EventTopic::Scan,
            EventType::UserLogin
            | EventType::UserLogout
            | EventType::UserCreated
            | EventType::PermissionChanged => EventTopic::User,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inventory change (create, update, delete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEvent {
    pub item_id: String,
    pub action: String,
    #[serde(default)]
    pub changes: Map<String, Value>,
    pub user_id: String,
}

/// Shipment change (created, updated, status_changed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentEvent {
    pub shipment_id: String,
    pub action: String,
    #[serde(default)]
    pub changes: Map<String, Value>,
    pub user_id: String,
}

/// A single barcode scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEvent {
    pub scan_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub scan_type: String,
    pub result: String,
    pub location: String,
    pub device_id: String,
}

/// User lifecycle (login, logout, permission_change).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEvent {
    pub user_id: String,
    pub action: String,
    #[serde(default)]
    pub changes: Map<String, Value>,
}
