//! # Permission Tiers and Roles
//!
//! The single authoritative tier table for the whole mesh. Every tier check,
//! whether it starts from a token claim or a stored user record, goes through
//! [`tier_rank`] and [`has_permission`].
//!
//! ## Ordering
//!
//! ```text
//! <unknown> (0) < level_1 < level_2 < level_3 < level_4 < level_5
//! ```
//!
//! Unknown strings are accepted as input and rank 0, so they never satisfy
//! any requirement.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tier name → rank. Rank 0 is reserved for unrecognized names.
pub const TIER_RANKS: [(&str, u8); 5] = [
    ("level_1", 1),
    ("level_2", 2),
    ("level_3", 3),
    ("level_4", 4),
    ("level_5", 5),
];

/// Rank of a tier string; 0 when the string is not a known tier.
#[must_use]
pub fn tier_rank(tier: &str) -> u8 {
    TIER_RANKS
        .iter()
        .find(|(name, _)| *name == tier)
        .map_or(0, |(_, rank)| *rank)
}

/// Whether a holder of `actual` may perform an action gated at `required`.
#[must_use]
pub fn has_permission(actual: &str, required: &str) -> bool {
    tier_rank(actual) >= tier_rank(required)
}

/// Error returned when parsing an unknown tier or role name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseLevelError {
    #[error("Unknown access tier: {0}")]
    UnknownTier(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// Typed access tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessTier {
    /// Basic scanner access.
    #[serde(rename = "level_1")]
    Level1,
    /// Warehouse operator.
    #[serde(rename = "level_2")]
    Level2,
    /// Supervisor.
    #[serde(rename = "level_3")]
    Level3,
    /// Manager.
    #[serde(rename = "level_4")]
    Level4,
    /// Admin.
    #[serde(rename = "level_5")]
    Level5,
}

impl AccessTier {
    /// All tiers, lowest first.
    pub const ALL: [AccessTier; 5] = [
        AccessTier::Level1,
        AccessTier::Level2,
        AccessTier::Level3,
        AccessTier::Level4,
        AccessTier::Level5,
    ];

    /// Wire name (`level_1` .. `level_5`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AccessTier::Level1 => "level_1",
            AccessTier::Level2 => "level_2",
            AccessTier::Level3 => "level_3",
            AccessTier::Level4 => "level_4",
            AccessTier::Level5 => "level_5",
        }
    }

    /// Numeric rank from [`TIER_RANKS`].
    #[must_use]
    pub fn rank(&self) -> u8 {
        tier_rank(self.as_str())
    }

    /// Whether this tier meets `required`.
    #[must_use]
    pub fn satisfies(&self, required: AccessTier) -> bool {
        has_permission(self.as_str(), required.as_str())
    }
}

impl fmt::Display for AccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessTier {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccessTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| ParseLevelError::UnknownTier(s.to_string()))
    }
}

/// Roles a warehouse user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    WarehouseOperator,
    ScannerUser,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::WarehouseOperator => "warehouse_operator",
            Role::ScannerUser => "scanner_user",
        }
    }

    /// Tier a freshly provisioned user of this role normally receives.
    #[must_use]
    pub const fn default_tier(&self) -> AccessTier {
        match self {
            Role::Admin => AccessTier::Level5,
            Role::Manager => AccessTier::Level4,
            Role::WarehouseOperator => AccessTier::Level2,
            Role::ScannerUser => AccessTier::Level1,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "warehouse_operator" => Ok(Role::WarehouseOperator),
            "scanner_user" => Ok(Role::ScannerUser),
            other => Err(ParseLevelError::UnknownRole(other.to_string())),
        }
    }
}
