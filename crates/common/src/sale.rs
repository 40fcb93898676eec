//! Sale record and its status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{OwnerId, SaleId};

/// The settlement status of a sale.
///
/// State transitions:
/// ```text
/// Pending ──┬──► Approved
///           └──► Rejected
/// ```
/// A sale may also be created directly in a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    /// Settlement outcome not decided yet.
    Pending,

    /// Settled successfully (terminal state).
    Approved,

    /// Settlement refused (terminal state).
    Rejected,
}

impl SaleStatus {
    /// Every status, in canonical order.
    pub const ALL: [SaleStatus; 3] = [
        SaleStatus::Pending,
        SaleStatus::Approved,
        SaleStatus::Rejected,
    ];

    /// Returns true if a sale in this state may move to `target`.
    pub fn can_transition_to(&self, target: SaleStatus) -> bool {
        matches!(
            (self, target),
            (SaleStatus::Pending, SaleStatus::Approved | SaleStatus::Rejected)
        )
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, SaleStatus::Approved | SaleStatus::Rejected)
    }

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Pending => "pending",
            SaleStatus::Approved => "approved",
            SaleStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string is not one of the canonical status names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid status: {0:?}")]
pub struct InvalidStatus(pub String);

impl std::str::FromStr for SaleStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SaleStatus::Pending),
            "approved" => Ok(SaleStatus::Approved),
            "rejected" => Ok(SaleStatus::Rejected),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// A sale belonging to an owner.
///
/// Plain data: construction and mutation rules live in the sales service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub owner_id: OwnerId,
    pub amount: f64,
    pub status: SaleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: u64,
}
