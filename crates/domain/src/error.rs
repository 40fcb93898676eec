//! Domain error types.

use sale_store::StoreError;
use thiserror::Error;

use crate::{OwnerId, SaleId, SaleStatus};

/// Errors that can occur during sales operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SalesError {
    /// Amount is not a positive, finite number.
    #[error("invalid amount: {amount} (must be greater than 0)")]
    InvalidAmount { amount: f64 },

    /// Status is not one of pending, approved or rejected.
    #[error("invalid status: {status:?}")]
    InvalidStatus { status: String },

    /// Sale ID is empty.
    #[error("empty sale ID")]
    EmptyKey,

    /// No sale exists with the given ID.
    #[error("sale not found: {0}")]
    SaleNotFound(SaleId),

    /// The owner directory reports that the owner does not exist.
    #[error("owner not found: {0}")]
    OwnerNotFound(OwnerId),

    /// The owner directory could not be reached.
    #[error("owner lookup failed for {owner_id}: {reason}")]
    OwnerLookup { owner_id: OwnerId, reason: String },

    /// The requested status change is not allowed from the current status.
    #[error("invalid status transition: cannot move from {from} to {to}")]
    InvalidTransition { from: SaleStatus, to: SaleStatus },

    /// The sale changed since the caller last read it.
    #[error("version conflict for sale {sale_id}: expected {expected}, found {actual}")]
    VersionConflict {
        sale_id: SaleId,
        expected: u64,
        actual: u64,
    },
}

impl SalesError {
    /// Returns true for errors caused by malformed caller input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SalesError::InvalidAmount { .. } | SalesError::InvalidStatus { .. } | SalesError::EmptyKey
        )
    }

    /// Returns true for well-formed requests rejected because of current state.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            SalesError::InvalidTransition { .. } | SalesError::VersionConflict { .. }
        )
    }
}

impl From<StoreError> for SalesError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmptyKey => SalesError::EmptyKey,
            StoreError::NotFound(id) => SalesError::SaleNotFound(id),
            StoreError::VersionMismatch {
                sale_id,
                expected,
                actual,
            } => SalesError::VersionConflict {
                sale_id,
                expected,
                actual,
            },
        }
    }
}
