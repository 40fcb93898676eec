use thiserror::Error;

use crate::SaleId;

/// Errors that can occur when interacting with the sale store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The sale has no ID, so it cannot be keyed.
    #[error("empty sale ID")]
    EmptyKey,

    /// No sale is stored under the given ID.
    #[error("sale not found: {0}")]
    NotFound(SaleId),

    /// A conditional write found a different version than expected.
    #[error("version mismatch for sale {sale_id}: expected {expected}, found {actual}")]
    VersionMismatch {
        sale_id: SaleId,
        expected: u64,
        actual: u64,
    },
}

/// Result type for sale store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
