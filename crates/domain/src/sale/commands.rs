//! Sales commands and queries.

use crate::{OwnerId, SaleId};

/// Command to record a new sale for an owner.
#[derive(Debug, Clone)]
pub struct CreateSale {
    /// The user the sale belongs to.
    pub owner_id: OwnerId,

    /// Sale amount; must be greater than zero.
    pub amount: f64,
}

impl CreateSale {
    pub fn new(owner_id: impl Into<OwnerId>, amount: f64) -> Self {
        Self {
            owner_id: owner_id.into(),
            amount,
        }
    }
}

/// Query for the sales of one owner, optionally narrowed to a status.
#[derive(Debug, Clone)]
pub struct ListSales {
    pub owner_id: OwnerId,

    /// Raw status filter as supplied by the caller. `None` and the empty
    /// string both mean "every status".
    pub status: Option<String>,
}

impl ListSales {
    /// Lists every sale of `owner_id`.
    pub fn for_owner(owner_id: impl Into<OwnerId>) -> Self {
        Self {
            owner_id: owner_id.into(),
            status: None,
        }
    }

    /// Narrows the listing to sales whose status is `status`.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Command to move a sale to a new status.
#[derive(Debug, Clone)]
pub struct TransitionSale {
    pub sale_id: SaleId,

    /// Raw target status as supplied by the caller.
    pub status: String,

    /// Version the caller last saw. When set, the transition is refused if
    /// the stored sale has moved on.
    pub expected_version: Option<u64>,
}

impl TransitionSale {
    pub fn new(sale_id: impl Into<SaleId>, status: impl Into<String>) -> Self {
        Self {
            sale_id: sale_id.into(),
            status: status.into(),
            expected_version: None,
        }
    }

    /// Requires the stored sale to be at `version`.
    pub fn expecting_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }
}
