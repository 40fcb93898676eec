//! Per-status counts and totals over a list of sales.

use common::{Sale, SaleStatus};
use serde::{Deserialize, Serialize};

/// Aggregate figures for a list of sales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub quantity: usize,
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
    /// Sum of every amount, whatever the status.
    pub total_amount: f64,
}

impl SalesSummary {
    /// Computes the summary of `sales`. An empty slice gives all zeros.
    pub fn from_sales(sales: &[Sale]) -> Self {
        sales.iter().fold(Self::default(), |mut summary, sale| {
            summary.quantity += 1;
            summary.total_amount += sale.amount;
            match sale.status {
                SaleStatus::Approved => summary.approved += 1,
                SaleStatus::Rejected => summary.rejected += 1,
                SaleStatus::Pending => summary.pending += 1,
            }
            summary
        })
    }
}

/// A sales listing together with its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub metadata: SalesSummary,
    pub results: Vec<Sale>,
}

impl SalesReport {
    pub fn new(results: Vec<Sale>) -> Self {
        Self {
            metadata: SalesSummary::from_sales(&results),
            results,
        }
    }
}
