//! Read model views.

pub mod sales_summary;

pub use sales_summary::{SalesReport, SalesSummary};
