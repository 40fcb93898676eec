//! Read-side views over sale listings.
//!
//! Views here are pure functions of the sales handed to them; they hold no
//! state between calls.

pub mod views;

pub use views::{SalesReport, SalesSummary};
