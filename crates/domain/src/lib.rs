//! Domain layer for the sales service.
//!
//! This crate provides:
//! - [`SalesService`] for creating, listing and transitioning sales
//! - [`OwnerDirectory`] for checking that a sale's owner exists
//! - [`StatusPicker`] for deciding the status a new sale starts in

pub mod error;
pub mod owner;
pub mod sale;

pub use common::{OwnerId, Sale, SaleId, SaleStatus};
pub use error::SalesError;
pub use owner::{
    HttpOwnerDirectory, InMemoryOwnerDirectory, OwnerDirectory, OwnerLookupError, RetryPolicy,
};
pub use sale::{
    CreateSale, FixedStatusPicker, ListSales, RandomStatusPicker, SalesService, StatusPicker,
    TransitionSale,
};
