//! Sale entity model and identifier types shared by every crate in the
//! sales workspace.

pub mod sale;
pub mod types;

pub use sale::{InvalidStatus, Sale, SaleStatus};
pub use types::{OwnerId, SaleId};
