pub mod error;
pub mod memory;
pub mod store;

pub use common::{OwnerId, Sale, SaleId, SaleStatus};
pub use error::{Result, StoreError};
pub use memory::InMemorySaleStore;
pub use store::SaleStore;
