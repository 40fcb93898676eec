//! Sales service and its inputs.

mod commands;
mod picker;
mod service;

pub use commands::{CreateSale, ListSales, TransitionSale};
pub use picker::{FixedStatusPicker, RandomStatusPicker, StatusPicker};
pub use service::SalesService;
