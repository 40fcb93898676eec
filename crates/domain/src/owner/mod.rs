//! Owner existence checks against the external user directory.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::OwnerId;

pub use http::{HttpOwnerDirectory, RetryPolicy};
pub use memory::InMemoryOwnerDirectory;

/// Errors raised when the owner directory cannot give a definitive answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnerLookupError {
    /// The directory could not be reached or answered with a server error.
    #[error("owner directory unavailable: {0}")]
    Unavailable(String),

    /// The directory client could not be built.
    #[error("owner directory misconfigured: {0}")]
    Setup(String),
}

/// Answers whether a user exists.
///
/// `Ok(false)` is a definitive "no such owner"; errors mean the question
/// could not be answered.
#[async_trait]
pub trait OwnerDirectory: Send + Sync {
    async fn exists(&self, owner_id: &OwnerId) -> Result<bool, OwnerLookupError>;
}
