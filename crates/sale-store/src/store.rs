use async_trait::async_trait;

use crate::{OwnerId, Result, Sale, SaleId, SaleStatus};

/// Core trait for sale store implementations.
///
/// A sale store holds the authoritative copy of every sale, keyed by ID.
/// All implementations must be thread-safe (Send + Sync).
///
/// Listing operations return sales ordered by `created_at`, then by ID, so
/// the same store state always yields the same sequence.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Inserts or overwrites a sale by its ID.
    ///
    /// Fails with `EmptyKey` if the sale has an empty ID.
    async fn set(&self, sale: Sale) -> Result<()>;

    /// Writes a sale only if the stored copy is at `expected_version`.
    ///
    /// The check and the write happen atomically with respect to every
    /// other write on the store. Fails with `NotFound` if nothing is
    /// stored under the ID and `VersionMismatch` if the stored version
    /// differs.
    async fn replace(&self, sale: Sale, expected_version: u64) -> Result<()>;

    /// Retrieves a sale by ID.
    async fn read(&self, id: &SaleId) -> Result<Sale>;

    /// Removes a sale by ID, failing with `NotFound` if it is absent.
    async fn delete(&self, id: &SaleId) -> Result<()>;

    /// Retrieves every sale belonging to `owner_id`.
    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Sale>>;

    /// Retrieves the sales belonging to `owner_id` whose status is `status`.
    async fn list_by_owner_and_status(
        &self,
        owner_id: &OwnerId,
        status: SaleStatus,
    ) -> Result<Vec<Sale>>;
}

/// Sorts sales into the listing order shared by every store.
pub fn sort_for_listing(sales: &mut [Sale]) {
    sales.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
}
