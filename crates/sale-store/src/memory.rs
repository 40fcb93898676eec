use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{SaleStore, sort_for_listing};
use crate::{OwnerId, Result, Sale, SaleId, SaleStatus, StoreError};

/// In-memory sale store.
///
/// Contents live for the lifetime of the process. Clones share the same
/// underlying table.
#[derive(Clone, Default)]
pub struct InMemorySaleStore {
    sales: Arc<RwLock<HashMap<SaleId, Sale>>>,
}

impl InMemorySaleStore {
    /// Creates a new empty in-memory sale store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of sales stored.
    pub async fn len(&self) -> usize {
        self.sales.read().await.len()
    }

    /// Returns true if no sales are stored.
    pub async fn is_empty(&self) -> bool {
        self.sales.read().await.is_empty()
    }

    /// Removes every sale.
    pub async fn clear(&self) {
        self.sales.write().await.clear();
    }

    async fn collect<F>(&self, filter: F) -> Vec<Sale>
    where
        F: Fn(&Sale) -> bool,
    {
        let store = self.sales.read().await;
        let mut sales: Vec<_> = store.values().filter(|s| filter(s)).cloned().collect();
        sort_for_listing(&mut sales);
        sales
    }
}

#[async_trait]
impl SaleStore for InMemorySaleStore {
    async fn set(&self, sale: Sale) -> Result<()> {
        if sale.id.is_empty() {
            return Err(StoreError::EmptyKey);
        }

        self.sales.write().await.insert(sale.id.clone(), sale);
        Ok(())
    }

    async fn replace(&self, sale: Sale, expected_version: u64) -> Result<()> {
        if sale.id.is_empty() {
            return Err(StoreError::EmptyKey);
        }

        let mut store = self.sales.write().await;
        let current = store
            .get(&sale.id)
            .ok_or_else(|| StoreError::NotFound(sale.id.clone()))?;

        if current.version != expected_version {
            return Err(StoreError::VersionMismatch {
                sale_id: sale.id.clone(),
                expected: expected_version,
                actual: current.version,
            });
        }

        store.insert(sale.id.clone(), sale);
        Ok(())
    }

    async fn read(&self, id: &SaleId) -> Result<Sale> {
        self.sales
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn delete(&self, id: &SaleId) -> Result<()> {
        match self.sales.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id.clone())),
        }
    }

    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Sale>> {
        Ok(self.collect(|s| &s.owner_id == owner_id).await)
    }

    async fn list_by_owner_and_status(
        &self,
        owner_id: &OwnerId,
        status: SaleStatus,
    ) -> Result<Vec<Sale>> {
        Ok(self
            .collect(|s| &s.owner_id == owner_id && s.status == status)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn create_test_sale(id: &str, owner: &str, status: SaleStatus) -> Sale {
        let now = Utc::now();
        Sale {
            id: SaleId::new(id),
            owner_id: OwnerId::new(owner),
            amount: 10.0,
            status,
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    #[tokio::test]
    async fn set_and_read() {
        let store = InMemorySaleStore::new();
        let sale = create_test_sale("s-1", "u-1", SaleStatus::Pending);

        store.set(sale.clone()).await.unwrap();

        let stored = store.read(&SaleId::new("s-1")).await.unwrap();
        assert_eq!(stored, sale);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn set_upserts_by_id() {
        let store = InMemorySaleStore::new();
        let mut sale = create_test_sale("s-1", "u-1", SaleStatus::Pending);
        store.set(sale.clone()).await.unwrap();

        sale.status = SaleStatus::Approved;
        store.set(sale).await.unwrap();

        assert_eq!(store.len().await, 1);
        let stored = store.read(&SaleId::new("s-1")).await.unwrap();
        assert_eq!(stored.status, SaleStatus::Approved);
    }

    #[tokio::test]
    async fn set_rejects_empty_id() {
        let store = InMemorySaleStore::new();
        let sale = create_test_sale("", "u-1", SaleStatus::Pending);

        let result = store.set(sale).await;
        assert_eq!(result, Err(StoreError::EmptyKey));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let store = InMemorySaleStore::new();
        let result = store.read(&SaleId::new("missing")).await;
        assert_eq!(result, Err(StoreError::NotFound(SaleId::new("missing"))));
    }

    #[tokio::test]
    async fn delete_existing_and_missing() {
        let store = InMemorySaleStore::new();
        store
            .set(create_test_sale("s-1", "u-1", SaleStatus::Pending))
            .await
            .unwrap();

        store.delete(&SaleId::new("s-1")).await.unwrap();
        assert!(store.is_empty().await);

        let result = store.delete(&SaleId::new("s-1")).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn replace_with_matching_version() {
        let store = InMemorySaleStore::new();
        let mut sale = create_test_sale("s-1", "u-1", SaleStatus::Pending);
        store.set(sale.clone()).await.unwrap();

        sale.status = SaleStatus::Rejected;
        sale.version = 2;
        store.replace(sale, 1).await.unwrap();

        let stored = store.read(&SaleId::new("s-1")).await.unwrap();
        assert_eq!(stored.status, SaleStatus::Rejected);
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn replace_with_stale_version_leaves_sale_untouched() {
        let store = InMemorySaleStore::new();
        let original = create_test_sale("s-1", "u-1", SaleStatus::Pending);
        store.set(original.clone()).await.unwrap();

        let mut update = original.clone();
        update.status = SaleStatus::Approved;
        update.version = 3;
        let result = store.replace(update, 2).await;

        assert_eq!(
            result,
            Err(StoreError::VersionMismatch {
                sale_id: SaleId::new("s-1"),
                expected: 2,
                actual: 1,
            })
        );
        assert_eq!(store.read(&SaleId::new("s-1")).await.unwrap(), original);
    }

    #[tokio::test]
    async fn replace_missing_is_not_found() {
        let store = InMemorySaleStore::new();
        let sale = create_test_sale("s-1", "u-1", SaleStatus::Pending);
        let result = store.replace(sale, 1).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn list_by_owner_filters_and_orders() {
        let store = InMemorySaleStore::new();
        let base = Utc::now();

        let mut late = create_test_sale("a-late", "u-1", SaleStatus::Pending);
        late.created_at = base + Duration::seconds(10);
        let mut early = create_test_sale("z-early", "u-1", SaleStatus::Approved);
        early.created_at = base;
        let mut tie_b = create_test_sale("b-tie", "u-1", SaleStatus::Rejected);
        tie_b.created_at = base + Duration::seconds(5);
        let mut tie_a = create_test_sale("a-tie", "u-1", SaleStatus::Pending);
        tie_a.created_at = base + Duration::seconds(5);
        let other = create_test_sale("other", "u-2", SaleStatus::Pending);

        for sale in [late, early, tie_b, tie_a, other] {
            store.set(sale).await.unwrap();
        }

        let sales = store.list_by_owner(&OwnerId::new("u-1")).await.unwrap();
        let ids: Vec<_> = sales.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["z-early", "a-tie", "b-tie", "a-late"]);
    }

    #[tokio::test]
    async fn list_by_owner_unknown_is_empty() {
        let store = InMemorySaleStore::new();
        store
            .set(create_test_sale("s-1", "u-1", SaleStatus::Pending))
            .await
            .unwrap();

        let sales = store.list_by_owner(&OwnerId::new("nobody")).await.unwrap();
        assert!(sales.is_empty());
    }

    #[tokio::test]
    async fn list_by_owner_and_status() {
        let store = InMemorySaleStore::new();
        store
            .set(create_test_sale("s-1", "u-1", SaleStatus::Pending))
            .await
            .unwrap();
        store
            .set(create_test_sale("s-2", "u-1", SaleStatus::Approved))
            .await
            .unwrap();
        store
            .set(create_test_sale("s-3", "u-2", SaleStatus::Approved))
            .await
            .unwrap();

        let approved = store
            .list_by_owner_and_status(&OwnerId::new("u-1"), SaleStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, SaleId::new("s-2"));

        let rejected = store
            .list_by_owner_and_status(&OwnerId::new("u-1"), SaleStatus::Rejected)
            .await
            .unwrap();
        assert!(rejected.is_empty());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemorySaleStore::new();
        let clone = store.clone();
        store
            .set(create_test_sale("s-1", "u-1", SaleStatus::Pending))
            .await
            .unwrap();

        assert_eq!(clone.len().await, 1);
        clone.clear().await;
        assert!(store.is_empty().await);
    }
}
