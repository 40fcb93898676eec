//! Sales service providing creation, listing and status transitions.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sale_store::SaleStore;

use super::{CreateSale, ListSales, RandomStatusPicker, StatusPicker, TransitionSale};
use crate::error::SalesError;
use crate::owner::OwnerDirectory;
use crate::{Sale, SaleId, SaleStatus};

/// Service for managing sales.
///
/// The only component that constructs or mutates [`Sale`] records. Storage
/// failures are returned to the caller as-is; nothing is retried here.
pub struct SalesService<S: SaleStore> {
    store: S,
    owners: Arc<dyn OwnerDirectory>,
    picker: Arc<dyn StatusPicker>,
}

impl<S: SaleStore> SalesService<S> {
    /// Creates a service that draws initial statuses at random.
    pub fn new(store: S, owners: impl OwnerDirectory + 'static) -> Self {
        Self {
            store,
            owners: Arc::new(owners),
            picker: Arc::new(RandomStatusPicker),
        }
    }

    /// Replaces the strategy used to pick the status of new sales.
    pub fn with_status_picker(mut self, picker: impl StatusPicker + 'static) -> Self {
        self.picker = Arc::new(picker);
        self
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a new sale after confirming its owner exists.
    #[tracing::instrument(skip(self))]
    pub async fn create_sale(&self, cmd: CreateSale) -> Result<Sale, SalesError> {
        if !(cmd.amount.is_finite() && cmd.amount > 0.0) {
            tracing::warn!(owner_id = %cmd.owner_id, amount = cmd.amount, "rejected sale amount");
            metrics::counter!("sales_create_rejected_total", "reason" => "invalid_amount")
                .increment(1);
            return Err(SalesError::InvalidAmount { amount: cmd.amount });
        }

        match self.owners.exists(&cmd.owner_id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(owner_id = %cmd.owner_id, "owner does not exist");
                metrics::counter!("sales_create_rejected_total", "reason" => "owner_not_found")
                    .increment(1);
                return Err(SalesError::OwnerNotFound(cmd.owner_id));
            }
            Err(err) => {
                tracing::error!(owner_id = %cmd.owner_id, amount = cmd.amount, error = %err, "owner lookup failed");
                metrics::counter!("sales_create_rejected_total", "reason" => "owner_lookup")
                    .increment(1);
                return Err(SalesError::OwnerLookup {
                    owner_id: cmd.owner_id,
                    reason: err.to_string(),
                });
            }
        }

        let now = Utc::now();
        let sale = Sale {
            id: SaleId::generate(),
            owner_id: cmd.owner_id,
            amount: cmd.amount,
            status: self.picker.pick(),
            created_at: now,
            updated_at: now,
            version: 1,
        };

        self.store.set(sale.clone()).await.map_err(|e| {
            tracing::error!(sale_id = %sale.id, owner_id = %sale.owner_id, error = %e, "failed to store sale");
            SalesError::from(e)
        })?;

        tracing::info!(sale_id = %sale.id, owner_id = %sale.owner_id, status = %sale.status, amount = sale.amount, "sale created");
        metrics::counter!("sales_created_total", "status" => sale.status.as_str()).increment(1);
        Ok(sale)
    }

    /// Loads a sale by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_sale(&self, sale_id: &SaleId) -> Result<Sale, SalesError> {
        if sale_id.is_empty() {
            return Err(SalesError::EmptyKey);
        }
        Ok(self.store.read(sale_id).await?)
    }

    /// Lists an owner's sales, optionally filtered by status.
    ///
    /// An unknown status is rejected before the store is consulted. No
    /// matches yields an empty list.
    #[tracing::instrument(skip(self))]
    pub async fn list_sales(&self, query: ListSales) -> Result<Vec<Sale>, SalesError> {
        let status = match query.status.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_status(raw)?),
        };

        let result = match status {
            Some(status) => {
                self.store
                    .list_by_owner_and_status(&query.owner_id, status)
                    .await
            }
            None => self.store.list_by_owner(&query.owner_id).await,
        };

        result.map_err(|e| {
            tracing::error!(owner_id = %query.owner_id, status = ?query.status, error = %e, "failed to list sales");
            SalesError::from(e)
        })
    }

    /// Moves a pending sale to approved or rejected.
    ///
    /// The write is conditional on the version that was read, so of two
    /// concurrent transitions on the same sale at most one succeeds. A
    /// failed transition leaves the stored sale untouched.
    #[tracing::instrument(skip(self))]
    pub async fn transition_sale(&self, cmd: TransitionSale) -> Result<Sale, SalesError> {
        if cmd.sale_id.is_empty() {
            tracing::warn!("rejected transition with empty sale ID");
            return Err(SalesError::EmptyKey);
        }

        let target = parse_status(&cmd.status)?;
        let mut sale = self.store.read(&cmd.sale_id).await?;

        if let Some(expected) = cmd.expected_version
            && expected != sale.version
        {
            tracing::warn!(sale_id = %sale.id, expected, actual = sale.version, "stale sale version");
            metrics::counter!("sales_transitions_rejected_total", "reason" => "version_conflict")
                .increment(1);
            return Err(SalesError::VersionConflict {
                sale_id: sale.id,
                expected,
                actual: sale.version,
            });
        }

        if !sale.status.can_transition_to(target) {
            tracing::warn!(sale_id = %sale.id, current_status = %sale.status, new_status = %target, "invalid status transition");
            metrics::counter!("sales_transitions_rejected_total", "reason" => "invalid_transition")
                .increment(1);
            return Err(SalesError::InvalidTransition {
                from: sale.status,
                to: target,
            });
        }

        let read_version = sale.version;
        sale.status = target;
        sale.updated_at = next_timestamp(sale.updated_at);
        sale.version += 1;

        self.store
            .replace(sale.clone(), read_version)
            .await
            .map_err(|e| {
                tracing::warn!(sale_id = %sale.id, new_status = %target, error = %e, "failed to store transition");
                SalesError::from(e)
            })?;

        tracing::info!(sale_id = %sale.id, new_status = %target, version = sale.version, "sale updated");
        metrics::counter!("sales_transitions_total", "status" => target.as_str()).increment(1);
        Ok(sale)
    }
}

fn parse_status(raw: &str) -> Result<SaleStatus, SalesError> {
    raw.parse().map_err(|_| {
        tracing::warn!(status = raw, "invalid status");
        SalesError::InvalidStatus {
            status: raw.to_string(),
        }
    })
}

/// Returns the current time, nudged past `previous` if the clock has not
/// advanced since.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
