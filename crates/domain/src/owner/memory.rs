//! In-memory owner directory for tests and local runs.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{OwnerDirectory, OwnerLookupError};
use crate::OwnerId;

#[derive(Debug, Default)]
struct InMemoryOwnerState {
    owners: HashSet<OwnerId>,
    lookups: usize,
    fail_lookups: bool,
}

/// In-memory owner directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOwnerDirectory {
    state: Arc<RwLock<InMemoryOwnerState>>,
}

impl InMemoryOwnerDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory that knows the given owners.
    pub fn with_owners<I, O>(owners: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<OwnerId>,
    {
        let directory = Self::new();
        for owner in owners {
            directory.add(owner);
        }
        directory
    }

    /// Registers an owner.
    pub fn add(&self, owner_id: impl Into<OwnerId>) {
        self.write().owners.insert(owner_id.into());
    }

    /// Removes an owner.
    pub fn remove(&self, owner_id: &OwnerId) {
        self.write().owners.remove(owner_id);
    }

    /// Configures every subsequent lookup to fail as if the directory were down.
    pub fn set_fail_lookups(&self, fail: bool) {
        self.write().fail_lookups = fail;
    }

    /// Returns how many lookups have been answered or failed.
    pub fn lookup_count(&self) -> usize {
        self.read().lookups
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, InMemoryOwnerState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryOwnerState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl OwnerDirectory for InMemoryOwnerDirectory {
    async fn exists(&self, owner_id: &OwnerId) -> Result<bool, OwnerLookupError> {
        let mut state = self.write();
        state.lookups += 1;

        if state.fail_lookups {
            return Err(OwnerLookupError::Unavailable(
                "directory offline".to_string(),
            ));
        }

        Ok(state.owners.contains(owner_id))
    }
}
