//! Owner directory abstraction.
//!
//! The lifecycle manager validates that an owner exists before creating a
//! payment method. Rather than reaching for a current-user service, the
//! directory is an explicit injected dependency; hosts back it with their
//! user system, tests with the in-memory implementation.

use crate::{OwnerId, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::RwLock;

/// Lookup of known payment method owners.
#[async_trait]
pub trait OwnerDirectory: Send + Sync {
    /// Checks whether the owner exists.
    async fn owner_exists(&self, owner: &OwnerId) -> Result<bool>;
}

/// In-memory owner directory for tests and demos.
pub struct InMemoryOwnerDirectory {
    owners: RwLock<HashSet<String>>,
}

impl InMemoryOwnerDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            owners: RwLock::new(HashSet::new()),
        }
    }

    /// Create a directory pre-populated with the given owners.
    pub fn with_owners<I, S>(owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owners: RwLock::new(owners.into_iter().map(Into::into).collect()),
        }
    }

    /// Register an owner.
    pub fn register(&self, owner: OwnerId) {
        let mut owners = self.owners.write().unwrap_or_else(|e| e.into_inner());
        owners.insert(owner.0);
    }

    /// Remove an owner.
    pub fn remove(&self, owner: &OwnerId) {
        let mut owners = self.owners.write().unwrap_or_else(|e| e.into_inner());
        owners.remove(&owner.0);
    }
}

impl Default for InMemoryOwnerDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OwnerDirectory for InMemoryOwnerDirectory {
    async fn owner_exists(&self, owner: &OwnerId) -> Result<bool> {
        let owners = self.owners.read().unwrap_or_else(|e| e.into_inner());
        Ok(owners.contains(&owner.0))
    }
}
