//! Payment method store implementations.

use crate::method::PaymentMethod;
use crate::{OwnerId, PaymentMethodId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Trait for persisting payment methods.
///
/// The store is the single source of truth for identity allocation: `save`
/// must assign collision-free identities even under concurrent calls.
/// Implementations should ensure thread-safety and serialize writes per
/// identity.
#[async_trait]
pub trait PaymentMethodStore: Send + Sync {
    /// Persist or update a payment method.
    ///
    /// Assigns a fresh identity when the record has none; records whose
    /// identity is already set are updated in place. Records with an empty
    /// remote token are rejected — no payment method exists without a
    /// successful gateway-side creation.
    async fn save(&self, method: PaymentMethod) -> StoreResult<PaymentMethodId>;

    /// Load a payment method by identity.
    async fn load_by_id(&self, id: PaymentMethodId) -> StoreResult<Option<PaymentMethod>>;

    /// Remove a payment method. No-op (not an error) if already absent.
    async fn delete(&self, id: PaymentMethodId) -> StoreResult<()>;

    /// List all payment methods for an owner, newest first.
    async fn list_by_owner(&self, owner: &OwnerId) -> StoreResult<Vec<PaymentMethod>>;

    /// Count total number of stored payment methods.
    async fn count(&self) -> StoreResult<usize>;
}

/// In-memory store for payment methods.
///
/// This is useful for testing and short-lived processes. Data is not
/// persisted across restarts.
pub struct InMemoryStore {
    /// Records keyed by identity value.
    records: RwLock<HashMap<u64, PaymentMethod>>,
    /// Identity source. Monotonic, never reused.
    next_id: AtomicU64,
}

impl InMemoryStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentMethodStore for InMemoryStore {
    async fn save(&self, mut method: PaymentMethod) -> StoreResult<PaymentMethodId> {
        if method.remote_token.is_empty() {
            return Err(StoreError::InvalidRecord(
                "remote token must not be empty".to_string(),
            ));
        }

        let id = match method.id {
            Some(id) => id,
            None => PaymentMethodId(self.next_id.fetch_add(1, Ordering::SeqCst)),
        };
        method.id = Some(id);

        let mut records = self
            .records
            .write()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        records.insert(id.0, method);
        Ok(id)
    }

    async fn load_by_id(&self, id: PaymentMethodId) -> StoreResult<Option<PaymentMethod>> {
        let records = self
            .records
            .read()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        Ok(records.get(&id.0).cloned())
    }

    async fn delete(&self, id: PaymentMethodId) -> StoreResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        records.remove(&id.0);
        Ok(())
    }

    async fn list_by_owner(&self, owner: &OwnerId) -> StoreResult<Vec<PaymentMethod>> {
        let records = self
            .records
            .read()
            .map_err(|e| StoreError::Other(e.to_string()))?;

        let mut methods: Vec<PaymentMethod> = records
            .values()
            .filter(|m| &m.owner == owner)
            .cloned()
            .collect();
        // Newest first; identity breaks ties within the same second.
        methods.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(methods)
    }

    async fn count(&self) -> StoreResult<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        Ok(records.len())
    }
}
