//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for
//! quick setup. Import everything with:
//!
//! ```rust,ignore
//! use cardvault_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Core ids: `OwnerId`, `GatewayId`, `PluginId`, `PaymentMethodId`, `RemoteToken`
//! - Error types: `VaultError`, `VaultErrorCode`, `Result`
//! - Card values: `CardBrand`, `CardDetails`, `BillingAddress`
//! - Entities: `PaymentMethod`, `PaymentMethodDraft`, states and types
//! - Gateways: `GatewayPlugin`, `GatewayRegistry`, configuration entities
//! - Storage: `PaymentMethodStore`, `InMemoryStore`
//! - Lifecycle: `PaymentMethodManager`, `OwnerDirectory`

// Core ids
pub use crate::{GatewayId, OwnerId, PaymentMethodId, PluginId, RemoteToken};

// Error handling
pub use crate::errors::{VaultError, VaultErrorCode};
pub use crate::Result;

// Card values
pub use crate::cards::{BillingAddress, CardBrand, CardDetails};

// Entities
pub use crate::method::{
    PaymentMethod, PaymentMethodDraft, PaymentMethodState, PaymentMethodType,
};

// Gateways
pub use crate::gateways::{
    ExampleOnsitePlugin, GatewayCapability, GatewayConfigSet, GatewayMode, GatewayPlugin,
    GatewayRegistry, PaymentGateway,
};

// Storage
pub use crate::storage::{InMemoryStore, PaymentMethodStore, StoreError, StoreResult};

// Lifecycle
pub use crate::manager::PaymentMethodManager;
pub use crate::owners::{InMemoryOwnerDirectory, OwnerDirectory};
