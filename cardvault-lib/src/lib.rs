//! CardVault library.
//!
//! This crate intentionally stays stateless and delegates persistence and
//! processor access to callers through trait-based dependency injection.
//!
//! # Features
//!
//! - **Gateway Plugins**: Extensible system for adding new payment processors
//! - **Payment Method Store**: Owner-scoped persistence behind a trait
//! - **Lifecycle Manager**: Create/delete orchestration with ownership checks
//!
//! # Example
//!
//! ```ignore
//! use cardvault_lib::gateways::{ExampleOnsitePlugin, GatewayRegistry};
//! use cardvault_lib::PluginId;
//!
//! // Create a registry with plugins
//! let registry = GatewayRegistry::new();
//! registry.register(Box::new(ExampleOnsitePlugin::new()));
//!
//! let plugin = registry.get(&PluginId("example_onsite".into()));
//! assert!(plugin.is_some());
//! ```

pub mod cards;
pub mod errors;
pub mod gateways;
pub mod manager;
pub mod method;
pub mod owners;
pub mod prelude;
pub mod storage;

/// Test utilities for lifecycle testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use errors::{VaultError, VaultErrorCode};

/// Common result alias for CardVault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Identifier for the user that owns a payment method.
///
/// # Example
///
/// ```
/// use cardvault_lib::OwnerId;
///
/// // Create from &str
/// let owner: OwnerId = "user-1".into();
///
/// // Or explicitly
/// let owner = OwnerId::new("user-1");
///
/// // Access the inner value
/// assert_eq!(owner.as_str(), "user-1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct OwnerId(pub String);

impl OwnerId {
    /// Create a new OwnerId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the owner ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OwnerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a configured payment gateway.
///
/// A gateway is a configured processor account (e.g. "example"), bound to a
/// plugin variant via [`PluginId`].
///
/// # Example
///
/// ```
/// use cardvault_lib::GatewayId;
///
/// let gateway: GatewayId = "example".into();
/// assert_eq!(gateway.as_str(), "example");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GatewayId(pub String);

impl GatewayId {
    /// Create a new GatewayId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the gateway ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GatewayId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for GatewayId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for GatewayId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GatewayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a gateway plugin variant.
///
/// Plugin variants implement the protocol-specific processor communication
/// (e.g. "example_onsite"). Gateways reference a variant by this key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PluginId(pub String);

impl PluginId {
    /// Create a new PluginId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the plugin ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Well-known plugin ID for the example onsite gateway.
    pub const EXAMPLE_ONSITE: &'static str = "example_onsite";

    /// Create the example onsite plugin ID.
    pub fn example_onsite() -> Self {
        Self::new(Self::EXAMPLE_ONSITE)
    }
}

impl From<&str> for PluginId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PluginId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for PluginId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PluginId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store identity of a persisted payment method.
///
/// Assigned by the store on first save; never reused.
///
/// # Example
///
/// ```
/// use cardvault_lib::PaymentMethodId;
///
/// let id = PaymentMethodId(1);
/// assert_eq!(id.to_string(), "1");
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct PaymentMethodId(pub u64);

impl PaymentMethodId {
    /// Get the raw identity value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for PaymentMethodId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PaymentMethodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque token referencing a stored instrument on the processor side.
///
/// Returned by a gateway plugin on tokenization. A payment method is never
/// persisted with an empty token.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoteToken(pub String);

impl RemoteToken {
    /// Create a new remote token from a string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for RemoteToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RemoteToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for RemoteToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RemoteToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
