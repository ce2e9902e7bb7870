//! Gateway Plugin Traits
//!
//! This module defines the core trait for payment gateway plugins. Any
//! processor integration (the built-in example gateway, or a real acquirer)
//! implements this trait to take part in the payment method lifecycle.

use crate::cards::CardDetails;
use crate::method::{PaymentMethod, PaymentMethodDraft};
use crate::{PluginId, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capabilities a gateway plugin may support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayCapability {
    /// Raw card data is collected by the calling system and tokenized
    /// directly against the processor.
    Onsite,
    /// Redirect-based flow where the processor collects the card data.
    Offsite,
}

impl fmt::Display for GatewayCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Onsite => write!(f, "onsite"),
            Self::Offsite => write!(f, "offsite"),
        }
    }
}

/// Core trait for gateway plugins.
///
/// Implement this trait to add support for a new payment processor. Each
/// plugin handles tokenization and revocation for its specific processor
/// protocol, applying its own bounded timeouts and surfacing
/// `GatewayUnavailable` rather than blocking indefinitely.
#[async_trait]
pub trait GatewayPlugin: Send + Sync {
    /// Returns the unique identifier for this plugin variant.
    fn plugin_id(&self) -> PluginId;

    /// Returns a human-readable name for this plugin.
    fn display_name(&self) -> &str;

    /// Returns the capabilities this plugin supports.
    fn capabilities(&self) -> &[GatewayCapability];

    /// Checks if this plugin supports the given capability.
    fn supports(&self, capability: GatewayCapability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Tokenizes raw card details against the remote processor.
    ///
    /// On success, returns a fully populated, `Active` payment method carrying
    /// the remote token and masked display data. The store identity is not
    /// assigned here.
    ///
    /// # Errors
    ///
    /// - `GatewayRejected` when the processor declines (e.g. invalid card).
    /// - `GatewayUnavailable` on transport failure or timeout.
    async fn create_payment_method(
        &self,
        draft: &PaymentMethodDraft,
        details: &CardDetails,
    ) -> Result<PaymentMethod>;

    /// Revokes the stored token on the remote processor.
    ///
    /// Idempotent: revoking an already-revoked token must not fail.
    ///
    /// # Errors
    ///
    /// - `GatewayUnavailable` on transport failure or timeout.
    async fn delete_payment_method(&self, method: &PaymentMethod) -> Result<()>;
}

impl fmt::Debug for dyn GatewayPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayPlugin")
            .field("plugin_id", &self.plugin_id())
            .finish()
    }
}
