//! Example Onsite Gateway Plugin
//!
//! This module implements the built-in example gateway. It simulates a
//! processor deterministically in memory, keyed on the card number, and is
//! used for demos and tests. Real processor integrations implement
//! [`GatewayPlugin`] the same way against an actual API.

use super::traits::{GatewayCapability, GatewayPlugin};
use crate::cards::CardDetails;
use crate::method::{PaymentMethod, PaymentMethodDraft};
use crate::{PluginId, RemoteToken, Result, VaultError};
use async_trait::async_trait;
use std::time::Duration;

/// Default bound on simulated processor calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Example onsite gateway plugin.
///
/// Tokenization is deterministic: the same card number always yields the same
/// remote token, prefixed `example-`. Numbers with an unrecognized brand
/// prefix are declined, as a real processor would decline an invalid card.
///
/// # Example
///
/// ```
/// use cardvault_lib::gateways::{ExampleOnsitePlugin, GatewayPlugin};
///
/// let plugin = ExampleOnsitePlugin::new();
/// assert_eq!(plugin.plugin_id().0, "example_onsite");
/// ```
pub struct ExampleOnsitePlugin {
    /// Whether to decline every tokenization attempt.
    simulate_rejection: bool,
    /// Whether to fail with a transport error.
    simulate_unavailable: bool,
    /// Simulated processor latency.
    latency: Option<Duration>,
    /// Bound applied to each simulated call.
    timeout: Duration,
}

impl ExampleOnsitePlugin {
    /// Creates a new example plugin.
    pub fn new() -> Self {
        Self {
            simulate_rejection: false,
            simulate_unavailable: false,
            latency: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a plugin that declines every tokenization attempt.
    pub fn rejecting() -> Self {
        Self {
            simulate_rejection: true,
            ..Self::new()
        }
    }

    /// Creates a plugin that simulates an unreachable processor.
    pub fn unavailable() -> Self {
        Self {
            simulate_unavailable: true,
            ..Self::new()
        }
    }

    /// Sets a simulated processor latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Sets the per-call timeout bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Simulated remote call shared by create and delete.
    async fn remote_call(&self, operation: &'static str) -> Result<()> {
        let call = async {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            if self.simulate_unavailable {
                return Err(VaultError::unavailable(operation, "simulated outage"));
            }
            Ok(())
        };

        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                VaultError::unavailable(
                    operation,
                    format!("timed out after {}ms", self.timeout.as_millis()),
                )
            })?
    }
}

impl Default for ExampleOnsitePlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GatewayPlugin for ExampleOnsitePlugin {
    fn plugin_id(&self) -> PluginId {
        PluginId::example_onsite()
    }

    fn display_name(&self) -> &str {
        "Example (Onsite)"
    }

    fn capabilities(&self) -> &[GatewayCapability] {
        &[GatewayCapability::Onsite]
    }

    async fn create_payment_method(
        &self,
        draft: &PaymentMethodDraft,
        details: &CardDetails,
    ) -> Result<PaymentMethod> {
        self.remote_call("create_payment_method").await?;

        if self.simulate_rejection {
            return Err(VaultError::rejected("card declined by processor"));
        }
        let brand = details
            .brand()
            .ok_or_else(|| VaultError::rejected("unrecognized card number"))?;

        let token = RemoteToken::new(format!("example-{:016x}", simple_hash(&details.number)));
        Ok(PaymentMethod::active(draft, brand, details.last4(), token))
    }

    async fn delete_payment_method(&self, method: &PaymentMethod) -> Result<()> {
        self.remote_call("delete_payment_method").await?;

        // Revocation is idempotent: a token that was already revoked (or never
        // issued by this simulation) deletes cleanly.
        let _ = method;
        Ok(())
    }
}

/// Simple hash function for deterministic mock tokens.
fn simple_hash(data: &str) -> u64 {
    let mut hash: u64 = 5381;
    for byte in data.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    hash
}
