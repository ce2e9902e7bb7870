//! Gateway configuration entities.
//!
//! A [`PaymentGateway`] binds a gateway ID to a plugin variant plus account
//! settings. Configurations are held in a thread-safe [`GatewayConfigSet`];
//! removing a configuration does not cascade to stored payment methods.

use crate::{GatewayId, PluginId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// API mode a gateway is configured for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayMode {
    /// Sandbox/test credentials.
    Test,
    /// Production credentials.
    Live,
}

impl Default for GatewayMode {
    fn default() -> Self {
        Self::Test
    }
}

/// A configured payment gateway: a processor account bound to a plugin variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentGateway {
    /// Gateway identifier (e.g. "example").
    pub id: GatewayId,
    /// Human-readable label (e.g. "Example").
    pub label: String,
    /// Plugin variant implementing the processor protocol.
    pub plugin: PluginId,
    /// API mode.
    pub mode: GatewayMode,
}

impl PaymentGateway {
    /// Create a new gateway configuration in test mode.
    pub fn new(id: impl Into<GatewayId>, label: impl Into<String>, plugin: PluginId) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            plugin,
            mode: GatewayMode::Test,
        }
    }

    /// Set the API mode.
    pub fn with_mode(mut self, mode: GatewayMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Thread-safe set of configured gateways, keyed by gateway ID.
pub struct GatewayConfigSet {
    gateways: RwLock<HashMap<String, PaymentGateway>>,
}

impl GatewayConfigSet {
    /// Creates an empty configuration set.
    pub fn new() -> Self {
        Self {
            gateways: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or replaces a gateway configuration.
    pub fn insert(&self, gateway: PaymentGateway) {
        let mut gateways = self.gateways.write().unwrap_or_else(|e| e.into_inner());
        gateways.insert(gateway.id.0.clone(), gateway);
    }

    /// Gets a gateway configuration by ID.
    pub fn get(&self, id: &GatewayId) -> Option<PaymentGateway> {
        let gateways = self.gateways.read().unwrap_or_else(|e| e.into_inner());
        gateways.get(&id.0).cloned()
    }

    /// Removes a gateway configuration.
    ///
    /// Stored payment methods referencing the gateway are not touched.
    pub fn remove(&self, id: &GatewayId) -> Option<PaymentGateway> {
        let mut gateways = self.gateways.write().unwrap_or_else(|e| e.into_inner());
        gateways.remove(&id.0)
    }

    /// Returns all configured gateway IDs.
    pub fn list(&self) -> Vec<GatewayId> {
        let gateways = self.gateways.read().unwrap_or_else(|e| e.into_inner());
        gateways.keys().map(|k| GatewayId(k.clone())).collect()
    }

    /// Returns the number of configured gateways.
    pub fn len(&self) -> usize {
        let gateways = self.gateways.read().unwrap_or_else(|e| e.into_inner());
        gateways.len()
    }

    /// Returns true if no gateways are configured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GatewayConfigSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_gateway() -> PaymentGateway {
        PaymentGateway::new("example", "Example", PluginId::example_onsite())
    }

    #[test]
    fn test_insert_and_get() {
        let configs = GatewayConfigSet::new();
        assert!(configs.is_empty());

        configs.insert(example_gateway());
        assert_eq!(configs.len(), 1);

        let gateway = configs.get(&GatewayId::new("example")).unwrap();
        assert_eq!(gateway.label, "Example");
        assert_eq!(gateway.plugin, PluginId::example_onsite());
        assert_eq!(gateway.mode, GatewayMode::Test);
    }

    #[test]
    fn test_remove() {
        let configs = GatewayConfigSet::new();
        configs.insert(example_gateway());

        let removed = configs.remove(&GatewayId::new("example"));
        assert!(removed.is_some());
        assert!(configs.get(&GatewayId::new("example")).is_none());
    }

    #[test]
    fn test_mode_builder() {
        let gateway = example_gateway().with_mode(GatewayMode::Live);
        assert_eq!(gateway.mode, GatewayMode::Live);
    }
}
