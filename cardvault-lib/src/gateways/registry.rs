//! Gateway Plugin Registry
//!
//! This module provides a registry for managing gateway plugins. Applications
//! can register plugins at runtime and query them by plugin ID.
//!
//! # Thread Safety
//!
//! The registry uses `RwLock` for thread-safe access and recovers from
//! poisoned locks (which only happen if a thread panics while holding the
//! lock). If you need fallible lookup, use
//! [`get_required`](GatewayRegistry::get_required) which returns a `Result`.

use super::traits::GatewayPlugin;
use crate::{PluginId, Result, VaultError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry for gateway plugins.
///
/// The registry allows dynamic registration and lookup of gateway plugin
/// variants. It is thread-safe and can be shared across async tasks.
///
/// # Example
///
/// ```
/// use cardvault_lib::gateways::{ExampleOnsitePlugin, GatewayRegistry};
/// use cardvault_lib::PluginId;
///
/// let registry = GatewayRegistry::new();
/// registry.register(Box::new(ExampleOnsitePlugin::new()));
///
/// let example = registry.get(&PluginId::example_onsite());
/// assert!(example.is_some());
/// ```
pub struct GatewayRegistry {
    plugins: RwLock<HashMap<String, Arc<dyn GatewayPlugin>>>,
}

impl GatewayRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry with the built-in example plugin registered.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Box::new(super::example::ExampleOnsitePlugin::new()));
        registry
    }

    /// Registers a gateway plugin.
    ///
    /// If a plugin with the same plugin ID already exists, it will be replaced.
    pub fn register(&self, plugin: Box<dyn GatewayPlugin>) {
        let plugin_id = plugin.plugin_id().0.clone();
        let mut plugins = self.plugins.write().unwrap_or_else(|e| e.into_inner());
        plugins.insert(plugin_id, Arc::from(plugin));
    }

    /// Unregisters a gateway plugin.
    ///
    /// Returns the removed plugin if it existed.
    pub fn unregister(&self, plugin_id: &PluginId) -> Option<Arc<dyn GatewayPlugin>> {
        let mut plugins = self.plugins.write().unwrap_or_else(|e| e.into_inner());
        plugins.remove(&plugin_id.0)
    }

    /// Gets a gateway plugin by its ID.
    pub fn get(&self, plugin_id: &PluginId) -> Option<Arc<dyn GatewayPlugin>> {
        let plugins = self.plugins.read().unwrap_or_else(|e| e.into_inner());
        plugins.get(&plugin_id.0).cloned()
    }

    /// Gets a gateway plugin, returning an error if not found.
    pub fn get_required(&self, plugin_id: &PluginId) -> Result<Arc<dyn GatewayPlugin>> {
        self.get(plugin_id)
            .ok_or_else(|| VaultError::not_found("gateway plugin", plugin_id.as_str()))
    }

    /// Returns all registered plugin IDs.
    pub fn list_plugins(&self) -> Vec<PluginId> {
        let plugins = self.plugins.read().unwrap_or_else(|e| e.into_inner());
        plugins.keys().map(|k| PluginId(k.clone())).collect()
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        let plugins = self.plugins.read().unwrap_or_else(|e| e.into_inner());
        plugins.len()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if a plugin is registered.
    pub fn has_plugin(&self, plugin_id: &PluginId) -> bool {
        let plugins = self.plugins.read().unwrap_or_else(|e| e.into_inner());
        plugins.contains_key(&plugin_id.0)
    }
}

impl Default for GatewayRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for GatewayRegistry {
    fn clone(&self) -> Self {
        let plugins = self.plugins.read().unwrap_or_else(|e| e.into_inner());
        Self {
            plugins: RwLock::new(plugins.clone()),
        }
    }
}
