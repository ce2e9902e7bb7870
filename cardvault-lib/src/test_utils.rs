//! Test utilities for lifecycle testing.
//!
//! Provides fixtures and a pre-wired harness so integration tests (and
//! downstream crates, via the `test-utils` feature) can exercise the
//! lifecycle without assembling collaborators by hand.

use crate::cards::{BillingAddress, CardDetails};
use crate::gateways::{ExampleOnsitePlugin, GatewayConfigSet, GatewayRegistry, PaymentGateway};
use crate::manager::PaymentMethodManager;
use crate::owners::InMemoryOwnerDirectory;
use crate::storage::InMemoryStore;
use crate::{GatewayId, PluginId};
use chrono::Datelike;
use std::sync::Arc;

/// The canonical test Visa number.
pub const VISA_NUMBER: &str = "4111111111111111";

/// Card details that pass validation and tokenize as a Visa.
pub fn valid_visa_details() -> CardDetails {
    CardDetails::new(
        VISA_NUMBER,
        1,
        chrono::Utc::now().year() + 1,
        "111",
        test_billing_address(),
    )
}

/// A filled-in billing address.
pub fn test_billing_address() -> BillingAddress {
    BillingAddress {
        country_code: "AF".to_string(),
        given_name: "FirstName".to_string(),
        family_name: "LastName".to_string(),
        address_line1: "TestStreet".to_string(),
        address_line2: None,
        locality: "TestTown".to_string(),
        postal_code: None,
    }
}

/// A fully wired vault over in-memory collaborators.
///
/// The "example" gateway is configured with the example onsite plugin and the
/// given owners are registered.
pub struct TestVault {
    /// The assembled lifecycle manager.
    pub manager: PaymentMethodManager,
    /// Direct store handle for assertions.
    pub store: Arc<InMemoryStore>,
    /// Owner directory handle for mutations mid-test.
    pub owners: Arc<InMemoryOwnerDirectory>,
    /// Config set handle, e.g. to remove the gateway mid-test.
    pub configs: Arc<GatewayConfigSet>,
}

impl TestVault {
    /// Build a vault with the example gateway and the given owners.
    pub fn with_owners<I, S>(owner_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(Box::new(ExampleOnsitePlugin::new()), owner_ids)
    }

    /// Build a vault with a custom plugin behind the "example" gateway.
    pub fn build<I, S>(plugin: Box<dyn crate::gateways::GatewayPlugin>, owner_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = Arc::new(GatewayRegistry::new());
        registry.register(plugin);
        let configs = Arc::new(GatewayConfigSet::new());
        configs.insert(PaymentGateway::new(
            "example",
            "Example",
            PluginId::example_onsite(),
        ));
        let store = Arc::new(InMemoryStore::new());
        let owners = Arc::new(InMemoryOwnerDirectory::with_owners(owner_ids));

        let manager = PaymentMethodManager::new(
            registry,
            configs.clone(),
            store.clone(),
            owners.clone(),
        );
        Self {
            manager,
            store,
            owners,
            configs,
        }
    }

    /// The gateway id the harness configures.
    pub fn gateway_id(&self) -> GatewayId {
        GatewayId::new("example")
    }
}
