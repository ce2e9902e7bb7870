//! Payment method lifecycle orchestration.
//!
//! The manager drives the `Draft -> Active -> Deleted` lifecycle: it resolves
//! the configured gateway plugin, calls it, and persists through the store.
//! Authorization happens in the caller; the manager still re-checks ownership
//! on delete so a confused caller cannot remove someone else's method.

use crate::cards::CardDetails;
use crate::gateways::{GatewayCapability, GatewayConfigSet, GatewayPlugin, GatewayRegistry};
use crate::method::{PaymentMethod, PaymentMethodDraft, PaymentMethodType};
use crate::owners::OwnerDirectory;
use crate::storage::PaymentMethodStore;
use crate::{GatewayId, OwnerId, PaymentMethodId, Result, VaultError};
use std::sync::Arc;

/// Orchestrates payment method creation and deletion.
///
/// Holds its collaborators behind traits so hosts can swap persistence and
/// processor access without touching the lifecycle logic.
pub struct PaymentMethodManager {
    registry: Arc<GatewayRegistry>,
    configs: Arc<GatewayConfigSet>,
    store: Arc<dyn PaymentMethodStore>,
    owners: Arc<dyn OwnerDirectory>,
}

impl PaymentMethodManager {
    /// Create a new lifecycle manager.
    pub fn new(
        registry: Arc<GatewayRegistry>,
        configs: Arc<GatewayConfigSet>,
        store: Arc<dyn PaymentMethodStore>,
        owners: Arc<dyn OwnerDirectory>,
    ) -> Self {
        Self {
            registry,
            configs,
            store,
            owners,
        }
    }

    /// Creates a payment method for `owner` via the configured gateway.
    ///
    /// Validates the owner, the gateway configuration and the card details
    /// before any gateway call, then tokenizes through the plugin and persists
    /// the resulting `Active` method. On any gateway failure nothing is
    /// persisted; the call never leaves a partially-created record behind.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, details), fields(owner = %owner, gateway = %gateway_id))
    )]
    pub async fn create(
        &self,
        owner: OwnerId,
        gateway_id: GatewayId,
        details: CardDetails,
        method_type: PaymentMethodType,
    ) -> Result<PaymentMethod> {
        if !self.owners.owner_exists(&owner).await? {
            return Err(VaultError::not_found("owner", owner.as_str()));
        }
        let plugin = self.resolve_onsite_plugin(&gateway_id)?;
        details.validate()?;

        let draft = PaymentMethodDraft::new(owner, gateway_id, method_type);
        let mut method = plugin.create_payment_method(&draft, &details).await?;
        if !method.is_active() || method.remote_token.is_empty() {
            return Err(VaultError::Internal(format!(
                "plugin {} returned an incomplete payment method",
                plugin.plugin_id()
            )));
        }

        let id = self.store.save(method.clone()).await?;
        method.id = Some(id);
        Ok(method)
    }

    /// Deletes a payment method on behalf of `requester`.
    ///
    /// Unknown identities are a no-op, so a second concurrent deleter returns
    /// cleanly. The requester must own the record; the check runs before any
    /// gateway call, so a `Forbidden` delete provably mutates nothing.
    ///
    /// The remote revoke is best-effort: when the gateway fails the local
    /// record is still removed and a warning is logged for reconciliation —
    /// the owner is never left with an undeletable visible method.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), fields(id = %id, requester = %requester))
    )]
    pub async fn delete(&self, id: PaymentMethodId, requester: OwnerId) -> Result<()> {
        let method = match self.store.load_by_id(id).await? {
            Some(method) => method,
            None => return Ok(()),
        };
        if method.owner != requester {
            return Err(VaultError::forbidden(
                "requester does not own this payment method",
            ));
        }

        match self.resolve_plugin(&method.gateway) {
            Ok(plugin) => {
                if let Err(err) = plugin.delete_payment_method(&method).await {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        token = %method.remote_token,
                        error = %err,
                        "remote revoke failed; removing local record, token needs reconciliation"
                    );
                    #[cfg(not(feature = "tracing"))]
                    let _ = err;
                }
            }
            Err(_err) => {
                // The gateway config can be removed out from under stored
                // methods; the local record must still be deletable.
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    gateway = %method.gateway,
                    token = %method.remote_token,
                    "gateway no longer resolvable; removing local record without remote revoke"
                );
            }
        }

        self.store.delete(id).await?;
        Ok(())
    }

    /// Lists the owner's payment methods, newest first.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), fields(owner = %owner))
    )]
    pub async fn list(&self, owner: &OwnerId) -> Result<Vec<PaymentMethod>> {
        Ok(self.store.list_by_owner(owner).await?)
    }

    /// Resolves the gateway configuration to its registered plugin.
    fn resolve_plugin(&self, gateway_id: &GatewayId) -> Result<Arc<dyn GatewayPlugin>> {
        let config = self
            .configs
            .get(gateway_id)
            .ok_or_else(|| VaultError::not_found("gateway", gateway_id.as_str()))?;
        self.registry.get_required(&config.plugin)
    }

    /// Resolves the plugin and requires the onsite capability.
    fn resolve_onsite_plugin(&self, gateway_id: &GatewayId) -> Result<Arc<dyn GatewayPlugin>> {
        let plugin = self.resolve_plugin(gateway_id)?;
        if !plugin.supports(GatewayCapability::Onsite) {
            return Err(VaultError::CapabilityNotSupported {
                plugin: plugin.plugin_id().0,
                capability: GatewayCapability::Onsite.to_string(),
            });
        }
        Ok(plugin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BillingAddress, CardBrand};
    use crate::gateways::{ExampleOnsitePlugin, PaymentGateway};
    use crate::owners::InMemoryOwnerDirectory;
    use crate::storage::InMemoryStore;
    use crate::PluginId;
    use async_trait::async_trait;
    use chrono::Datelike;

    fn visa_details() -> CardDetails {
        CardDetails::new(
            "4111111111111111",
            1,
            chrono::Utc::now().year() + 1,
            "111",
            BillingAddress::default(),
        )
    }

    struct Setup {
        manager: PaymentMethodManager,
        store: Arc<InMemoryStore>,
    }

    fn setup_with_plugin(plugin: Box<dyn GatewayPlugin>) -> Setup {
        let registry = Arc::new(GatewayRegistry::new());
        registry.register(plugin);
        let configs = Arc::new(GatewayConfigSet::new());
        configs.insert(PaymentGateway::new(
            "example",
            "Example",
            PluginId::example_onsite(),
        ));
        let store = Arc::new(InMemoryStore::new());
        let owners = Arc::new(InMemoryOwnerDirectory::with_owners(["user-1", "user-2"]));
        Setup {
            manager: PaymentMethodManager::new(registry, configs, store.clone(), owners),
            store,
        }
    }

    fn setup() -> Setup {
        setup_with_plugin(Box::new(ExampleOnsitePlugin::new()))
    }

    #[tokio::test]
    async fn test_create_active_method() {
        let Setup { manager, .. } = setup();

        let method = manager
            .create(
                OwnerId::new("user-1"),
                GatewayId::new("example"),
                visa_details(),
                PaymentMethodType::CreditCard,
            )
            .await
            .unwrap();

        assert!(method.id.is_some());
        assert_eq!(method.owner.as_str(), "user-1");
        assert_eq!(method.brand, CardBrand::Visa);
        assert_eq!(method.last4, "1111");
        assert!(method.is_active());

        let listed = manager.list(&OwnerId::new("user-1")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, method.id);
    }

    #[tokio::test]
    async fn test_create_unknown_owner() {
        let Setup { manager, store } = setup();

        let err = manager
            .create(
                OwnerId::new("nobody"),
                GatewayId::new("example"),
                visa_details(),
                PaymentMethodType::CreditCard,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::NotFound { .. }));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_unknown_gateway() {
        let Setup { manager, store } = setup();

        let err = manager
            .create(
                OwnerId::new("user-1"),
                GatewayId::new("missing"),
                visa_details(),
                PaymentMethodType::CreditCard,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::NotFound { .. }));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_invalid_details_skips_gateway() {
        let Setup { manager, store } = setup();

        let mut details = visa_details();
        details.exp_year = 2000;
        let err = manager
            .create(
                OwnerId::new("user-1"),
                GatewayId::new("example"),
                details,
                PaymentMethodType::CreditCard,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::Validation { .. }));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_persists_nothing() {
        for plugin in [
            ExampleOnsitePlugin::rejecting(),
            ExampleOnsitePlugin::unavailable(),
        ] {
            let Setup { manager, store } = setup_with_plugin(Box::new(plugin));

            let result = manager
                .create(
                    OwnerId::new("user-1"),
                    GatewayId::new("example"),
                    visa_details(),
                    PaymentMethodType::CreditCard,
                )
                .await;
            assert!(result.is_err());
            assert_eq!(store.count().await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn test_offsite_only_plugin_is_refused() {
        struct OffsitePlugin;

        #[async_trait]
        impl GatewayPlugin for OffsitePlugin {
            fn plugin_id(&self) -> PluginId {
                PluginId::example_onsite()
            }

            fn display_name(&self) -> &str {
                "Offsite Only"
            }

            fn capabilities(&self) -> &[GatewayCapability] {
                &[GatewayCapability::Offsite]
            }

            async fn create_payment_method(
                &self,
                _draft: &PaymentMethodDraft,
                _details: &CardDetails,
            ) -> Result<PaymentMethod> {
                unreachable!("manager must refuse before calling the plugin")
            }

            async fn delete_payment_method(&self, _method: &PaymentMethod) -> Result<()> {
                Ok(())
            }
        }

        let Setup { manager, .. } = setup_with_plugin(Box::new(OffsitePlugin));
        let err = manager
            .create(
                OwnerId::new("user-1"),
                GatewayId::new("example"),
                visa_details(),
                PaymentMethodType::CreditCard,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::CapabilityNotSupported { .. }));
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let Setup { manager, store } = setup();

        let method = manager
            .create(
                OwnerId::new("user-1"),
                GatewayId::new("example"),
                visa_details(),
                PaymentMethodType::CreditCard,
            )
            .await
            .unwrap();
        let id = method.id.unwrap();

        manager.delete(id, OwnerId::new("user-1")).await.unwrap();
        assert!(store.load_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_forbidden() {
        let Setup { manager, store } = setup();

        let method = manager
            .create(
                OwnerId::new("user-1"),
                GatewayId::new("example"),
                visa_details(),
                PaymentMethodType::CreditCard,
            )
            .await
            .unwrap();
        let id = method.id.unwrap();

        let err = manager
            .delete(id, OwnerId::new("user-2"))
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::Forbidden { .. }));

        let unchanged = store.load_by_id(id).await.unwrap().unwrap();
        assert_eq!(unchanged, method);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let Setup { manager, .. } = setup();
        manager
            .delete(PaymentMethodId(999), OwnerId::new("user-1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_survives_unavailable_gateway() {
        // The processor is unreachable for the whole flow; the method is
        // seeded into the store directly.
        let Setup { manager, store } =
            setup_with_plugin(Box::new(ExampleOnsitePlugin::unavailable()));

        let draft = PaymentMethodDraft::new(
            OwnerId::new("user-1"),
            GatewayId::new("example"),
            PaymentMethodType::CreditCard,
        );
        let method = PaymentMethod::active(
            &draft,
            CardBrand::Visa,
            "1111",
            crate::RemoteToken::new("example-orphan"),
        );
        let id = store.save(method).await.unwrap();

        manager.delete(id, OwnerId::new("user-1")).await.unwrap();
        assert!(store.load_by_id(id).await.unwrap().is_none());
    }
}
