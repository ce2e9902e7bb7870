//! Payment method portal flows.
//!
//! The portal plays the role of the storefront's submission handlers: it
//! accepts raw form values, calls the lifecycle manager, and produces the
//! confirmation text and redirect targets a user would see.

use crate::models::CardForm;
use anyhow::{Context, Result};
use cardvault_lib::manager::PaymentMethodManager;
use cardvault_lib::method::{PaymentMethod, PaymentMethodType};
use cardvault_lib::{GatewayId, OwnerId, PaymentMethodId};
use std::sync::Arc;

/// Outcome of a successful add flow.
#[derive(Clone, Debug)]
pub struct AddConfirmation {
    /// The stored payment method.
    pub method: PaymentMethod,
    /// Confirmation text, e.g. "Visa ending in 1111 saved to your payment methods."
    pub message: String,
    /// Where the user lands next: the owner's collection listing.
    pub redirect: String,
}

/// Drives payment method flows on behalf of an authenticated user.
pub struct PaymentMethodPortal {
    manager: Arc<PaymentMethodManager>,
    gateway: GatewayId,
}

impl PaymentMethodPortal {
    /// Create a portal bound to one configured gateway.
    pub fn new(manager: Arc<PaymentMethodManager>, gateway: GatewayId) -> Self {
        Self { manager, gateway }
    }

    /// The collection listing path for an owner.
    pub fn collection_uri(&self, owner: &OwnerId) -> String {
        format!("user/{}/payment-methods", owner)
    }

    /// Handle an add-payment-method form submission.
    ///
    /// The caller is assumed to be authenticated as `owner`.
    pub async fn add_payment_method(
        &self,
        owner: OwnerId,
        form: CardForm,
    ) -> Result<AddConfirmation> {
        let details = form.into_details()?;
        let method = self
            .manager
            .create(
                owner.clone(),
                self.gateway.clone(),
                details,
                PaymentMethodType::CreditCard,
            )
            .await
            .context("Failed to save payment method")?;

        let message = format!("{} saved to your payment methods.", method.label());
        Ok(AddConfirmation {
            message,
            redirect: self.collection_uri(&owner),
            method,
        })
    }

    /// Handle a delete confirmation.
    ///
    /// Returns the collection listing to redirect to.
    pub async fn remove_payment_method(
        &self,
        owner: OwnerId,
        id: PaymentMethodId,
    ) -> Result<String> {
        self.manager
            .delete(id, owner.clone())
            .await
            .context("Failed to delete payment method")?;
        Ok(self.collection_uri(&owner))
    }

    /// The owner's stored payment methods, newest first.
    pub async fn list_payment_methods(&self, owner: &OwnerId) -> Result<Vec<PaymentMethod>> {
        self.manager
            .list(owner)
            .await
            .context("Failed to list payment methods")
    }
}
