//! Portal flows end to end: form submission through to stored entity state,
//! with the exact confirmation strings a storefront shows.

use cardvault_demo::{CardForm, PaymentMethodPortal};
use cardvault_lib::storage::{InMemoryStore, PaymentMethodStore};
use cardvault_lib::test_utils::TestVault;
use cardvault_lib::{GatewayId, OwnerId};
use chrono::Datelike;
use std::sync::Arc;

fn visa_form() -> CardForm {
    CardForm {
        number: "4111111111111111".to_string(),
        exp_month: "01".to_string(),
        exp_year: (chrono::Utc::now().year() + 1).to_string(),
        security_code: "111".to_string(),
        country_code: "AF".to_string(),
        given_name: "FirstName".to_string(),
        family_name: "LastName".to_string(),
        address_line1: "TestStreet".to_string(),
        address_line2: None,
        locality: "TestTown".to_string(),
        postal_code: None,
    }
}

/// Portal over a fresh in-memory vault, plus the backing store for assertions.
fn portal() -> (PaymentMethodPortal, Arc<InMemoryStore>) {
    let TestVault { manager, store, .. } = TestVault::with_owners(["u1", "u2"]);
    let portal = PaymentMethodPortal::new(Arc::new(manager), GatewayId::new("example"));
    (portal, store)
}

#[tokio::test]
async fn test_payment_method_creation() {
    let (portal, store) = portal();
    let owner = OwnerId::new("u1");

    let confirmation = portal
        .add_payment_method(owner.clone(), visa_form())
        .await
        .unwrap();

    assert_eq!(
        confirmation.message,
        "Visa ending in 1111 saved to your payment methods."
    );
    assert_eq!(confirmation.redirect, "user/u1/payment-methods");
    assert_eq!(confirmation.method.owner, owner);

    let id = confirmation.method.id.unwrap();
    let stored = store.load_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.owner, owner);
    assert_eq!(stored.last4, "1111");
}

#[tokio::test]
async fn test_payment_method_deletion() {
    let (portal, store) = portal();
    let owner = OwnerId::new("u1");

    let confirmation = portal
        .add_payment_method(owner.clone(), visa_form())
        .await
        .unwrap();
    let id = confirmation.method.id.unwrap();

    let redirect = portal
        .remove_payment_method(owner.clone(), id)
        .await
        .unwrap();
    assert_eq!(redirect, "user/u1/payment-methods");
    assert!(store.load_by_id(id).await.unwrap().is_none());
    assert!(portal.list_payment_methods(&owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_foreign_user_cannot_delete_via_portal() {
    let (portal, store) = portal();

    let confirmation = portal
        .add_payment_method(OwnerId::new("u1"), visa_form())
        .await
        .unwrap();
    let id = confirmation.method.id.unwrap();

    let err = portal
        .remove_payment_method(OwnerId::new("u2"), id)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to delete payment method"));
    assert!(store.load_by_id(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_malformed_form_is_reported() {
    let (portal, store) = portal();

    let mut form = visa_form();
    form.exp_month = "January".to_string();
    let err = portal
        .add_payment_method(OwnerId::new("u1"), form)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid expiration month"));
    assert_eq!(store.count().await.unwrap(), 0);
}
