//! Payment method entities and lifecycle states.

use crate::cards::CardBrand;
use crate::{GatewayId, OwnerId, PaymentMethodId, RemoteToken};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enumerated payment method type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    /// A tokenized credit or debit card.
    CreditCard,
}

impl PaymentMethodType {
    /// Machine identifier for the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
        }
    }
}

impl fmt::Display for PaymentMethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a payment method.
///
/// Transitions are `Draft -> Active -> Deleted`, nothing else. `Active` is
/// entered only after a successful gateway-side creation; `Deleted` is
/// terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodState {
    /// In-flight, not yet tokenized or persisted.
    Draft,
    /// Tokenized by the gateway and persisted.
    Active,
    /// Removed. Terminal.
    Deleted,
}

/// An in-flight payment method under construction.
///
/// Drafts carry everything known before tokenization: the owner, the gateway
/// that will tokenize, and the method type. Gateway plugins consume a draft
/// together with the raw card details and produce a populated
/// [`PaymentMethod`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodDraft {
    /// Owner of the method being created.
    pub owner: OwnerId,
    /// Gateway that will hold the remote token.
    pub gateway: GatewayId,
    /// Method type.
    pub method_type: PaymentMethodType,
}

impl PaymentMethodDraft {
    /// Create a new draft.
    pub fn new(owner: OwnerId, gateway: GatewayId, method_type: PaymentMethodType) -> Self {
        Self {
            owner,
            gateway,
            method_type,
        }
    }
}

/// A stored, reusable reference to a tokenized payment instrument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Store identity. `None` until first saved.
    pub id: Option<PaymentMethodId>,
    /// Owning user. Immutable after creation.
    pub owner: OwnerId,
    /// Gateway holding the remote token.
    pub gateway: GatewayId,
    /// Method type.
    pub method_type: PaymentMethodType,
    /// Card brand derived from the number.
    pub brand: CardBrand,
    /// Last four digits for display.
    pub last4: String,
    /// Opaque processor-side token. Non-empty once persisted.
    pub remote_token: RemoteToken,
    /// Lifecycle state.
    pub state: PaymentMethodState,
    /// Creation timestamp (unix epoch seconds).
    pub created_at: i64,
}

impl PaymentMethod {
    /// Create an active payment method from a draft and tokenization output.
    ///
    /// This is how gateway plugins return their result; the store identity is
    /// assigned later on save.
    pub fn active(
        draft: &PaymentMethodDraft,
        brand: CardBrand,
        last4: impl Into<String>,
        remote_token: RemoteToken,
    ) -> Self {
        Self {
            id: None,
            owner: draft.owner.clone(),
            gateway: draft.gateway.clone(),
            method_type: draft.method_type,
            brand,
            last4: last4.into(),
            remote_token,
            state: PaymentMethodState::Active,
            created_at: current_timestamp(),
        }
    }

    /// Human-readable label, e.g. "Visa ending in 1111".
    pub fn label(&self) -> String {
        format!("{} ending in {}", self.brand.display_name(), self.last4)
    }

    /// Whether the method is active (tokenized and usable).
    pub fn is_active(&self) -> bool {
        self.state == PaymentMethodState::Active
    }
}

/// Helper function to get current timestamp.
pub(crate) fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
