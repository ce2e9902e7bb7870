//! CardVault demo glue.
//!
//! This crate sits where a web UI would: it parses raw form values into card
//! details and drives the lifecycle manager, producing the user-facing
//! confirmation strings a storefront shows after each flow.

pub mod models;
pub mod portal;

pub use models::CardForm;
pub use portal::{AddConfirmation, PaymentMethodPortal};
