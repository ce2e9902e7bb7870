//! Gateway plugin abstraction.
//!
//! A *gateway* is a configured processor account ([`PaymentGateway`]); a
//! *plugin* is the code variant that speaks to the processor
//! ([`GatewayPlugin`]). Plugins are registered by string key in a
//! [`GatewayRegistry`] and resolved at call time from the gateway
//! configuration.

mod config;
mod example;
mod registry;
mod traits;

pub use config::{GatewayConfigSet, GatewayMode, PaymentGateway};
pub use example::ExampleOnsitePlugin;
pub use registry::GatewayRegistry;
pub use traits::{GatewayCapability, GatewayPlugin};
