//! Error types for CardVault operations.
//!
//! This module provides structured error types for the CardVault library,
//! enabling precise error handling and recovery strategies.

use std::fmt;

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum VaultErrorCode {
    /// Malformed payment details
    Validation = 1000,
    /// Processor declined the request
    GatewayRejected = 2000,
    /// Processor unreachable or timed out
    GatewayUnavailable = 2001,
    /// Resource not found
    NotFound = 3000,
    /// Caller does not own the resource
    Forbidden = 4000,
    /// Gateway plugin lacks the required capability
    CapabilityNotSupported = 4001,
    /// Storage error
    Storage = 5000,
    /// Serialization error
    Serialization = 5001,
    /// Internal/unexpected error
    Internal = 9999,
}

/// Comprehensive error type for CardVault operations.
#[derive(Debug)]
pub enum VaultError {
    /// Payment details failed validation before any gateway call.
    Validation {
        /// Field or parameter name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The processor declined the request (e.g. invalid card).
    GatewayRejected {
        /// Rejection reason
        reason: String,
    },

    /// The processor could not be reached or timed out.
    GatewayUnavailable {
        /// Operation that failed
        operation: String,
        /// Underlying failure message
        reason: String,
    },

    /// Resource not found (payment method, gateway, owner, etc.).
    NotFound {
        /// Type of resource (e.g. "payment method", "gateway", "owner")
        resource_type: String,
        /// Resource identifier
        identifier: String,
    },

    /// The requester does not own the payment method.
    Forbidden {
        /// Reason for the refusal
        reason: String,
    },

    /// The gateway's plugin does not support the required capability.
    CapabilityNotSupported {
        /// Plugin variant identifier
        plugin: String,
        /// Missing capability name
        capability: String,
    },

    /// Storage operation failed.
    Storage(String),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Internal/unexpected error.
    Internal(String),
}

impl VaultError {
    /// Get the error code for FFI/mobile integration.
    pub fn code(&self) -> VaultErrorCode {
        match self {
            Self::Validation { .. } => VaultErrorCode::Validation,
            Self::GatewayRejected { .. } => VaultErrorCode::GatewayRejected,
            Self::GatewayUnavailable { .. } => VaultErrorCode::GatewayUnavailable,
            Self::NotFound { .. } => VaultErrorCode::NotFound,
            Self::Forbidden { .. } => VaultErrorCode::Forbidden,
            Self::CapabilityNotSupported { .. } => VaultErrorCode::CapabilityNotSupported,
            Self::Storage(_) => VaultErrorCode::Storage,
            Self::Serialization(_) => VaultErrorCode::Serialization,
            Self::Internal(_) => VaultErrorCode::Internal,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if the caller can recover by retrying.
    ///
    /// Validation failures and processor declines leave no state behind, so
    /// the same create call can be repeated with corrected details; a gateway
    /// outage can be retried once the processor is reachable again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::GatewayRejected { .. } | Self::GatewayUnavailable { .. }
        )
    }

    /// Create a validation error.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a gateway rejection error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::GatewayRejected {
            reason: reason.into(),
        }
    }

    /// Create a gateway unavailable error.
    pub fn unavailable(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::GatewayUnavailable {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(resource_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
        }
    }

    /// Create a forbidden error.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
            Self::GatewayRejected { reason } => {
                write!(f, "gateway rejected the request: {}", reason)
            }
            Self::GatewayUnavailable { operation, reason } => {
                write!(f, "gateway unavailable during {}: {}", operation, reason)
            }
            Self::NotFound {
                resource_type,
                identifier,
            } => {
                write!(f, "{} not found: {}", resource_type, identifier)
            }
            Self::Forbidden { reason } => write!(f, "forbidden: {}", reason),
            Self::CapabilityNotSupported { plugin, capability } => {
                write!(f, "plugin {} does not support {}", plugin, capability)
            }
            Self::Storage(msg) => write!(f, "storage error: {}", msg),
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
            Self::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for VaultError {}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<crate::storage::StoreError> for VaultError {
    fn from(err: crate::storage::StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
