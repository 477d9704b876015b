//! Application-wide error types.
//!
//! Every variant carries a distinct, stable message suitable for direct
//! display in the storefront UI, and a stable machine-readable code.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using `WalletError`.
pub type WalletResult<T> = Result<T, WalletError>;

/// Errors surfaced by the wallet core.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Unknown account or request identifier.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A state transition was attempted from a state that does not allow it.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A deduction would drive the balance negative.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// The amount the operation tried to deduct.
        requested: Decimal,
        /// The balance available at the time of the check.
        available: Decimal,
    },

    /// The admin gate is closed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid input (non-positive amount, missing required reason/note).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persistence or blob storage failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WalletError {
    /// Returns the stable error code for UI-layer dispatch.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Creates a not-found error for an entity by kind and identifier.
    #[must_use]
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{kind} {id}"))
    }
}
