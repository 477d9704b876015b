//! Input validation shared by all fund-moving operations.

use rust_decimal::Decimal;

use maison_shared::WalletError;

/// Validates that an amount is strictly positive.
///
/// # Errors
///
/// Returns `WalletError::Validation` for zero or negative amounts.
pub fn require_positive_amount(amount: Decimal) -> Result<(), WalletError> {
    if amount <= Decimal::ZERO {
        return Err(WalletError::Validation(
            "amount must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Validates that a rejection reason or admin note is non-empty.
///
/// # Errors
///
/// Returns `WalletError::Validation` if the text is empty or whitespace.
pub fn require_reason(reason: &str, what: &str) -> Result<(), WalletError> {
    if reason.trim().is_empty() {
        return Err(WalletError::Validation(format!("{what} is required")));
    }
    Ok(())
}
