//! Wallet address newtype.
//!
//! Addresses are opaque identifiers derived from a recovery phrase (see the
//! session module in the core crate). The newtype keeps them from being mixed
//! up with other strings and normalizes surrounding whitespace.

use serde::{Deserialize, Serialize};

/// A stable wallet address identifying one account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Creates an address from a raw string, trimming surrounding whitespace.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the address is empty after trimming.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for WalletAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address = Self::new(s);
        if address.is_empty() {
            return Err("wallet address must not be empty".to_string());
        }
        Ok(address)
    }
}

impl From<&str> for WalletAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_trims_whitespace() {
        let address = WalletAddress::new("  LX1234ABCD  ");
        assert_eq!(address.as_str(), "LX1234ABCD");
    }

    #[test]
    fn test_display() {
        let address = WalletAddress::new("UGR1");
        assert_eq!(address.to_string(), "UGR1");
    }

    #[test]
    fn test_from_str_rejects_empty() {
        assert!(WalletAddress::from_str("   ").is_err());
        assert!(WalletAddress::from_str("UGR1").is_ok());
    }

    #[test]
    fn test_equality_after_normalization() {
        assert_eq!(WalletAddress::new(" UGR1"), WalletAddress::new("UGR1 "));
    }
}
