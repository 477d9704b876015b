//! Account domain types.
//!
//! An account is the single balance-bearing record per wallet address.
//! `Account::apply_delta` is the only sanctioned balance mutator; everything
//! else in the system goes through it so the no-negative-balance invariant
//! holds at one place.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use maison_shared::WalletError;
use maison_shared::types::WalletAddress;

/// KYC verification status of a customer profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    /// Verification has not been started.
    NotStarted,
    /// Documents submitted, awaiting review.
    Pending,
    /// Identity verified.
    Verified,
    /// Submitted documents were rejected.
    Rejected,
}

impl KycStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "not_started" => Some(Self::NotStarted),
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Customer tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Default tier for new accounts.
    Basic,
    /// KYC-verified customers.
    Verified,
    /// High-value customers.
    Premium,
}

impl Tier {
    /// Returns the string representation of the tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Verified => "verified",
            Self::Premium => "premium",
        }
    }

    /// Parses a tier from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "verified" => Some(Self::Verified),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Customer profile attached to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// KYC verification status.
    pub kyc_status: KycStatus,
    /// Customer tier.
    pub tier: Tier,
    /// Last time the profile or wallet was touched by its owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            email: None,
            name: None,
            phone: None,
            kyc_status: KycStatus::NotStarted,
            tier: Tier::Basic,
            last_active: None,
        }
    }
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New contact email.
    pub email: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New KYC status.
    pub kyc_status: Option<KycStatus>,
    /// New tier.
    pub tier: Option<Tier>,
}

impl ProfileUpdate {
    /// Merges the set fields into `profile` and stamps `last_active`.
    pub fn apply(self, profile: &mut Profile, now: DateTime<Utc>) {
        if let Some(email) = self.email {
            profile.email = Some(email);
        }
        if let Some(name) = self.name {
            profile.name = Some(name);
        }
        if let Some(phone) = self.phone {
            profile.phone = Some(phone);
        }
        if let Some(kyc_status) = self.kyc_status {
            profile.kyc_status = kyc_status;
        }
        if let Some(tier) = self.tier {
            profile.tier = tier;
        }
        profile.last_active = Some(now);
    }
}

/// A balance-bearing wallet account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable wallet address.
    pub address: WalletAddress,
    /// Current balance. Never negative.
    pub balance: Decimal,
    /// Customer profile.
    pub profile: Profile,
    /// When the account was first created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a fresh account with zero balance and default profile.
    #[must_use]
    pub fn new(address: WalletAddress, created_at: DateTime<Utc>) -> Self {
        Self {
            address,
            balance: Decimal::ZERO,
            profile: Profile::default(),
            created_at,
        }
    }

    /// Adjusts the balance by a signed amount.
    ///
    /// This is the only sanctioned balance mutator. Fails closed with
    /// `InsufficientFunds` if the resulting balance would be negative,
    /// leaving the balance unchanged.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::InsufficientFunds` if the delta would drive the
    /// balance below zero.
    pub fn apply_delta(&mut self, delta: Decimal) -> Result<Decimal, WalletError> {
        let next = self.balance + delta;
        if next < Decimal::ZERO {
            return Err(WalletError::InsufficientFunds {
                requested: -delta,
                available: self.balance,
            });
        }
        self.balance = next;
        Ok(self.balance)
    }
}
