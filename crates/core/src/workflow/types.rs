//! Workflow domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use maison_shared::types::{DepositRequestId, WalletAddress, WithdrawalRequestId};

/// Status of a deposit request.
///
/// Valid transitions:
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
///
/// Approved and Rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    /// Awaiting admin resolution.
    Pending,
    /// Approved; funds credited and a ledger entry recorded.
    Approved,
    /// Rejected with a reason; no balance effect.
    Rejected,
}

impl DepositStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if no further transitions are allowed.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns true if the request can still be approved or rejected.
    #[must_use]
    pub fn is_resolvable(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a withdrawal request.
///
/// Valid transitions:
/// - Pending → Processing (mark processing)
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
/// - Processing → Approved (approve)
/// - Processing → Rejected (reject)
///
/// Processing is an admin "working on it" marker with no balance effect;
/// it remains eligible for approval and rejection. Approved and Rejected
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStatus {
    /// Awaiting admin resolution.
    Pending,
    /// An admin is handling the payout.
    Processing,
    /// Approved; funds debited and a ledger entry recorded.
    Approved,
    /// Rejected with a reason; no balance effect.
    Rejected,
}

impl WithdrawalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if no further transitions are allowed.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns true if the request can still be approved or rejected.
    #[must_use]
    pub fn is_resolvable(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

impl std::fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer's pending ask to credit their wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRequest {
    /// Unique request identifier.
    pub id: DepositRequestId,
    /// The requesting wallet.
    pub wallet_address: WalletAddress,
    /// Requested amount (positive).
    pub amount: Decimal,
    /// Declared payment method (e.g. "bank_transfer").
    pub payment_method: String,
    /// Optional messaging handle for follow-up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_handle: Option<String>,
    /// Reference to an uploaded payment proof.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_reference: Option<String>,
    /// Current status.
    pub status: DepositStatus,
    /// Note or rejection reason captured at resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// When the request was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// A customer's pending ask to pay out from their wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    /// Unique request identifier.
    pub id: WithdrawalRequestId,
    /// The requesting wallet.
    pub wallet_address: WalletAddress,
    /// Requested amount (positive).
    pub amount: Decimal,
    /// Free-form payout destination details.
    pub payout_details: String,
    /// Current status.
    pub status: WithdrawalStatus,
    /// Note or rejection reason captured at resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// When the request was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}
