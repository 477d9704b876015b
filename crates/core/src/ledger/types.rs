//! Ledger domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use maison_shared::types::{TransactionId, WalletAddress};

/// Kind of balance event a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Approved deposit request.
    Deposit,
    /// Approved withdrawal request.
    Withdrawal,
    /// One leg of an admin transfer between two wallets.
    Transfer,
    /// Direct admin credit outside the request workflow.
    ManualAdd,
    /// Direct admin deduction outside the request workflow.
    ManualDeduct,
}

impl TransactionType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::Transfer => "transfer",
            Self::ManualAdd => "manual_add",
            Self::ManualDeduct => "manual_deduct",
        }
    }

    /// Parses a type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deposit" => Some(Self::Deposit),
            "withdrawal" => Some(Self::Withdrawal),
            "transfer" => Some(Self::Transfer),
            "manual_add" => Some(Self::ManualAdd),
            "manual_deduct" => Some(Self::ManualDeduct),
            _ => None,
        }
    }

    /// Returns the direction fixed by this type, if any.
    ///
    /// `Transfer` has no fixed direction: its two legs carry one of each.
    #[must_use]
    pub fn fixed_direction(&self) -> Option<EntryDirection> {
        match self {
            Self::Deposit | Self::ManualAdd => Some(EntryDirection::Credit),
            Self::Withdrawal | Self::ManualDeduct => Some(EntryDirection::Debit),
            Self::Transfer => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which way an entry moves the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryDirection {
    /// Increases the balance.
    Credit,
    /// Decreases the balance.
    Debit,
}

impl EntryDirection {
    /// Applies the direction's sign to a positive magnitude.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Credit => amount,
            Self::Debit => -amount,
        }
    }
}

/// Lifecycle status of a ledger entry.
///
/// Entries created through the approval and manual paths are always posted
/// as `Completed`; the other statuses exist for imported or failed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Recorded but not yet settled.
    Pending,
    /// Settled; counts toward the balance.
    Completed,
    /// Terminally failed; no balance effect.
    Failed,
    /// Cancelled before settlement; no balance effect.
    Cancelled,
}

impl TransactionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if the entry counts toward the balance.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional audit metadata carried by a ledger entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    /// Note captured from the resolving or acting admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
    /// The other wallet in a transfer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<WalletAddress>,
    /// Payment method declared on the originating deposit request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Reference to an uploaded payment proof.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_reference: Option<String>,
}

impl TransactionMetadata {
    /// Returns true if no metadata field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.admin_note.is_none()
            && self.counterparty.is_none()
            && self.payment_method.is_none()
            && self.proof_reference.is_none()
    }
}

/// Input for recording a new ledger entry.
///
/// The constructors enforce the type/direction pairing so a deposit can never
/// be recorded as a debit.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// The account this entry belongs to.
    pub wallet_address: WalletAddress,
    /// Kind of balance event.
    pub tx_type: TransactionType,
    /// Which way the entry moves the balance.
    pub direction: EntryDirection,
    /// Positive magnitude.
    pub amount: Decimal,
    /// Status to record the entry with.
    pub status: TransactionStatus,
    /// Human-readable description.
    pub description: String,
    /// Audit metadata.
    pub metadata: TransactionMetadata,
}

impl NewTransaction {
    /// A completed deposit entry from an approved deposit request.
    #[must_use]
    pub fn deposit(wallet_address: WalletAddress, amount: Decimal) -> Self {
        Self {
            wallet_address,
            tx_type: TransactionType::Deposit,
            direction: EntryDirection::Credit,
            amount,
            status: TransactionStatus::Completed,
            description: "Deposit".to_string(),
            metadata: TransactionMetadata::default(),
        }
    }

    /// A completed withdrawal entry from an approved withdrawal request.
    #[must_use]
    pub fn withdrawal(wallet_address: WalletAddress, amount: Decimal) -> Self {
        Self {
            wallet_address,
            tx_type: TransactionType::Withdrawal,
            direction: EntryDirection::Debit,
            amount,
            status: TransactionStatus::Completed,
            description: "Withdrawal".to_string(),
            metadata: TransactionMetadata::default(),
        }
    }

    /// A completed manual credit.
    #[must_use]
    pub fn manual_add(wallet_address: WalletAddress, amount: Decimal, note: &str) -> Self {
        Self {
            wallet_address,
            tx_type: TransactionType::ManualAdd,
            direction: EntryDirection::Credit,
            amount,
            status: TransactionStatus::Completed,
            description: "Manual credit".to_string(),
            metadata: TransactionMetadata {
                admin_note: Some(note.to_string()),
                ..TransactionMetadata::default()
            },
        }
    }

    /// A completed manual deduction.
    #[must_use]
    pub fn manual_deduct(wallet_address: WalletAddress, amount: Decimal, note: &str) -> Self {
        Self {
            wallet_address,
            tx_type: TransactionType::ManualDeduct,
            direction: EntryDirection::Debit,
            amount,
            status: TransactionStatus::Completed,
            description: "Manual deduction".to_string(),
            metadata: TransactionMetadata {
                admin_note: Some(note.to_string()),
                ..TransactionMetadata::default()
            },
        }
    }

    /// The outgoing leg of an admin transfer.
    #[must_use]
    pub fn transfer_out(
        wallet_address: WalletAddress,
        counterparty: WalletAddress,
        amount: Decimal,
        note: &str,
    ) -> Self {
        Self {
            wallet_address,
            tx_type: TransactionType::Transfer,
            direction: EntryDirection::Debit,
            amount,
            status: TransactionStatus::Completed,
            description: format!("Transfer to {counterparty}"),
            metadata: TransactionMetadata {
                admin_note: Some(note.to_string()),
                counterparty: Some(counterparty),
                ..TransactionMetadata::default()
            },
        }
    }

    /// The incoming leg of an admin transfer.
    #[must_use]
    pub fn transfer_in(
        wallet_address: WalletAddress,
        counterparty: WalletAddress,
        amount: Decimal,
        note: &str,
    ) -> Self {
        Self {
            wallet_address,
            tx_type: TransactionType::Transfer,
            direction: EntryDirection::Credit,
            amount,
            status: TransactionStatus::Completed,
            description: format!("Transfer from {counterparty}"),
            metadata: TransactionMetadata {
                admin_note: Some(note.to_string()),
                counterparty: Some(counterparty),
                ..TransactionMetadata::default()
            },
        }
    }

    /// Overrides the default description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Merges extra metadata fields into the entry.
    #[must_use]
    pub fn with_metadata(mut self, metadata: TransactionMetadata) -> Self {
        if metadata.admin_note.is_some() {
            self.metadata.admin_note = metadata.admin_note;
        }
        if metadata.counterparty.is_some() {
            self.metadata.counterparty = metadata.counterparty;
        }
        if metadata.payment_method.is_some() {
            self.metadata.payment_method = metadata.payment_method;
        }
        if metadata.proof_reference.is_some() {
            self.metadata.proof_reference = metadata.proof_reference;
        }
        self
    }
}

/// An immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique entry identifier.
    pub id: TransactionId,
    /// The account this entry belongs to.
    pub wallet_address: WalletAddress,
    /// Kind of balance event.
    pub tx_type: TransactionType,
    /// Which way the entry moves the balance.
    pub direction: EntryDirection,
    /// Positive magnitude.
    pub amount: Decimal,
    /// Lifecycle status.
    pub status: TransactionStatus,
    /// Human-readable description.
    pub description: String,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
    /// Audit metadata.
    #[serde(default, skip_serializing_if = "TransactionMetadata::is_empty")]
    pub metadata: TransactionMetadata,
}

impl Transaction {
    /// Materializes a new entry with an assigned id and timestamp.
    #[must_use]
    pub fn from_new(new: NewTransaction, id: TransactionId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            wallet_address: new.wallet_address,
            tx_type: new.tx_type,
            direction: new.direction,
            amount: new.amount,
            status: new.status,
            description: new.description,
            created_at,
            metadata: new.metadata,
        }
    }

    /// The signed balance effect of this entry.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.direction.signed(self.amount)
    }
}
