//! Append-only transaction records and balance rules.
//!
//! The ledger is the source of truth for every balance-affecting event.
//! Entries are immutable once recorded; the account balance must always
//! equal the signed sum of completed entries for that address.
//!
//! # Modules
//!
//! - `types` - Transaction records, types, statuses, and metadata
//! - `validation` - Input validation shared by all fund-moving operations
//! - `balance` - Signed-sum balance derivation over entries

pub mod balance;
pub mod types;
pub mod validation;

#[cfg(test)]
mod balance_props;

pub use balance::completed_balance;
pub use types::{
    EntryDirection, NewTransaction, Transaction, TransactionMetadata, TransactionStatus,
    TransactionType,
};
pub use validation::{require_positive_amount, require_reason};
