//! Signed-sum balance derivation over ledger entries.
//!
//! The account balance held in the store is a cache of this derivation; the
//! conservation invariant says the two never diverge.

use rust_decimal::Decimal;

use maison_shared::types::WalletAddress;

use super::types::Transaction;

/// Sums the signed amounts of all completed entries for one address.
#[must_use]
pub fn completed_balance(entries: &[Transaction], address: &WalletAddress) -> Decimal {
    entries
        .iter()
        .filter(|e| &e.wallet_address == address && e.status.is_completed())
        .map(Transaction::signed_amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{NewTransaction, Transaction, TransactionStatus};
    use chrono::Utc;
    use maison_shared::types::TransactionId;
    use rust_decimal_macros::dec;

    fn record(new: NewTransaction) -> Transaction {
        Transaction::from_new(new, TransactionId::new(), Utc::now())
    }

    #[test]
    fn test_sums_only_matching_address() {
        let a = WalletAddress::new("A");
        let b = WalletAddress::new("B");
        let entries = vec![
            record(NewTransaction::deposit(a.clone(), dec!(100))),
            record(NewTransaction::deposit(b.clone(), dec!(40))),
            record(NewTransaction::withdrawal(a.clone(), dec!(25))),
        ];

        assert_eq!(completed_balance(&entries, &a), dec!(75));
        assert_eq!(completed_balance(&entries, &b), dec!(40));
    }

    #[test]
    fn test_non_completed_entries_do_not_count() {
        let a = WalletAddress::new("A");
        let mut pending = NewTransaction::deposit(a.clone(), dec!(500));
        pending.status = TransactionStatus::Pending;
        let mut failed = NewTransaction::deposit(a.clone(), dec!(500));
        failed.status = TransactionStatus::Failed;

        let entries = vec![
            record(pending),
            record(failed),
            record(NewTransaction::deposit(a.clone(), dec!(10))),
        ];

        assert_eq!(completed_balance(&entries, &a), dec!(10));
    }

    #[test]
    fn test_empty_ledger_is_zero() {
        let a = WalletAddress::new("A");
        assert_eq!(completed_balance(&[], &a), Decimal::ZERO);
    }
}
