//! Admin reporting aggregates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use maison_core::ledger::TransactionType;
use maison_core::workflow::{DepositStatus, WithdrawalStatus};

use crate::state::WalletState;

/// System-wide totals for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStats {
    /// Number of accounts.
    pub total_accounts: usize,
    /// Sum of all account balances.
    pub total_balance: Decimal,
    /// Sum of completed deposit entry amounts.
    pub completed_deposit_volume: Decimal,
    /// Sum of completed withdrawal entry amounts.
    pub completed_withdrawal_volume: Decimal,
    /// Deposit requests awaiting resolution.
    pub pending_deposit_requests: usize,
    /// Withdrawal requests awaiting resolution (pending or processing).
    pub pending_withdrawal_requests: usize,
    /// Total ledger entries recorded.
    pub total_transactions: usize,
}

impl SystemStats {
    /// Computes totals over the current state.
    #[must_use]
    pub fn compute(state: &WalletState) -> Self {
        let total_balance = state.accounts.values().map(|a| a.balance).sum();

        let mut completed_deposit_volume = Decimal::ZERO;
        let mut completed_withdrawal_volume = Decimal::ZERO;
        for entry in &state.transactions {
            if !entry.status.is_completed() {
                continue;
            }
            match entry.tx_type {
                TransactionType::Deposit => completed_deposit_volume += entry.amount,
                TransactionType::Withdrawal => completed_withdrawal_volume += entry.amount,
                _ => {}
            }
        }

        Self {
            total_accounts: state.accounts.len(),
            total_balance,
            completed_deposit_volume,
            completed_withdrawal_volume,
            pending_deposit_requests: state
                .deposit_requests
                .iter()
                .filter(|r| r.status == DepositStatus::Pending)
                .count(),
            pending_withdrawal_requests: state
                .withdrawal_requests
                .iter()
                .filter(|r| r.status.is_resolvable())
                .count(),
            total_transactions: state.transactions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use maison_core::ledger::NewTransaction;
    use maison_core::workflow::{DepositRequest, WithdrawalRequest};
    use maison_shared::types::{DepositRequestId, WalletAddress, WithdrawalRequestId};

    fn addr(s: &str) -> WalletAddress {
        WalletAddress::new(s)
    }

    #[test]
    fn test_compute_over_empty_state() {
        let stats = SystemStats::compute(&WalletState::default());
        assert_eq!(stats.total_accounts, 0);
        assert_eq!(stats.total_balance, Decimal::ZERO);
        assert_eq!(stats.total_transactions, 0);
    }

    #[test]
    fn test_compute_totals() {
        let mut state = WalletState::default();
        let now = Utc::now();

        state
            .get_or_create_account(&addr("A"), now)
            .apply_delta(dec!(70))
            .unwrap();
        state
            .get_or_create_account(&addr("B"), now)
            .apply_delta(dec!(30))
            .unwrap();

        state.record(NewTransaction::deposit(addr("A"), dec!(100)));
        state.record(NewTransaction::withdrawal(addr("A"), dec!(30)));
        state.record(NewTransaction::manual_add(addr("B"), dec!(30), "promo"));

        state.deposit_requests.push(DepositRequest {
            id: DepositRequestId::new(),
            wallet_address: addr("A"),
            amount: dec!(10),
            payment_method: "bank_transfer".to_string(),
            contact_handle: None,
            proof_reference: None,
            status: DepositStatus::Pending,
            admin_note: None,
            created_at: now,
            resolved_at: None,
        });
        state.withdrawal_requests.push(WithdrawalRequest {
            id: WithdrawalRequestId::new(),
            wallet_address: addr("B"),
            amount: dec!(5),
            payout_details: "IBAN".to_string(),
            status: WithdrawalStatus::Processing,
            admin_note: None,
            created_at: now,
            resolved_at: None,
        });

        let stats = SystemStats::compute(&state);
        assert_eq!(stats.total_accounts, 2);
        assert_eq!(stats.total_balance, dec!(100));
        assert_eq!(stats.completed_deposit_volume, dec!(100));
        assert_eq!(stats.completed_withdrawal_volume, dec!(30));
        assert_eq!(stats.pending_deposit_requests, 1);
        // Processing still counts as awaiting resolution.
        assert_eq!(stats.pending_withdrawal_requests, 1);
        assert_eq!(stats.total_transactions, 3);
    }
}
