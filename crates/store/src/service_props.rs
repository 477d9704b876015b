//! Property tests for the service facade.
//!
//! Drives random operation sequences through a fully wired `WalletService`
//! and checks the system-wide invariants afterwards: every balance equals
//! the signed sum of its completed ledger entries, no balance is negative,
//! and transfer legs always come in matched pairs.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use maison_core::ledger::{TransactionType, completed_balance};
use maison_shared::types::WalletAddress;

use crate::service::{SubmitDeposit, SubmitWithdrawal, WalletService};
use crate::store::Store;

const ACCESS_CODE: &str = "prop-access";

/// A randomly chosen operation against one of a small pool of wallets.
#[derive(Debug, Clone)]
enum Op {
    SubmitDeposit { wallet: usize, amount: Decimal },
    ApproveOldestDeposit,
    RejectOldestDeposit,
    SubmitWithdrawal { wallet: usize, amount: Decimal },
    ApproveOldestWithdrawal,
    RejectOldestWithdrawal,
    ManualAdd { wallet: usize, amount: Decimal },
    ManualDeduct { wallet: usize, amount: Decimal },
    Transfer { from: usize, to: usize, amount: Decimal },
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn wallet_strategy() -> impl Strategy<Value = usize> {
    0usize..3
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (wallet_strategy(), amount_strategy())
            .prop_map(|(wallet, amount)| Op::SubmitDeposit { wallet, amount }),
        Just(Op::ApproveOldestDeposit),
        Just(Op::RejectOldestDeposit),
        (wallet_strategy(), amount_strategy())
            .prop_map(|(wallet, amount)| Op::SubmitWithdrawal { wallet, amount }),
        Just(Op::ApproveOldestWithdrawal),
        Just(Op::RejectOldestWithdrawal),
        (wallet_strategy(), amount_strategy())
            .prop_map(|(wallet, amount)| Op::ManualAdd { wallet, amount }),
        (wallet_strategy(), amount_strategy())
            .prop_map(|(wallet, amount)| Op::ManualDeduct { wallet, amount }),
        (wallet_strategy(), wallet_strategy(), amount_strategy())
            .prop_map(|(from, to, amount)| Op::Transfer { from, to, amount }),
    ]
}

/// Applies an operation, ignoring domain errors: refused operations are part
/// of the state space under test.
fn apply(service: &WalletService, wallets: &[WalletAddress], op: &Op) {
    let result: Result<(), maison_shared::WalletError> = match op {
        Op::SubmitDeposit { wallet, amount } => service
            .submit_deposit(SubmitDeposit {
                wallet_address: wallets[*wallet].clone(),
                amount: *amount,
                payment_method: "bank_transfer".to_string(),
                contact_handle: None,
                proof_reference: None,
            })
            .map(drop),
        Op::ApproveOldestDeposit => oldest_pending_deposit(service)
            .map(|id| service.approve_deposit(id, None).map(drop))
            .unwrap_or(Ok(())),
        Op::RejectOldestDeposit => oldest_pending_deposit(service)
            .map(|id| service.reject_deposit(id, "refused".to_string()).map(drop))
            .unwrap_or(Ok(())),
        Op::SubmitWithdrawal { wallet, amount } => service
            .submit_withdrawal(SubmitWithdrawal {
                wallet_address: wallets[*wallet].clone(),
                amount: *amount,
                payout_details: "IBAN".to_string(),
            })
            .map(drop),
        Op::ApproveOldestWithdrawal => oldest_open_withdrawal(service)
            .map(|id| service.approve_withdrawal(id, None).map(drop))
            .unwrap_or(Ok(())),
        Op::RejectOldestWithdrawal => oldest_open_withdrawal(service)
            .map(|id| {
                service
                    .reject_withdrawal(id, "refused".to_string())
                    .map(drop)
            })
            .unwrap_or(Ok(())),
        Op::ManualAdd { wallet, amount } => service
            .manual_add(&wallets[*wallet], *amount, "adjustment")
            .map(drop),
        Op::ManualDeduct { wallet, amount } => service
            .manual_deduct(&wallets[*wallet], *amount, "adjustment")
            .map(drop),
        Op::Transfer { from, to, amount } => service
            .manual_transfer(&wallets[*from], &wallets[*to], *amount, "rebalance")
            .map(drop),
    };
    drop(result);
}

fn oldest_pending_deposit(
    service: &WalletService,
) -> Option<maison_shared::types::DepositRequestId> {
    service
        .list_deposit_requests()
        .ok()?
        .into_iter()
        .rev()
        .find(|r| r.status.is_resolvable())
        .map(|r| r.id)
}

fn oldest_open_withdrawal(
    service: &WalletService,
) -> Option<maison_shared::types::WithdrawalRequestId> {
    service
        .list_withdrawal_requests()
        .ok()?
        .into_iter()
        .rev()
        .find(|r| r.status.is_resolvable())
        .map(|r| r.id)
}

fn wired_service() -> (WalletService, Vec<WalletAddress>) {
    let service = WalletService::new(Arc::new(Store::in_memory()), ACCESS_CODE);
    assert!(service.authorize_admin(ACCESS_CODE).unwrap_or(false));
    let wallets: Vec<WalletAddress> = (0..3)
        .map(|_| service.create_wallet().map(|(account, _)| account.address))
        .collect::<Result<_, _>>()
        .unwrap();
    (service, wallets)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// After any operation sequence, every balance equals the signed sum of
    /// its completed ledger entries and is never negative.
    #[test]
    fn prop_balances_conserve_and_stay_non_negative(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (service, wallets) = wired_service();
        for op in &ops {
            apply(&service, &wallets, op);
        }

        let ledger = service.all_transactions().unwrap();
        for wallet in &wallets {
            let account = service.account(wallet).unwrap();
            prop_assert!(account.balance >= Decimal::ZERO);
            prop_assert_eq!(account.balance, completed_balance(&ledger, wallet));
        }
    }

    /// Transfer legs always come in pairs whose signed amounts cancel.
    #[test]
    fn prop_transfer_legs_cancel(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (service, wallets) = wired_service();
        for op in &ops {
            apply(&service, &wallets, op);
        }

        let legs: Vec<_> = service
            .all_transactions()
            .unwrap()
            .into_iter()
            .filter(|t| t.tx_type == TransactionType::Transfer)
            .collect();

        prop_assert_eq!(legs.len() % 2, 0);
        let net: Decimal = legs.iter().map(|t| t.signed_amount()).sum();
        prop_assert_eq!(net, Decimal::ZERO);
    }

    /// A rejected request never produces a ledger entry.
    #[test]
    fn prop_rejections_leave_no_ledger_trace(amounts in prop::collection::vec(amount_strategy(), 1..10)) {
        let (service, wallets) = wired_service();
        for amount in &amounts {
            let request = service.submit_deposit(SubmitDeposit {
                wallet_address: wallets[0].clone(),
                amount: *amount,
                payment_method: "bank_transfer".to_string(),
                contact_handle: None,
                proof_reference: None,
            }).unwrap();
            service.reject_deposit(request.id, "refused".to_string()).unwrap();
        }

        prop_assert!(service.all_transactions().unwrap().is_empty());
        prop_assert_eq!(service.account(&wallets[0]).unwrap().balance, Decimal::ZERO);
    }
}
