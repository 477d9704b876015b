//! Property tests for the request state machines.

use proptest::prelude::*;

use super::service::WorkflowService;
use super::types::{DepositStatus, WithdrawalStatus};

fn deposit_status_strategy() -> impl Strategy<Value = DepositStatus> {
    prop_oneof![
        Just(DepositStatus::Pending),
        Just(DepositStatus::Approved),
        Just(DepositStatus::Rejected),
    ]
}

fn withdrawal_status_strategy() -> impl Strategy<Value = WithdrawalStatus> {
    prop_oneof![
        Just(WithdrawalStatus::Pending),
        Just(WithdrawalStatus::Processing),
        Just(WithdrawalStatus::Approved),
        Just(WithdrawalStatus::Rejected),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Terminal states never admit any transition.
    #[test]
    fn prop_terminal_deposit_states_are_closed(
        from in deposit_status_strategy(),
        to in deposit_status_strategy(),
    ) {
        if from.is_terminal() {
            prop_assert!(!WorkflowService::is_valid_deposit_transition(from, to));
        }
    }

    /// Terminal withdrawal states never admit any transition.
    #[test]
    fn prop_terminal_withdrawal_states_are_closed(
        from in withdrawal_status_strategy(),
        to in withdrawal_status_strategy(),
    ) {
        if from.is_terminal() {
            prop_assert!(!WorkflowService::is_valid_withdrawal_transition(from, to));
        }
    }

    /// Every transition the service accepts is also reported valid, and
    /// vice versa (deposit approve path).
    #[test]
    fn prop_deposit_approve_matches_transition_table(from in deposit_status_strategy()) {
        let accepted = WorkflowService::approve_deposit(from, None).is_ok();
        prop_assert_eq!(
            accepted,
            WorkflowService::is_valid_deposit_transition(from, DepositStatus::Approved)
        );
    }

    /// Withdrawal approval agrees with the transition table.
    #[test]
    fn prop_withdrawal_approve_matches_transition_table(from in withdrawal_status_strategy()) {
        let accepted = WorkflowService::approve_withdrawal(from, None).is_ok();
        prop_assert_eq!(
            accepted,
            WorkflowService::is_valid_withdrawal_transition(from, WithdrawalStatus::Approved)
        );
    }

    /// A rejection with a non-empty reason succeeds exactly from resolvable
    /// states, and the reason is preserved on the action.
    #[test]
    fn prop_withdrawal_reject_preserves_reason(
        from in withdrawal_status_strategy(),
        reason in "[a-z]{1,20}",
    ) {
        let result = WorkflowService::reject_withdrawal(from, reason.clone());
        if from.is_resolvable() {
            let action = result.unwrap();
            prop_assert_eq!(action.new_status(), WithdrawalStatus::Rejected);
            if let super::service::WithdrawalAction::Reject { reason: captured, .. } = action {
                prop_assert_eq!(captured, reason);
            } else {
                prop_assert!(false, "expected a Reject action");
            }
        } else {
            prop_assert!(result.is_err());
        }
    }
}
