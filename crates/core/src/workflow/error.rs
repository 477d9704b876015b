//! Workflow error types for request lifecycle management.

use thiserror::Error;

use maison_shared::WalletError;

use super::types::{DepositStatus, WithdrawalStatus};

/// Errors that can occur during request state transitions.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Attempted an invalid deposit request transition.
    #[error("deposit request cannot move from {from} to {to}")]
    InvalidDepositTransition {
        /// The current status.
        from: DepositStatus,
        /// The attempted target status.
        to: DepositStatus,
    },

    /// Attempted an invalid withdrawal request transition.
    #[error("withdrawal request cannot move from {from} to {to}")]
    InvalidWithdrawalTransition {
        /// The current status.
        from: WithdrawalStatus,
        /// The attempted target status.
        to: WithdrawalStatus,
    },

    /// Rejection reason is required but not provided.
    #[error("a rejection reason is required")]
    RejectionReasonRequired,
}

impl From<WorkflowError> for WalletError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::InvalidDepositTransition { .. }
            | WorkflowError::InvalidWithdrawalTransition { .. } => {
                Self::InvalidState(err.to_string())
            }
            WorkflowError::RejectionReasonRequired => Self::Validation(err.to_string()),
        }
    }
}
