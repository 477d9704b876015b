//! State transition logic for deposit and withdrawal requests.
//!
//! All methods are associated functions that validate a transition against
//! the current status and return an action record carrying the new status
//! and audit data. Callers apply the action and post any ledger effect
//! inside the same store transaction, so a stale status can never be acted
//! on twice.

use chrono::Utc;

use super::error::WorkflowError;
use super::types::{DepositStatus, WithdrawalStatus};

/// Resolution of a deposit request transition.
#[derive(Debug, Clone)]
pub enum DepositAction {
    /// Approve a pending deposit.
    Approve {
        /// The new status after approval.
        new_status: DepositStatus,
        /// Optional note from the approving admin.
        admin_note: Option<String>,
        /// When the request was approved.
        resolved_at: chrono::DateTime<Utc>,
    },
    /// Reject a pending deposit.
    Reject {
        /// The new status after rejection.
        new_status: DepositStatus,
        /// The reason for rejection.
        reason: String,
        /// When the request was rejected.
        resolved_at: chrono::DateTime<Utc>,
    },
}

impl DepositAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> DepositStatus {
        match self {
            Self::Approve { new_status, .. } | Self::Reject { new_status, .. } => *new_status,
        }
    }
}

/// Resolution of a withdrawal request transition.
#[derive(Debug, Clone)]
pub enum WithdrawalAction {
    /// Approve a pending or processing withdrawal.
    Approve {
        /// The new status after approval.
        new_status: WithdrawalStatus,
        /// Optional note from the approving admin.
        admin_note: Option<String>,
        /// When the request was approved.
        resolved_at: chrono::DateTime<Utc>,
    },
    /// Reject a pending or processing withdrawal.
    Reject {
        /// The new status after rejection.
        new_status: WithdrawalStatus,
        /// The reason for rejection.
        reason: String,
        /// When the request was rejected.
        resolved_at: chrono::DateTime<Utc>,
    },
    /// Mark a pending withdrawal as being worked on.
    MarkProcessing {
        /// The new status after marking.
        new_status: WithdrawalStatus,
        /// Optional note from the admin.
        admin_note: Option<String>,
        /// When the request was marked.
        marked_at: chrono::DateTime<Utc>,
    },
}

impl WithdrawalAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> WithdrawalStatus {
        match self {
            Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::MarkProcessing { new_status, .. } => *new_status,
        }
    }
}

/// Stateless service for request workflow transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Approve a deposit request.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidDepositTransition` if the request is
    /// not pending.
    pub fn approve_deposit(
        current: DepositStatus,
        admin_note: Option<String>,
    ) -> Result<DepositAction, WorkflowError> {
        match current {
            DepositStatus::Pending => Ok(DepositAction::Approve {
                new_status: DepositStatus::Approved,
                admin_note,
                resolved_at: Utc::now(),
            }),
            _ => Err(WorkflowError::InvalidDepositTransition {
                from: current,
                to: DepositStatus::Approved,
            }),
        }
    }

    /// Reject a deposit request with a reason.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::RejectionReasonRequired` if the reason is
    /// empty, or `WorkflowError::InvalidDepositTransition` if the request is
    /// not pending.
    pub fn reject_deposit(
        current: DepositStatus,
        reason: String,
    ) -> Result<DepositAction, WorkflowError> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }

        match current {
            DepositStatus::Pending => Ok(DepositAction::Reject {
                new_status: DepositStatus::Rejected,
                reason,
                resolved_at: Utc::now(),
            }),
            _ => Err(WorkflowError::InvalidDepositTransition {
                from: current,
                to: DepositStatus::Rejected,
            }),
        }
    }

    /// Approve a withdrawal request. Valid from Pending or Processing.
    ///
    /// Balance sufficiency is NOT checked here: the caller re-checks it
    /// against the live account inside the same store transaction.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidWithdrawalTransition` if the request is
    /// already resolved.
    pub fn approve_withdrawal(
        current: WithdrawalStatus,
        admin_note: Option<String>,
    ) -> Result<WithdrawalAction, WorkflowError> {
        if current.is_resolvable() {
            Ok(WithdrawalAction::Approve {
                new_status: WithdrawalStatus::Approved,
                admin_note,
                resolved_at: Utc::now(),
            })
        } else {
            Err(WorkflowError::InvalidWithdrawalTransition {
                from: current,
                to: WithdrawalStatus::Approved,
            })
        }
    }

    /// Reject a withdrawal request with a reason. Valid from Pending or
    /// Processing.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::RejectionReasonRequired` if the reason is
    /// empty, or `WorkflowError::InvalidWithdrawalTransition` if the request
    /// is already resolved.
    pub fn reject_withdrawal(
        current: WithdrawalStatus,
        reason: String,
    ) -> Result<WithdrawalAction, WorkflowError> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }

        if current.is_resolvable() {
            Ok(WithdrawalAction::Reject {
                new_status: WithdrawalStatus::Rejected,
                reason,
                resolved_at: Utc::now(),
            })
        } else {
            Err(WorkflowError::InvalidWithdrawalTransition {
                from: current,
                to: WithdrawalStatus::Rejected,
            })
        }
    }

    /// Mark a withdrawal request as being worked on. Valid from Pending only.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidWithdrawalTransition` from any other
    /// status (marking twice is an error).
    pub fn mark_processing(
        current: WithdrawalStatus,
        admin_note: Option<String>,
    ) -> Result<WithdrawalAction, WorkflowError> {
        match current {
            WithdrawalStatus::Pending => Ok(WithdrawalAction::MarkProcessing {
                new_status: WithdrawalStatus::Processing,
                admin_note,
                marked_at: Utc::now(),
            }),
            _ => Err(WorkflowError::InvalidWithdrawalTransition {
                from: current,
                to: WithdrawalStatus::Processing,
            }),
        }
    }

    /// Check if a deposit status transition is valid.
    #[must_use]
    pub fn is_valid_deposit_transition(from: DepositStatus, to: DepositStatus) -> bool {
        matches!(
            (from, to),
            (
                DepositStatus::Pending,
                DepositStatus::Approved | DepositStatus::Rejected
            )
        )
    }

    /// Check if a withdrawal status transition is valid.
    #[must_use]
    pub fn is_valid_withdrawal_transition(from: WithdrawalStatus, to: WithdrawalStatus) -> bool {
        matches!(
            (from, to),
            (
                WithdrawalStatus::Pending,
                WithdrawalStatus::Processing
                    | WithdrawalStatus::Approved
                    | WithdrawalStatus::Rejected
            ) | (
                WithdrawalStatus::Processing,
                WithdrawalStatus::Approved | WithdrawalStatus::Rejected
            )
        )
    }
}
