//! Deposit and withdrawal request state machines.
//!
//! Requests are submitted by customers and resolved by an admin. Approval is
//! the only path that produces a ledger entry; rejection captures a reason
//! and leaves balances untouched.
//!
//! # Modules
//!
//! - `types` - Request records and status enums
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use service::{DepositAction, WithdrawalAction, WorkflowService};
pub use types::{DepositRequest, DepositStatus, WithdrawalRequest, WithdrawalStatus};
