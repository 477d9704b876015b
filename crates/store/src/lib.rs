//! Persistence layer and wallet service facade for Maison.
//!
//! This crate provides:
//! - A JSON key-value backend (`kv`) matching the storefront's flat record
//!   layout
//! - The in-process transactional state store (`store`)
//! - The `WalletService` facade composing core logic with storage
//! - Admin reporting queries (`stats`)

pub mod kv;
pub mod service;
pub mod state;
pub mod stats;
pub mod store;

#[cfg(test)]
mod service_props;

pub use kv::{JsonFileBackend, KvBackend, MemoryBackend};
pub use service::{SubmitDeposit, SubmitWithdrawal, WalletService};
pub use stats::SystemStats;
pub use store::Store;
