//! Core wallet business logic for Maison.
//!
//! This crate contains pure business logic with ZERO persistence dependencies.
//! All domain types, validation rules, and state machines live here.
//!
//! # Modules
//!
//! - `account` - Balance-bearing accounts and profiles
//! - `ledger` - Append-only transaction records and balance rules
//! - `workflow` - Deposit and withdrawal request state machines
//! - `session` - Recovery phrase generation and address derivation
//! - `proofs` - Payment proof and KYC document storage

pub mod account;
pub mod ledger;
pub mod proofs;
pub mod session;
pub mod workflow;
