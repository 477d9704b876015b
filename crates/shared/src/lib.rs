//! Shared types, errors, and configuration for the Maison wallet core.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Wallet address newtype
//! - Application-wide error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{WalletError, WalletResult};
