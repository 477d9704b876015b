//! Common types used across the application.

pub mod address;
pub mod id;

pub use address::WalletAddress;
pub use id::*;
