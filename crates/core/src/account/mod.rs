//! Balance-bearing accounts and customer profiles.
//!
//! # Modules
//!
//! - `types` - Account, profile, KYC status, and tier types

pub mod types;

pub use types::{Account, KycStatus, Profile, ProfileUpdate, Tier};
