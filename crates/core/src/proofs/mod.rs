//! Payment proof and KYC document storage.
//!
//! The ledger core treats blob storage as an opaque collaborator: the UI
//! uploads a file, gets back a reference, and attaches that reference to a
//! deposit request or a KYC submission. Admins fetch the blob back through a
//! presigned URL when reviewing.
//!
//! # Modules
//!
//! - `config` - Provider selection and upload constraints
//! - `error` - Storage-specific error types
//! - `service` - OpenDAL-backed store/fetch operations

pub mod config;
pub mod error;
pub mod service;

pub use config::{ProofStorageConfig, ProofStorageProvider};
pub use error::ProofStorageError;
pub use service::{ProofReference, ProofStorage, StoreProofRequest};
