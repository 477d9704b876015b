//! Proof storage implementation using Apache OpenDAL.

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use opendal::{ErrorKind, Operator, services};

use maison_shared::types::{ProofId, WalletAddress};

use super::config::{ProofStorageConfig, ProofStorageProvider};
use super::error::ProofStorageError;

/// Request to store an uploaded proof.
#[derive(Debug, Clone)]
pub struct StoreProofRequest {
    /// Wallet the proof belongs to.
    pub wallet_address: WalletAddress,
    /// Proof identifier.
    pub proof_id: ProofId,
    /// Original filename.
    pub filename: String,
    /// Content type (MIME type).
    pub content_type: String,
    /// File contents.
    pub bytes: Bytes,
}

/// Reference to a stored proof, attached to deposit requests and KYC
/// submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofReference {
    /// Storage key.
    pub key: String,
    /// Size of the stored blob in bytes.
    pub size: u64,
}

/// Presigned download URL for admin review.
#[derive(Debug, Clone)]
pub struct ProofDownloadUrl {
    /// The presigned URL.
    pub url: String,
    /// HTTP method to use.
    pub method: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
}

/// Storage service for payment proofs and KYC documents.
pub struct ProofStorage {
    operator: Operator,
    config: ProofStorageConfig,
}

impl ProofStorage {
    /// Create a new proof storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: ProofStorageConfig) -> Result<Self, ProofStorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &ProofStorageProvider) -> Result<Operator, ProofStorageError> {
        match provider {
            ProofStorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| ProofStorageError::configuration(e.to_string()))?
                    .finish())
            }
            ProofStorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| ProofStorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| ProofStorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Validate an upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if file size or MIME type is invalid.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), ProofStorageError> {
        if size > self.config.max_file_size {
            return Err(ProofStorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(ProofStorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Generate the storage key for a proof.
    ///
    /// Format: `{wallet_address}/{proof_id}/{sanitized_filename}`
    #[must_use]
    pub fn generate_storage_key(req: &StoreProofRequest) -> String {
        format!(
            "{}/{}/{}",
            req.wallet_address,
            req.proof_id,
            sanitize_filename(&req.filename)
        )
    }

    /// Store an uploaded proof and return its reference.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the write fails.
    pub async fn store(&self, req: StoreProofRequest) -> Result<ProofReference, ProofStorageError> {
        let size = req.bytes.len() as u64;
        self.validate_upload(&req.content_type, size)?;

        let key = Self::generate_storage_key(&req);
        self.operator
            .write(&key, req.bytes)
            .await
            .map_err(ProofStorageError::from)?;

        Ok(ProofReference { key, size })
    }

    /// Generate a presigned download URL for admin review.
    ///
    /// # Errors
    ///
    /// Returns an error if presigning is not supported or fails.
    pub async fn presign_download(&self, key: &str) -> Result<ProofDownloadUrl, ProofStorageError> {
        let ttl = Duration::from_secs(self.config.presign_download_ttl_secs);

        let presigned = self
            .operator
            .presign_read(key, ttl)
            .await
            .map_err(ProofStorageError::from)?;

        Ok(ProofDownloadUrl {
            url: presigned.uri().to_string(),
            method: presigned.method().to_string(),
            expires_at: Utc::now()
                + chrono::Duration::seconds(
                    i64::try_from(self.config.presign_download_ttl_secs).unwrap_or(i64::MAX),
                ),
        })
    }

    /// Check if a proof exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(_) => false,
        }
    }

    /// Delete a proof from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), ProofStorageError> {
        self.operator
            .delete(key)
            .await
            .map_err(ProofStorageError::from)
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

/// Sanitize a filename for use in a storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
