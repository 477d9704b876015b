//! JSON key-value persistence backends.
//!
//! The storefront persists its records as a handful of flat, JSON-serialized
//! keys. The `KvBackend` trait mirrors that contract: read one key, write a
//! batch of keys. `put_many` is the unit the store commits with, so a backend
//! should make each individual key write atomic (the file backend writes to a
//! temp file and renames).

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;

use maison_shared::WalletError;

/// A flat JSON key-value persistence backend.
pub trait KvBackend: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, WalletError>;

    /// Writes a batch of key-value pairs.
    fn put_many(&self, entries: &[(&str, Value)]) -> Result<(), WalletError>;
}

/// File-per-key backend: `{dir}/{key}.json`.
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Opens (creating if needed) a backend rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Storage` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, WalletError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| WalletError::Storage(format!("create {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<Value>, WalletError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(WalletError::Storage(format!(
                    "read {}: {e}",
                    path.display()
                )));
            }
        };
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| WalletError::Storage(format!("parse {}: {e}", path.display())))?;
        Ok(Some(value))
    }

    fn put_many(&self, entries: &[(&str, Value)]) -> Result<(), WalletError> {
        for (key, value) in entries {
            let path = self.path_for(key);
            let tmp = self.dir.join(format!("{key}.json.tmp"));
            let bytes = serde_json::to_vec_pretty(value)
                .map_err(|e| WalletError::Storage(format!("serialize {key}: {e}")))?;
            fs::write(&tmp, bytes)
                .map_err(|e| WalletError::Storage(format!("write {}: {e}", tmp.display())))?;
            fs::rename(&tmp, &path)
                .map_err(|e| WalletError::Storage(format!("rename {}: {e}", path.display())))?;
        }
        Ok(())
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBackend {
    map: Mutex<HashMap<String, Value>>,
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Value>, WalletError> {
        let map = self
            .map
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(map.get(key).cloned())
    }

    fn put_many(&self, entries: &[(&str, Value)]) -> Result<(), WalletError> {
        let mut map = self
            .map
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}
