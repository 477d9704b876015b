//! Transactional state store.
//!
//! All mutation goes through `Store::transaction`, which serializes writers
//! behind one lock and commits with copy-on-write: the closure mutates a
//! clone of the state, the clone is persisted, and only then does it replace
//! the live state. A closure error or a failed persist leaves both the live
//! state and the backend untouched, which is what makes multi-record
//! operations (approve = status + balance + ledger entry, transfer = two
//! legs) all-or-nothing.

use std::sync::Mutex;

use maison_shared::WalletError;

use crate::kv::{KvBackend, MemoryBackend};
use crate::state::WalletState;

/// Serialized, copy-on-write store over a key-value backend.
pub struct Store {
    backend: Box<dyn KvBackend>,
    state: Mutex<WalletState>,
}

impl Store {
    /// Opens a store over `backend`, loading any persisted state.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Storage` if the persisted state cannot be read.
    pub fn open(backend: Box<dyn KvBackend>) -> Result<Self, WalletError> {
        let state = WalletState::load(backend.as_ref())?;
        Ok(Self {
            backend,
            state: Mutex::new(state),
        })
    }

    /// Creates a store over a fresh in-memory backend.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            backend: Box::new(MemoryBackend::default()),
            state: Mutex::new(WalletState::default()),
        }
    }

    /// Runs a read-only closure against a consistent snapshot of the state.
    pub fn read<R>(&self, f: impl FnOnce(&WalletState) -> R) -> R {
        let state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&state)
    }

    /// Runs a mutating closure as an atomic transaction.
    ///
    /// The closure receives a working copy of the state. On `Ok`, the copy is
    /// persisted and swapped in; on `Err` (from the closure or the persist)
    /// the live state is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Propagates the closure's error, or `WalletError::Storage` if the
    /// commit write fails.
    pub fn transaction<R>(
        &self,
        f: impl FnOnce(&mut WalletState) -> Result<R, WalletError>,
    ) -> Result<R, WalletError> {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut working = state.clone();
        let result = f(&mut working)?;

        working.persist(self.backend.as_ref())?;
        *state = working;
        tracing::debug!("store transaction committed");
        Ok(result)
    }
}
