//! In-memory wallet state and its JSON key mapping.
//!
//! `WalletState` holds every record the system persists, grouped exactly the
//! way the storage keys group them. It is a plain data structure: all
//! mutation policy (authorization, workflow validation, balance checks)
//! lives in `WalletService`, and atomicity lives in `Store`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use maison_core::account::Account;
use maison_core::ledger::{NewTransaction, Transaction};
use maison_core::workflow::{DepositRequest, WithdrawalRequest};
use maison_shared::WalletError;
use maison_shared::types::{DepositRequestId, TransactionId, WalletAddress, WithdrawalRequestId};

use crate::kv::KvBackend;

/// Storage keys, one per record group.
pub mod keys {
    /// All accounts, keyed by wallet address.
    pub const USERS: &str = "users";
    /// The append-only transaction ledger.
    pub const TRANSACTIONS: &str = "transactions";
    /// All deposit requests.
    pub const DEPOSIT_REQUESTS: &str = "depositRequests";
    /// All withdrawal requests.
    pub const WITHDRAWAL_REQUESTS: &str = "withdrawalRequests";
    /// Whether the admin gate is open.
    pub const ADMIN_ACCESS: &str = "adminAccess";
}

/// The complete persisted state of the wallet system.
#[derive(Debug, Clone, Default)]
pub struct WalletState {
    /// Accounts keyed by wallet address.
    pub accounts: BTreeMap<WalletAddress, Account>,
    /// Append-only transaction ledger.
    pub transactions: Vec<Transaction>,
    /// All deposit requests, newest last.
    pub deposit_requests: Vec<DepositRequest>,
    /// All withdrawal requests, newest last.
    pub withdrawal_requests: Vec<WithdrawalRequest>,
    /// Whether the admin gate is currently open.
    pub admin_access: bool,
}

impl WalletState {
    /// Loads state from a backend, treating missing keys as empty.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Storage` if a key cannot be read or parsed.
    pub fn load(backend: &dyn KvBackend) -> Result<Self, WalletError> {
        Ok(Self {
            accounts: read_key(backend, keys::USERS)?.unwrap_or_default(),
            transactions: read_key(backend, keys::TRANSACTIONS)?.unwrap_or_default(),
            deposit_requests: read_key(backend, keys::DEPOSIT_REQUESTS)?.unwrap_or_default(),
            withdrawal_requests: read_key(backend, keys::WITHDRAWAL_REQUESTS)?.unwrap_or_default(),
            admin_access: read_key(backend, keys::ADMIN_ACCESS)?.unwrap_or_default(),
        })
    }

    /// Persists the full state to a backend.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Storage` if serialization or the write fails.
    pub fn persist(&self, backend: &dyn KvBackend) -> Result<(), WalletError> {
        backend.put_many(&[
            (keys::USERS, to_value(keys::USERS, &self.accounts)?),
            (
                keys::TRANSACTIONS,
                to_value(keys::TRANSACTIONS, &self.transactions)?,
            ),
            (
                keys::DEPOSIT_REQUESTS,
                to_value(keys::DEPOSIT_REQUESTS, &self.deposit_requests)?,
            ),
            (
                keys::WITHDRAWAL_REQUESTS,
                to_value(keys::WITHDRAWAL_REQUESTS, &self.withdrawal_requests)?,
            ),
            (
                keys::ADMIN_ACCESS,
                to_value(keys::ADMIN_ACCESS, &self.admin_access)?,
            ),
        ])
    }

    /// Looks up an account by address.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::NotFound` if no account exists at the address.
    pub fn account(&self, address: &WalletAddress) -> Result<&Account, WalletError> {
        self.accounts
            .get(address)
            .ok_or_else(|| WalletError::not_found("account", address))
    }

    /// Looks up an account mutably by address.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::NotFound` if no account exists at the address.
    pub fn account_mut(&mut self, address: &WalletAddress) -> Result<&mut Account, WalletError> {
        self.accounts
            .get_mut(address)
            .ok_or_else(|| WalletError::not_found("account", address))
    }

    /// Returns the account at `address`, creating a fresh zero-balance one
    /// if it does not exist yet.
    pub fn get_or_create_account(
        &mut self,
        address: &WalletAddress,
        now: DateTime<Utc>,
    ) -> &mut Account {
        self.accounts
            .entry(address.clone())
            .or_insert_with(|| Account::new(address.clone(), now))
    }

    /// Looks up a deposit request mutably by id.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::NotFound` if the id is unknown.
    pub fn deposit_mut(
        &mut self,
        id: DepositRequestId,
    ) -> Result<&mut DepositRequest, WalletError> {
        self.deposit_requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| WalletError::not_found("deposit request", id))
    }

    /// Looks up a withdrawal request mutably by id.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::NotFound` if the id is unknown.
    pub fn withdrawal_mut(
        &mut self,
        id: WithdrawalRequestId,
    ) -> Result<&mut WithdrawalRequest, WalletError> {
        self.withdrawal_requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| WalletError::not_found("withdrawal request", id))
    }

    /// Appends a ledger entry, assigning its id and timestamp, and returns
    /// the recorded entry.
    pub fn record(&mut self, new: NewTransaction) -> Transaction {
        let entry = Transaction::from_new(new, TransactionId::new(), Utc::now());
        self.transactions.push(entry.clone());
        entry
    }
}

fn read_key<T: serde::de::DeserializeOwned>(
    backend: &dyn KvBackend,
    key: &str,
) -> Result<Option<T>, WalletError> {
    match backend.get(key)? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| WalletError::Storage(format!("decode {key}: {e}"))),
        None => Ok(None),
    }
}

fn to_value<T: serde::Serialize>(key: &str, value: &T) -> Result<Value, WalletError> {
    serde_json::to_value(value).map_err(|e| WalletError::Storage(format!("encode {key}: {e}")))
}
