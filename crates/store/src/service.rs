//! Wallet service facade.
//!
//! `WalletService` is the single entry point the UI layer talks to. It
//! composes the core domain logic (workflow transitions, balance rules,
//! phrase derivation) with the transactional store, so every fund-moving
//! operation lands as one atomic commit. Admin operations check the gate
//! before touching any state.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use maison_core::account::{Account, ProfileUpdate};
use maison_core::ledger::{
    NewTransaction, Transaction, TransactionMetadata, require_positive_amount, require_reason,
};
use maison_core::session::RecoveryPhrase;
use maison_core::workflow::{
    DepositAction, DepositRequest, DepositStatus, WithdrawalAction, WithdrawalRequest,
    WithdrawalStatus, WorkflowService,
};
use maison_shared::WalletError;
use maison_shared::types::{DepositRequestId, WalletAddress, WithdrawalRequestId};

use crate::stats::SystemStats;
use crate::store::Store;

/// Input for submitting a deposit request.
#[derive(Debug, Clone)]
pub struct SubmitDeposit {
    /// The requesting wallet.
    pub wallet_address: WalletAddress,
    /// Requested amount (must be positive).
    pub amount: Decimal,
    /// Declared payment method (e.g. "bank_transfer").
    pub payment_method: String,
    /// Optional messaging handle for follow-up.
    pub contact_handle: Option<String>,
    /// Reference to an uploaded payment proof.
    pub proof_reference: Option<String>,
}

/// Input for submitting a withdrawal request.
#[derive(Debug, Clone)]
pub struct SubmitWithdrawal {
    /// The requesting wallet.
    pub wallet_address: WalletAddress,
    /// Requested amount (must be positive and covered by the balance).
    pub amount: Decimal,
    /// Free-form payout destination details.
    pub payout_details: String,
}

/// Facade over the store, core workflow, and admin gate.
pub struct WalletService {
    store: Arc<Store>,
    admin_access_code: String,
}

impl WalletService {
    /// Creates a service over a store with the configured admin access code.
    #[must_use]
    pub fn new(store: Arc<Store>, admin_access_code: impl Into<String>) -> Self {
        Self {
            store,
            admin_access_code: admin_access_code.into(),
        }
    }

    // ----- wallet session -----

    /// Creates a brand-new wallet: generates a recovery phrase, derives its
    /// address, and opens a zero-balance account.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Storage` if the commit fails.
    pub fn create_wallet(&self) -> Result<(Account, RecoveryPhrase), WalletError> {
        let phrase = RecoveryPhrase::generate();
        let address = phrase.derive_address();
        let account = self.store.transaction(|state| {
            let account = state.get_or_create_account(&address, Utc::now());
            Ok(account.clone())
        })?;
        tracing::info!(wallet = %account.address, "wallet created");
        Ok((account, phrase))
    }

    /// Opens the wallet a recovery phrase derives to, creating the account
    /// on first access. Possession of the phrase is the only credential.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Validation` if the phrase is malformed.
    pub fn access_wallet(&self, phrase: &str) -> Result<Account, WalletError> {
        let phrase = RecoveryPhrase::parse(phrase)?;
        let address = phrase.derive_address();
        self.store.transaction(|state| {
            let now = Utc::now();
            let account = state.get_or_create_account(&address, now);
            account.profile.last_active = Some(now);
            Ok(account.clone())
        })
    }

    /// Returns the account at an address.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::NotFound` for an unknown address.
    pub fn account(&self, address: &WalletAddress) -> Result<Account, WalletError> {
        self.store
            .read(|state| state.account(address).map(Account::clone))
    }

    /// Applies a partial profile update and stamps `last_active`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::NotFound` for an unknown address.
    pub fn update_profile(
        &self,
        address: &WalletAddress,
        update: ProfileUpdate,
    ) -> Result<Account, WalletError> {
        self.store.transaction(|state| {
            let account = state.account_mut(address)?;
            update.apply(&mut account.profile, Utc::now());
            Ok(account.clone())
        })
    }

    /// Returns the ledger entries for an address, newest first.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::NotFound` for an unknown address.
    pub fn history(&self, address: &WalletAddress) -> Result<Vec<Transaction>, WalletError> {
        self.store.read(|state| {
            state.account(address)?;
            Ok(state
                .transactions
                .iter()
                .rev()
                .filter(|t| &t.wallet_address == address)
                .cloned()
                .collect())
        })
    }

    /// Returns the deposit requests submitted by an address, newest first.
    #[must_use]
    pub fn deposit_requests_for(&self, address: &WalletAddress) -> Vec<DepositRequest> {
        self.store.read(|state| {
            state
                .deposit_requests
                .iter()
                .rev()
                .filter(|r| &r.wallet_address == address)
                .cloned()
                .collect()
        })
    }

    /// Returns the withdrawal requests submitted by an address, newest first.
    #[must_use]
    pub fn withdrawal_requests_for(&self, address: &WalletAddress) -> Vec<WithdrawalRequest> {
        self.store.read(|state| {
            state
                .withdrawal_requests
                .iter()
                .rev()
                .filter(|r| &r.wallet_address == address)
                .cloned()
                .collect()
        })
    }

    // ----- admin gate -----

    /// Attempts to open the admin gate with a credential.
    ///
    /// A match opens the gate and persists it; a mismatch returns
    /// `Ok(false)` without touching state, so probing the gate is not an
    /// error path.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Storage` if persisting the open gate fails.
    pub fn authorize_admin(&self, credential: &str) -> Result<bool, WalletError> {
        if credential != self.admin_access_code {
            tracing::warn!("admin authorization attempt with wrong credential");
            return Ok(false);
        }
        self.store.transaction(|state| {
            state.admin_access = true;
            Ok(())
        })?;
        tracing::info!("admin gate opened");
        Ok(true)
    }

    /// Returns true if the admin gate is currently open.
    #[must_use]
    pub fn is_admin_authorized(&self) -> bool {
        self.store.read(|state| state.admin_access)
    }

    /// Closes the admin gate.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Storage` if the commit fails.
    pub fn revoke_admin(&self) -> Result<(), WalletError> {
        self.store.transaction(|state| {
            state.admin_access = false;
            Ok(())
        })?;
        tracing::info!("admin gate closed");
        Ok(())
    }

    fn require_admin(&self) -> Result<(), WalletError> {
        if self.is_admin_authorized() {
            Ok(())
        } else {
            Err(WalletError::Unauthorized(
                "admin access has not been granted".to_string(),
            ))
        }
    }

    // ----- deposit workflow -----

    /// Submits a deposit request for admin review.
    ///
    /// Creates the account on first contact. No balance effect until
    /// approval.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Validation` for a non-positive amount or a
    /// missing payment method.
    pub fn submit_deposit(&self, input: SubmitDeposit) -> Result<DepositRequest, WalletError> {
        require_positive_amount(input.amount)?;
        require_reason(&input.payment_method, "a payment method")?;

        let request = self.store.transaction(|state| {
            let now = Utc::now();
            state.get_or_create_account(&input.wallet_address, now);
            let request = DepositRequest {
                id: DepositRequestId::new(),
                wallet_address: input.wallet_address.clone(),
                amount: input.amount,
                payment_method: input.payment_method.clone(),
                contact_handle: input.contact_handle.clone(),
                proof_reference: input.proof_reference.clone(),
                status: DepositStatus::Pending,
                admin_note: None,
                created_at: now,
                resolved_at: None,
            };
            state.deposit_requests.push(request.clone());
            Ok(request)
        })?;
        tracing::info!(
            request = %request.id,
            wallet = %request.wallet_address,
            amount = %request.amount,
            "deposit request submitted"
        );
        Ok(request)
    }

    /// Approves a pending deposit request: credits the wallet and records a
    /// completed deposit entry, atomically with the status change.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed, `NotFound` for an
    /// unknown id, and `InvalidState` if the request is already resolved.
    pub fn approve_deposit(
        &self,
        id: DepositRequestId,
        admin_note: Option<String>,
    ) -> Result<DepositRequest, WalletError> {
        self.require_admin()?;
        let request = self.store.transaction(|state| {
            let request = state.deposit_mut(id)?;
            let action = WorkflowService::approve_deposit(request.status, admin_note)?;
            apply_deposit_action(request, action);
            let request = request.clone();

            state
                .account_mut(&request.wallet_address)?
                .apply_delta(request.amount)?;
            state.record(
                NewTransaction::deposit(request.wallet_address.clone(), request.amount)
                    .with_metadata(TransactionMetadata {
                        admin_note: request.admin_note.clone(),
                        payment_method: Some(request.payment_method.clone()),
                        proof_reference: request.proof_reference.clone(),
                        ..TransactionMetadata::default()
                    }),
            );
            Ok(request)
        })?;
        tracing::info!(
            request = %request.id,
            wallet = %request.wallet_address,
            amount = %request.amount,
            "deposit approved"
        );
        Ok(request)
    }

    /// Rejects a pending deposit request with a reason. No balance effect.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed, `Validation` for an
    /// empty reason, `NotFound` for an unknown id, and `InvalidState` if the
    /// request is already resolved.
    pub fn reject_deposit(
        &self,
        id: DepositRequestId,
        reason: String,
    ) -> Result<DepositRequest, WalletError> {
        self.require_admin()?;
        let request = self.store.transaction(|state| {
            let request = state.deposit_mut(id)?;
            let action = WorkflowService::reject_deposit(request.status, reason)?;
            apply_deposit_action(request, action);
            Ok(request.clone())
        })?;
        tracing::info!(request = %request.id, wallet = %request.wallet_address, "deposit rejected");
        Ok(request)
    }

    // ----- withdrawal workflow -----

    /// Submits a withdrawal request for admin review.
    ///
    /// The amount must be covered by the current balance at submission time;
    /// funds are not reserved, and the balance is re-checked at approval.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a non-positive amount, missing payout
    /// details, or an amount exceeding the available balance, and `NotFound`
    /// for an unknown address.
    pub fn submit_withdrawal(
        &self,
        input: SubmitWithdrawal,
    ) -> Result<WithdrawalRequest, WalletError> {
        require_positive_amount(input.amount)?;
        require_reason(&input.payout_details, "payout details")?;

        let request = self.store.transaction(|state| {
            let account = state.account(&input.wallet_address)?;
            if input.amount > account.balance {
                return Err(WalletError::Validation(
                    "amount exceeds available balance".to_string(),
                ));
            }
            let request = WithdrawalRequest {
                id: WithdrawalRequestId::new(),
                wallet_address: input.wallet_address.clone(),
                amount: input.amount,
                payout_details: input.payout_details.clone(),
                status: WithdrawalStatus::Pending,
                admin_note: None,
                created_at: Utc::now(),
                resolved_at: None,
            };
            state.withdrawal_requests.push(request.clone());
            Ok(request)
        })?;
        tracing::info!(
            request = %request.id,
            wallet = %request.wallet_address,
            amount = %request.amount,
            "withdrawal request submitted"
        );
        Ok(request)
    }

    /// Approves a pending or processing withdrawal: debits the wallet and
    /// records a completed withdrawal entry, atomically with the status
    /// change.
    ///
    /// The balance is re-checked here against the live account; if it no
    /// longer covers the amount, the approval fails with
    /// `InsufficientFunds` and the request stays unresolved.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed, `NotFound` for an
    /// unknown id, `InvalidState` if the request is already resolved, and
    /// `InsufficientFunds` if the balance no longer covers the amount.
    pub fn approve_withdrawal(
        &self,
        id: WithdrawalRequestId,
        admin_note: Option<String>,
    ) -> Result<WithdrawalRequest, WalletError> {
        self.require_admin()?;
        let request = self.store.transaction(|state| {
            let request = state.withdrawal_mut(id)?;
            let action = WorkflowService::approve_withdrawal(request.status, admin_note)?;
            apply_withdrawal_action(request, action);
            let request = request.clone();

            state
                .account_mut(&request.wallet_address)?
                .apply_delta(-request.amount)?;
            state.record(
                NewTransaction::withdrawal(request.wallet_address.clone(), request.amount)
                    .with_metadata(TransactionMetadata {
                        admin_note: request.admin_note.clone(),
                        ..TransactionMetadata::default()
                    }),
            );
            Ok(request)
        })?;
        tracing::info!(
            request = %request.id,
            wallet = %request.wallet_address,
            amount = %request.amount,
            "withdrawal approved"
        );
        Ok(request)
    }

    /// Rejects a pending or processing withdrawal with a reason. No balance
    /// effect.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed, `Validation` for an
    /// empty reason, `NotFound` for an unknown id, and `InvalidState` if the
    /// request is already resolved.
    pub fn reject_withdrawal(
        &self,
        id: WithdrawalRequestId,
        reason: String,
    ) -> Result<WithdrawalRequest, WalletError> {
        self.require_admin()?;
        let request = self.store.transaction(|state| {
            let request = state.withdrawal_mut(id)?;
            let action = WorkflowService::reject_withdrawal(request.status, reason)?;
            apply_withdrawal_action(request, action);
            Ok(request.clone())
        })?;
        tracing::info!(request = %request.id, wallet = %request.wallet_address, "withdrawal rejected");
        Ok(request)
    }

    /// Marks a pending withdrawal as being worked on. No balance effect; the
    /// request stays eligible for approval and rejection.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed, `NotFound` for an
    /// unknown id, and `InvalidState` from any status other than pending.
    pub fn mark_withdrawal_processing(
        &self,
        id: WithdrawalRequestId,
        admin_note: Option<String>,
    ) -> Result<WithdrawalRequest, WalletError> {
        self.require_admin()?;
        self.store.transaction(|state| {
            let request = state.withdrawal_mut(id)?;
            let action = WorkflowService::mark_processing(request.status, admin_note)?;
            apply_withdrawal_action(request, action);
            Ok(request.clone())
        })
    }

    // ----- manual admin operations -----

    /// Credits a wallet directly, outside the request workflow.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed, `Validation` for a
    /// non-positive amount or empty note, and `NotFound` for an unknown
    /// address.
    pub fn manual_add(
        &self,
        address: &WalletAddress,
        amount: Decimal,
        note: &str,
    ) -> Result<Transaction, WalletError> {
        self.require_admin()?;
        require_positive_amount(amount)?;
        require_reason(note, "an admin note")?;

        let entry = self.store.transaction(|state| {
            state.account_mut(address)?.apply_delta(amount)?;
            Ok(state.record(NewTransaction::manual_add(address.clone(), amount, note)))
        })?;
        tracing::info!(wallet = %address, amount = %amount, "manual credit");
        Ok(entry)
    }

    /// Deducts from a wallet directly, outside the request workflow.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed, `Validation` for a
    /// non-positive amount or empty note, `NotFound` for an unknown address,
    /// and `InsufficientFunds` if the balance does not cover the amount.
    pub fn manual_deduct(
        &self,
        address: &WalletAddress,
        amount: Decimal,
        note: &str,
    ) -> Result<Transaction, WalletError> {
        self.require_admin()?;
        require_positive_amount(amount)?;
        require_reason(note, "an admin note")?;

        let entry = self.store.transaction(|state| {
            state.account_mut(address)?.apply_delta(-amount)?;
            Ok(state.record(NewTransaction::manual_deduct(address.clone(), amount, note)))
        })?;
        tracing::info!(wallet = %address, amount = %amount, "manual deduction");
        Ok(entry)
    }

    /// Moves funds between two wallets as one atomic operation, recording
    /// one debit leg and one credit leg.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed, `Validation` for a
    /// non-positive amount, empty note, or identical endpoints, `NotFound`
    /// if either account is unknown, and `InsufficientFunds` if the source
    /// balance does not cover the amount. On any error neither balance
    /// changes and no entries are recorded.
    pub fn manual_transfer(
        &self,
        from: &WalletAddress,
        to: &WalletAddress,
        amount: Decimal,
        note: &str,
    ) -> Result<(Transaction, Transaction), WalletError> {
        self.require_admin()?;
        require_positive_amount(amount)?;
        require_reason(note, "an admin note")?;
        if from == to {
            return Err(WalletError::Validation(
                "transfer endpoints must differ".to_string(),
            ));
        }

        let legs = self.store.transaction(|state| {
            // Resolve both accounts before moving anything so a missing
            // destination cannot strand a debited source.
            state.account(to)?;
            state.account_mut(from)?.apply_delta(-amount)?;
            state.account_mut(to)?.apply_delta(amount)?;

            let out = state.record(NewTransaction::transfer_out(
                from.clone(),
                to.clone(),
                amount,
                note,
            ));
            let incoming = state.record(NewTransaction::transfer_in(
                to.clone(),
                from.clone(),
                amount,
                note,
            ));
            Ok((out, incoming))
        })?;
        tracing::info!(from = %from, to = %to, amount = %amount, "manual transfer");
        Ok(legs)
    }

    // ----- admin queries -----

    /// Returns all deposit requests, newest first. Admin-gated.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed.
    pub fn list_deposit_requests(&self) -> Result<Vec<DepositRequest>, WalletError> {
        self.require_admin()?;
        Ok(self
            .store
            .read(|state| state.deposit_requests.iter().rev().cloned().collect()))
    }

    /// Returns all withdrawal requests, newest first. Admin-gated.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed.
    pub fn list_withdrawal_requests(&self) -> Result<Vec<WithdrawalRequest>, WalletError> {
        self.require_admin()?;
        Ok(self
            .store
            .read(|state| state.withdrawal_requests.iter().rev().cloned().collect()))
    }

    /// Returns the full ledger, newest first. Admin-gated.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed.
    pub fn all_transactions(&self) -> Result<Vec<Transaction>, WalletError> {
        self.require_admin()?;
        Ok(self
            .store
            .read(|state| state.transactions.iter().rev().cloned().collect()))
    }

    /// Returns every account. Admin-gated.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed.
    pub fn list_accounts(&self) -> Result<Vec<Account>, WalletError> {
        self.require_admin()?;
        Ok(self
            .store
            .read(|state| state.accounts.values().cloned().collect()))
    }

    /// Computes system-wide totals for the admin dashboard. Admin-gated.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the gate is closed.
    pub fn system_stats(&self) -> Result<SystemStats, WalletError> {
        self.require_admin()?;
        Ok(self.store.read(SystemStats::compute))
    }
}

fn apply_deposit_action(request: &mut DepositRequest, action: DepositAction) {
    match action {
        DepositAction::Approve {
            new_status,
            admin_note,
            resolved_at,
        } => {
            request.status = new_status;
            if admin_note.is_some() {
                request.admin_note = admin_note;
            }
            request.resolved_at = Some(resolved_at);
        }
        DepositAction::Reject {
            new_status,
            reason,
            resolved_at,
        } => {
            request.status = new_status;
            request.admin_note = Some(reason);
            request.resolved_at = Some(resolved_at);
        }
    }
}

fn apply_withdrawal_action(request: &mut WithdrawalRequest, action: WithdrawalAction) {
    match action {
        WithdrawalAction::Approve {
            new_status,
            admin_note,
            resolved_at,
        } => {
            request.status = new_status;
            if admin_note.is_some() {
                request.admin_note = admin_note;
            }
            request.resolved_at = Some(resolved_at);
        }
        WithdrawalAction::Reject {
            new_status,
            reason,
            resolved_at,
        } => {
            request.status = new_status;
            request.admin_note = Some(reason);
            request.resolved_at = Some(resolved_at);
        }
        WithdrawalAction::MarkProcessing {
            new_status,
            admin_note,
            marked_at: _,
        } => {
            request.status = new_status;
            if admin_note.is_some() {
                request.admin_note = admin_note;
            }
        }
    }
}
