//! Ledger operations - create, deposit, withdraw, transfer, queries
//!
//! The `Ledger` enforces the business rules in front of the store: ownership
//! is checked at lookup, balances never go negative, one account of each
//! type per owner, and the transfer is the single multi-row mutation with a
//! real atomicity boundary.

use crate::error::{LedgerError, LedgerResult};
use crate::number::random_account_number;
use duobank_core::{Account, AccountType, AuthUser, CoreError};
use duobank_persistence::{AccountFilter, AccountStore, TransferUnit};
use tracing::{info, warn};
use uuid::Uuid;

/// Sender side of a transfer: the caller's own account, addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSender {
    pub account_id: Uuid,
    pub account_type: AccountType,
}

/// Receiver side of a transfer: any account, addressed by its public
/// 10-digit account number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReceiver {
    pub account_number: i64,
    pub account_type: AccountType,
}

/// Ledger operations over the account store.
pub struct Ledger {
    store: AccountStore,
}

impl Ledger {
    pub fn new(store: AccountStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// Create the owner's account of the given type.
    ///
    /// An owner holds at most one account per type; a second create of the
    /// same type fails without touching the partition.
    pub async fn create_account(
        &self,
        account_type: AccountType,
        owner_id: Uuid,
    ) -> LedgerResult<Account> {
        let existing = self
            .store
            .find_one(account_type, &AccountFilter::by_owner(owner_id))
            .await?;
        if existing.is_some() {
            return Err(LedgerError::DuplicateAccountType);
        }

        let account_number = self.fresh_account_number(account_type).await?;
        let account = Account::new(account_type, owner_id, account_number);
        self.store.insert(&account).await?;

        info!(
            account_id = %account.id,
            account_type = %account_type,
            owner_id = %owner_id,
            "account created"
        );
        Ok(account)
    }

    /// Draw account numbers until one is free in the partition.
    async fn fresh_account_number(&self, account_type: AccountType) -> LedgerResult<i64> {
        loop {
            let candidate = random_account_number();
            let taken = self
                .store
                .find_one(account_type, &AccountFilter::by_number(candidate))
                .await?;
            if taken.is_none() {
                return Ok(candidate);
            }
            warn!(account_type = %account_type, "account number collision, redrawing");
        }
    }

    /// Add `amount` to the caller's account.
    ///
    /// The lookup predicate carries the ownership check: an account that
    /// exists but belongs to someone else resolves to nothing here.
    pub async fn deposit(
        &self,
        account_type: AccountType,
        account_id: Uuid,
        user: &AuthUser,
        amount: i64,
    ) -> LedgerResult<Account> {
        ensure_positive(amount)?;

        let filter = AccountFilter::by_id(account_id).and_owner(user.id);
        let account = self
            .store
            .find_one(account_type, &filter)
            .await?
            .ok_or(LedgerError::AccountNotFound)?;

        let new_balance = checked_balance(account.balance, amount)?;
        let affected = self
            .store
            .update_balance(account_type, account_id, new_balance)
            .await?;
        if affected == 0 {
            return Err(LedgerError::ConflictOnUpdate(account_id));
        }

        info!(account_id = %account_id, amount, new_balance, "deposit applied");
        self.reread(account_type, account_id).await
    }

    /// Remove `amount` from the caller's account.
    ///
    /// Absence here means nonexistence or lack of permission; both are
    /// reported as an authorization failure, not a lookup miss.
    pub async fn withdraw(
        &self,
        account_type: AccountType,
        account_id: Uuid,
        user: &AuthUser,
        amount: i64,
    ) -> LedgerResult<Account> {
        ensure_positive(amount)?;

        let filter = AccountFilter::by_id(account_id).and_owner(user.id);
        let account = self
            .store
            .find_one(account_type, &filter)
            .await?
            .ok_or_else(|| {
                LedgerError::unauthorized(
                    "You do not have permission to withdraw from this account",
                )
            })?;

        if account.balance < amount {
            return Err(LedgerError::insufficient_funds(amount, account.balance));
        }

        let new_balance = account.balance - amount;
        let affected = self
            .store
            .update_balance(account_type, account_id, new_balance)
            .await?;
        if affected == 0 {
            return Err(LedgerError::ConflictOnUpdate(account_id));
        }

        info!(account_id = %account_id, amount, new_balance, "withdrawal applied");
        self.reread(account_type, account_id).await
    }

    /// Move `amount` from the caller's account to any account addressed by
    /// its public number. Both balance writes commit together or not at all.
    pub async fn transfer(
        &self,
        sender: TransferSender,
        receiver: TransferReceiver,
        user: &AuthUser,
        amount: i64,
    ) -> LedgerResult<()> {
        ensure_positive(amount)?;

        let mut unit = self.store.begin().await?;
        match self.transfer_in(&mut unit, sender, receiver, user, amount).await {
            Ok(()) => {
                unit.commit().await?;
                info!(
                    sender_id = %sender.account_id,
                    receiver_number = receiver.account_number,
                    amount,
                    "transfer committed"
                );
                Ok(())
            }
            Err(err) => {
                unit.rollback().await?;
                warn!(error = %err, "transfer rolled back");
                Err(err)
            }
        }
    }

    /// The transfer body, run entirely inside `unit`. Any error rolls the
    /// unit back in `transfer`.
    async fn transfer_in(
        &self,
        unit: &mut TransferUnit,
        sender: TransferSender,
        receiver: TransferReceiver,
        user: &AuthUser,
        amount: i64,
    ) -> LedgerResult<()> {
        let sender_account = unit
            .find_one(
                sender.account_type,
                &AccountFilter::by_id(sender.account_id).and_owner(user.id),
            )
            .await?;
        let receiver_account = unit
            .find_one(
                receiver.account_type,
                &AccountFilter::by_number(receiver.account_number),
            )
            .await?;

        // Guard against sending into the caller's own savings account. The
        // comparison is against the savings link regardless of the receiver
        // descriptor's type, and an absent link matches an unresolved
        // receiver; see DESIGN.md for why both stay that way.
        if user.savings_account_id == receiver_account.as_ref().map(|a| a.id) {
            return Err(LedgerError::SelfTransfer);
        }

        let (sender_account, receiver_account) = match (sender_account, receiver_account) {
            (Some(s), Some(r)) => (s, r),
            _ => return Err(LedgerError::AccountNotFound),
        };

        if sender_account.balance < amount {
            return Err(LedgerError::insufficient_funds(amount, sender_account.balance));
        }

        let sender_balance = sender_account.balance - amount;
        let receiver_balance = checked_balance(receiver_account.balance, amount)?;

        let sender_affected = unit
            .update_balance(sender.account_type, sender_account.id, sender_balance)
            .await?;
        let receiver_affected = unit
            .update_balance(receiver.account_type, receiver_account.id, receiver_balance)
            .await?;

        if sender_affected == 0 {
            return Err(LedgerError::ConflictOnUpdate(sender_account.id));
        }
        if receiver_affected == 0 {
            return Err(LedgerError::ConflictOnUpdate(receiver_account.id));
        }

        Ok(())
    }

    /// The caller's account of the given type, by id.
    pub async fn get_account(
        &self,
        account_type: AccountType,
        account_id: Uuid,
        user: &AuthUser,
    ) -> LedgerResult<Account> {
        let account = self
            .store
            .find_one(account_type, &AccountFilter::by_id(account_id))
            .await?;

        // A miss and an ownership mismatch are indistinguishable to the
        // caller: both are an authorization failure.
        match account {
            Some(account) if account.is_owned_by(user.id) => Ok(account),
            _ => Err(LedgerError::unauthorized(
                "You do not have permission to view this account",
            )),
        }
    }

    /// All of the owner's accounts of the given type. An owner with none is
    /// an error, not an empty listing.
    pub async fn get_all_accounts(
        &self,
        account_type: AccountType,
        owner_id: Uuid,
    ) -> LedgerResult<Vec<Account>> {
        let accounts = self
            .store
            .find_all(account_type, &AccountFilter::by_owner(owner_id))
            .await?;

        if accounts.is_empty() {
            return Err(LedgerError::unauthorized("No accounts found"));
        }
        Ok(accounts)
    }

    /// Assemble the caller identity the request layer hands to operations:
    /// the user id plus the ids of the user's accounts in each partition.
    pub async fn resolve_user(&self, user_id: Uuid) -> LedgerResult<AuthUser> {
        let mut user = AuthUser::new(user_id);
        for account_type in AccountType::all() {
            let account = self
                .store
                .find_one(account_type, &AccountFilter::by_owner(user_id))
                .await?;
            if let Some(account) = account {
                user = user.with_linked_account(account_type, account.id);
            }
        }
        Ok(user)
    }

    async fn reread(&self, account_type: AccountType, account_id: Uuid) -> LedgerResult<Account> {
        self.store
            .find_one(account_type, &AccountFilter::by_id(account_id))
            .await?
            .ok_or(LedgerError::AccountNotFound)
    }
}

fn ensure_positive(amount: i64) -> LedgerResult<()> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

fn checked_balance(balance: i64, amount: i64) -> LedgerResult<i64> {
    balance
        .checked_add(amount)
        .ok_or(LedgerError::Core(CoreError::BalanceOverflow {
            balance,
            amount,
        }))
}
