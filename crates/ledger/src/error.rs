//! Ledger operation errors
//!
//! Every business-rule failure surfaces as a typed variant; nothing is
//! recovered silently and no operation retries. The boundary layer maps
//! these kinds to its own presentation.

use duobank_core::CoreError;
use duobank_persistence::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Ledger operation errors
#[derive(Debug, Error)]
pub enum LedgerError {
    // === Rule violations ===
    #[error("Can only have one account with this type")]
    DuplicateAccountType,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("You do not have permission to transfer to this account")]
    SelfTransfer,

    #[error("Insufficient funds: need {needed}, available {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("Update of account {0} affected no rows")]
    ConflictOnUpdate(Uuid),

    #[error("Amount must be positive: {0}")]
    InvalidAmount(i64),

    // === Wrapped errors ===
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub fn unauthorized(reason: &str) -> Self {
        Self::Unauthorized(reason.to_string())
    }

    pub fn insufficient_funds(needed: i64, available: i64) -> Self {
        Self::InsufficientFunds { needed, available }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }
}
