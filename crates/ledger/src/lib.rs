//! # Duobank Ledger
//!
//! The ledger operations layer: account creation, deposits, withdrawals,
//! transfers and account queries, over the SQLite partitions in
//! `duobank-persistence`. Callers arrive as an [`AuthUser`] assembled by the
//! request layer; every rule failure is a typed [`LedgerError`].
//!
//! [`AuthUser`]: duobank_core::AuthUser

pub mod error;
pub mod number;
pub mod service;

pub use error::{LedgerError, LedgerResult};
pub use number::{is_valid_account_number, random_account_number};
pub use service::{Ledger, TransferReceiver, TransferSender};
