//! # Duobank Persistence
//!
//! SQLite persistence for the account ledger: two structurally identical
//! partition tables (`current_accounts`, `savings_accounts`), a filtered
//! read/insert/conditional-update store over them, and the atomic unit used
//! by transfers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use duobank_persistence::{init_database, AccountFilter, AccountStore};
//!
//! let pool = init_database("sqlite:duobank.db?mode=rwc").await?;
//! let store = AccountStore::new(pool);
//!
//! let account = store
//!     .find_one(AccountType::Current, &AccountFilter::by_owner(owner_id))
//!     .await?;
//! ```

pub mod error;
pub mod sqlite;

pub use error::{StoreError, StoreResult};
pub use sqlite::{
    connect, init_database, init_schema, partition_table, AccountFilter, AccountRow,
    AccountStore, TransferUnit,
};
