//! Command handlers

pub mod account;
pub mod transaction;

use crate::db;
use anyhow::Result;
use duobank_ledger::Ledger;
use duobank_persistence::AccountStore;
use std::path::Path;

/// Ledger handle over the database at `db_path`.
pub async fn open_ledger(db_path: &Path) -> Result<Ledger> {
    let pool = db::connect(db_path).await?;
    Ok(Ledger::new(AccountStore::new(pool)))
}
