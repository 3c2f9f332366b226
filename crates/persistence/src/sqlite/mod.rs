//! SQLite backend
//!
//! Pool construction and in-code schema creation for the two account
//! partitions.

pub mod schema;
pub mod store;

pub use schema::AccountRow;
pub use store::{partition_table, AccountFilter, AccountStore, TransferUnit};

use crate::error::StoreResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Connect to a SQLite database, creating the file if missing.
pub async fn connect(database_url: &str) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    Ok(pool)
}

/// Create both partition tables.
///
/// The tables are structurally identical; `account_number` carries the
/// per-partition uniqueness constraint.
pub async fn init_schema(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS current_accounts (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            account_number INTEGER NOT NULL UNIQUE,
            account_type TEXT NOT NULL,
            balance INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_current_accounts_owner
        ON current_accounts(owner_id);

        CREATE TABLE IF NOT EXISTS savings_accounts (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            account_number INTEGER NOT NULL UNIQUE,
            account_type TEXT NOT NULL,
            balance INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_savings_accounts_owner
        ON savings_accounts(owner_id);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Connect and create the schema in one step.
pub async fn init_database(database_url: &str) -> StoreResult<SqlitePool> {
    let pool = connect(database_url).await?;
    init_schema(&pool).await?;
    Ok(pool)
}
