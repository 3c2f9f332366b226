//! Database initialization and status

use anyhow::{Context, Result};
use duobank_core::AccountType;
use duobank_persistence::{init_schema, partition_table};
use sqlx::SqlitePool;
use std::path::Path;

fn database_url(db_path: &Path) -> String {
    format!("sqlite:{}?mode=rwc", db_path.display())
}

/// Initialize the database with schema
pub async fn init_database(db_path: &Path, force: bool) -> Result<()> {
    if force && db_path.exists() {
        std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        println!("🗑️  Removed existing database");
    }

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }
    }

    let pool = duobank_persistence::connect(&database_url(db_path))
        .await
        .context("Failed to connect to database")?;

    println!("📦 Creating schema...");
    init_schema(&pool).await.context("Failed to create schema")?;

    pool.close().await;
    println!("✅ Database ready at {:?}", db_path);
    Ok(())
}

/// Show database status
pub async fn show_status(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("❌ Database not found at {:?}", db_path);
        println!("   Run 'duobank init' to create the database");
        return Ok(());
    }

    let pool = connect(db_path).await?;

    println!("📊 Database Status");
    println!("   Path: {:?}", db_path);
    println!();

    for account_type in AccountType::all() {
        let sql = format!("SELECT COUNT(*) FROM {}", partition_table(account_type));
        let count: (i64,) = sqlx::query_as(&sql).fetch_one(&pool).await.unwrap_or((0,));
        println!("   {:<8} accounts: {}", account_type, count.0);
    }

    pool.close().await;
    Ok(())
}

/// Connect to database pool
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    duobank_persistence::connect(&database_url(db_path))
        .await
        .context("Failed to connect to database. Run 'duobank init' first.")
}
