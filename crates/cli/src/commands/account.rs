//! Account commands: create, show, list

use anyhow::Result;
use duobank_core::{Account, AccountType};
use std::path::Path;
use uuid::Uuid;

use super::open_ledger;

/// Create an account of the given type for a user
pub async fn create(db_path: &Path, user_id: Uuid, account_type: AccountType) -> Result<()> {
    let ledger = open_ledger(db_path).await?;
    let account = ledger.create_account(account_type, user_id).await?;

    println!("✅ Account created!");
    println!("   Id:      {}", account.id);
    println!("   Type:    {}", account.account_type);
    println!("   Number:  {}", account.account_number);
    println!("   Owner:   {}", account.owner_id);
    Ok(())
}

/// Show one of the caller's accounts
pub async fn show(
    db_path: &Path,
    user_id: Uuid,
    account_type: AccountType,
    account_id: Uuid,
    json: bool,
) -> Result<()> {
    let ledger = open_ledger(db_path).await?;
    let user = ledger.resolve_user(user_id).await?;
    let account = ledger.get_account(account_type, account_id, &user).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&account)?);
    } else {
        print_account(&account);
    }
    Ok(())
}

/// List the caller's accounts of one partition
pub async fn list(
    db_path: &Path,
    user_id: Uuid,
    account_type: AccountType,
    json: bool,
) -> Result<()> {
    let ledger = open_ledger(db_path).await?;
    let accounts = ledger.get_all_accounts(account_type, user_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
    } else {
        println!("📒 {} account(s)", accounts.len());
        for account in &accounts {
            print_account(account);
        }
    }
    Ok(())
}

fn print_account(account: &Account) {
    println!("   Id:      {}", account.id);
    println!("   Type:    {}", account.account_type);
    println!("   Number:  {}", account.account_number);
    println!("   Balance: {}", account.balance);
}
