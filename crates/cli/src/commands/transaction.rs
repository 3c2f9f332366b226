//! Transaction commands: deposit, withdraw, transfer

use anyhow::Result;
use duobank_core::AccountType;
use duobank_ledger::{TransferReceiver, TransferSender};
use std::path::Path;
use uuid::Uuid;

use super::open_ledger;

/// Deposit funds into one of the caller's accounts
pub async fn deposit(
    db_path: &Path,
    user_id: Uuid,
    account_type: AccountType,
    account_id: Uuid,
    amount: i64,
) -> Result<()> {
    let ledger = open_ledger(db_path).await?;
    let user = ledger.resolve_user(user_id).await?;
    let account = ledger
        .deposit(account_type, account_id, &user, amount)
        .await?;

    println!("✅ Deposit successful!");
    println!("   Account: {} ({})", account.id, account.account_type);
    println!("   Amount:  {}", amount);
    println!("   Balance: {}", account.balance);
    Ok(())
}

/// Withdraw funds from one of the caller's accounts
pub async fn withdraw(
    db_path: &Path,
    user_id: Uuid,
    account_type: AccountType,
    account_id: Uuid,
    amount: i64,
) -> Result<()> {
    let ledger = open_ledger(db_path).await?;
    let user = ledger.resolve_user(user_id).await?;
    let account = ledger
        .withdraw(account_type, account_id, &user, amount)
        .await?;

    println!("✅ Withdrawal successful!");
    println!("   Account: {} ({})", account.id, account.account_type);
    println!("   Amount:  {}", amount);
    println!("   Balance: {}", account.balance);
    Ok(())
}

/// Transfer funds to any account addressed by its public number
pub async fn transfer(
    db_path: &Path,
    user_id: Uuid,
    from: Uuid,
    from_type: AccountType,
    to: i64,
    to_type: AccountType,
    amount: i64,
) -> Result<()> {
    let ledger = open_ledger(db_path).await?;
    let user = ledger.resolve_user(user_id).await?;

    ledger
        .transfer(
            TransferSender {
                account_id: from,
                account_type: from_type,
            },
            TransferReceiver {
                account_number: to,
                account_type: to_type,
            },
            &user,
            amount,
        )
        .await?;

    println!("✅ Transfer successful!");
    println!("   From:   {} ({})", from, from_type);
    println!("   To:     {} ({})", to, to_type);
    println!("   Amount: {}", amount);
    Ok(())
}
