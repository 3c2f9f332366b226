//! Duobank CLI - Ledger operations from command line
//!
//! Usage:
//! ```bash
//! duobank init
//! duobank account create --user <uuid> --type savings
//! duobank deposit --user <uuid> --type savings <account-id> 500
//! duobank withdraw --user <uuid> --type savings <account-id> 200
//! duobank transfer --user <uuid> --from <account-id> --to <account-number> 100
//! duobank account list --user <uuid> --type savings
//! ```
//!
//! The `--user` flag stands in for the authenticated caller the excluded
//! auth layer would supply.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use duobank_core::AccountType;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod commands;
mod db;

use commands::{account, transaction};

/// Duobank - a two-partition account ledger over SQLite
#[derive(Parser)]
#[command(name = "duobank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file path
    #[arg(long, default_value = "data/duobank.db", global = true)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Account management
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Deposit funds into one of the caller's accounts
    Deposit {
        /// Acting user id
        #[arg(long)]
        user: Uuid,
        /// Account partition
        #[arg(long = "type", short = 't')]
        account_type: AccountTypeArg,
        /// Target account id
        account_id: Uuid,
        /// Amount in the smallest currency unit
        amount: i64,
    },

    /// Withdraw funds from one of the caller's accounts
    Withdraw {
        /// Acting user id
        #[arg(long)]
        user: Uuid,
        /// Account partition
        #[arg(long = "type", short = 't')]
        account_type: AccountTypeArg,
        /// Source account id
        account_id: Uuid,
        /// Amount in the smallest currency unit
        amount: i64,
    },

    /// Transfer funds to any account addressed by its 10-digit number
    Transfer {
        /// Acting user id
        #[arg(long)]
        user: Uuid,
        /// Sender account id (must belong to the caller)
        #[arg(long)]
        from: Uuid,
        /// Sender partition
        #[arg(long, default_value = "savings")]
        from_type: AccountTypeArg,
        /// Receiver account number
        #[arg(long)]
        to: i64,
        /// Receiver partition
        #[arg(long, default_value = "current")]
        to_type: AccountTypeArg,
        /// Amount in the smallest currency unit
        amount: i64,
    },

    /// Initialize database with schema
    Init {
        /// Force re-initialization (drops existing data)
        #[arg(long)]
        force: bool,
    },

    /// Show database status
    Status,
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Create an account for a user (one per type)
    Create {
        /// Owner user id
        #[arg(long)]
        user: Uuid,
        /// Account partition
        #[arg(long = "type", short = 't')]
        account_type: AccountTypeArg,
    },

    /// Show one of the caller's accounts
    Show {
        /// Acting user id
        #[arg(long)]
        user: Uuid,
        /// Account partition
        #[arg(long = "type", short = 't')]
        account_type: AccountTypeArg,
        /// Account id
        account_id: Uuid,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the caller's accounts of one partition
    List {
        /// Acting user id
        #[arg(long)]
        user: Uuid,
        /// Account partition
        #[arg(long = "type", short = 't')]
        account_type: AccountTypeArg,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// CLI-facing account type.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AccountTypeArg {
    Current,
    Savings,
}

impl AccountTypeArg {
    pub fn to_core_type(self) -> AccountType {
        match self {
            AccountTypeArg::Current => AccountType::Current,
            AccountTypeArg::Savings => AccountType::Savings,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => db::init_database(&cli.db, force).await,
        Commands::Status => db::show_status(&cli.db).await,

        Commands::Account { action } => match action {
            AccountAction::Create { user, account_type } => {
                account::create(&cli.db, user, account_type.to_core_type()).await
            }
            AccountAction::Show {
                user,
                account_type,
                account_id,
                json,
            } => account::show(&cli.db, user, account_type.to_core_type(), account_id, json).await,
            AccountAction::List {
                user,
                account_type,
                json,
            } => account::list(&cli.db, user, account_type.to_core_type(), json).await,
        },

        Commands::Deposit {
            user,
            account_type,
            account_id,
            amount,
        } => {
            transaction::deposit(&cli.db, user, account_type.to_core_type(), account_id, amount)
                .await
        }
        Commands::Withdraw {
            user,
            account_type,
            account_id,
            amount,
        } => {
            transaction::withdraw(&cli.db, user, account_type.to_core_type(), account_id, amount)
                .await
        }
        Commands::Transfer {
            user,
            from,
            from_type,
            to,
            to_type,
            amount,
        } => {
            transaction::transfer(
                &cli.db,
                user,
                from,
                from_type.to_core_type(),
                to,
                to_type.to_core_type(),
                amount,
            )
            .await
        }
    }
}
