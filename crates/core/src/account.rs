//! # Account Module
//!
//! The account model: two structurally identical account kinds (CURRENT and
//! SAVINGS) stored in separate partitions. An owner holds at most one
//! account of each kind.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Account kind. Selects the backing partition for every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Current,
    Savings,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Current => "CURRENT",
            AccountType::Savings => "SAVINGS",
        }
    }

    /// Both kinds, in partition order.
    pub fn all() -> [AccountType; 2] {
        [AccountType::Current, AccountType::Savings]
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = CoreError;

    /// Unknown type strings are rejected here, before any partition is
    /// resolved.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CURRENT" => Ok(AccountType::Current),
            "SAVINGS" => Ok(AccountType::Savings),
            other => Err(CoreError::InvalidAccountType(other.to_string())),
        }
    }
}

/// A user's account within one partition.
///
/// `balance` is kept in the smallest currency unit and never goes negative;
/// `account_number` is the public 10-digit identifier used to address the
/// account as a transfer receiver, distinct from the internal `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub account_number: i64,
    pub account_type: AccountType,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// New account with a zero balance.
    pub fn new(account_type: AccountType, owner_id: Uuid, account_number: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            account_number,
            account_type,
            balance: 0,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {} ({}, number: {}, balance: {})",
            self.id, self.account_type, self.account_number, self.balance
        )
    }
}
