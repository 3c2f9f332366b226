//! Database schema definitions
//!
//! Row types for sqlx mapping from the two account partitions. Both tables
//! are structurally identical; the table an operation touches is selected by
//! `AccountType`.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use duobank_core::{Account, AccountType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row type for the `current_accounts` / `savings_accounts` tables
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: String,
    pub owner_id: String,
    pub account_number: i64,
    pub account_type: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl AccountRow {
    /// Decode into the domain type, validating ids and the type tag.
    pub fn into_account(self) -> StoreResult<Account> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|_| StoreError::invalid_uuid("id", &self.id))?;
        let owner_id = Uuid::parse_str(&self.owner_id)
            .map_err(|_| StoreError::invalid_uuid("owner_id", &self.owner_id))?;
        let account_type: AccountType = self
            .account_type
            .parse()
            .map_err(|_| StoreError::invalid_enum("account_type", &self.account_type))?;

        Ok(Account {
            id,
            owner_id,
            account_number: self.account_number,
            account_type,
            balance: self.balance,
            created_at: self.created_at,
        })
    }
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            owner_id: account.owner_id.to_string(),
            account_number: account.account_number,
            account_type: account.account_type.as_str().to_string(),
            balance: account.balance,
            created_at: account.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_roundtrip() {
        let account = Account::new(AccountType::Current, Uuid::new_v4(), 4242424242);
        let row = AccountRow::from(&account);
        let back = row.into_account().unwrap();
        assert_eq!(back, account);
    }

    #[test]
    fn test_bad_uuid_rejected() {
        let row = AccountRow {
            id: "nope".to_string(),
            owner_id: Uuid::new_v4().to_string(),
            account_number: 1000000000,
            account_type: "CURRENT".to_string(),
            balance: 0,
            created_at: Utc::now(),
        };
        assert!(matches!(
            row.into_account(),
            Err(StoreError::InvalidUuid { .. })
        ));
    }

    #[test]
    fn test_bad_type_tag_rejected() {
        let row = AccountRow {
            id: Uuid::new_v4().to_string(),
            owner_id: Uuid::new_v4().to_string(),
            account_number: 1000000000,
            account_type: "CHECKING".to_string(),
            balance: 0,
            created_at: Utc::now(),
        };
        assert!(matches!(
            row.into_account(),
            Err(StoreError::InvalidEnumValue { .. })
        ));
    }
}
