//! Caller identity
//!
//! The request layer authenticates the user and hands the ledger an
//! `AuthUser`: the user id plus the ids of the accounts already linked to
//! that user, one per partition at most.

use crate::account::AccountType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated caller as seen by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub current_account_id: Option<Uuid>,
    pub savings_account_id: Option<Uuid>,
}

impl AuthUser {
    /// Identity with no linked accounts.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            current_account_id: None,
            savings_account_id: None,
        }
    }

    pub fn with_linked_account(mut self, account_type: AccountType, account_id: Uuid) -> Self {
        match account_type {
            AccountType::Current => self.current_account_id = Some(account_id),
            AccountType::Savings => self.savings_account_id = Some(account_id),
        }
        self
    }

    pub fn linked_account(&self, account_type: AccountType) -> Option<Uuid> {
        match account_type {
            AccountType::Current => self.current_account_id,
            AccountType::Savings => self.savings_account_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linked_accounts() {
        let current_id = Uuid::new_v4();
        let user = AuthUser::new(Uuid::new_v4())
            .with_linked_account(AccountType::Current, current_id);

        assert_eq!(user.linked_account(AccountType::Current), Some(current_id));
        assert_eq!(user.linked_account(AccountType::Savings), None);
    }
}
