//! Account store over the two SQLite partitions
//!
//! Reads and single-row updates run against the pool; the multi-row transfer
//! goes through a [`TransferUnit`], which holds one transaction across both
//! partitions and rolls back unless committed.

use crate::error::{StoreError, StoreResult};
use crate::sqlite::schema::AccountRow;
use duobank_core::{Account, AccountType};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

/// Table backing a partition. Exhaustive on purpose: adding an account kind
/// must not compile until it is given a table.
pub fn partition_table(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Current => "current_accounts",
        AccountType::Savings => "savings_accounts",
    }
}

/// Conjunction of equality predicates over a partition. Unset fields are
/// unconstrained.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountFilter {
    pub id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub account_number: Option<i64>,
}

impl AccountFilter {
    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_owner(owner_id: Uuid) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }

    pub fn by_number(account_number: i64) -> Self {
        Self {
            account_number: Some(account_number),
            ..Self::default()
        }
    }

    pub fn and_owner(mut self, owner_id: Uuid) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// WHERE clause for the set predicates, placeholders in field order.
    fn where_clause(&self) -> String {
        let mut clauses = Vec::new();
        if self.id.is_some() {
            clauses.push("id = ?");
        }
        if self.owner_id.is_some() {
            clauses.push("owner_id = ?");
        }
        if self.account_number.is_some() {
            clauses.push("account_number = ?");
        }

        if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, owner_id, account_number, account_type, balance, created_at FROM ";

async fn fetch_optional_where(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    account_type: AccountType,
    filter: &AccountFilter,
) -> StoreResult<Option<Account>> {
    let sql = format!(
        "{}{}{}",
        SELECT_COLUMNS,
        partition_table(account_type),
        filter.where_clause()
    );
    // Placeholders bind in the same field order where_clause emits them.
    let mut query = sqlx::query_as::<_, AccountRow>(&sql);
    if let Some(id) = filter.id {
        query = query.bind(id.to_string());
    }
    if let Some(owner_id) = filter.owner_id {
        query = query.bind(owner_id.to_string());
    }
    if let Some(account_number) = filter.account_number {
        query = query.bind(account_number);
    }
    let row = query.fetch_optional(executor).await?;

    row.map(AccountRow::into_account).transpose()
}

async fn fetch_all_where(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    account_type: AccountType,
    filter: &AccountFilter,
) -> StoreResult<Vec<Account>> {
    let sql = format!(
        "{}{}{}",
        SELECT_COLUMNS,
        partition_table(account_type),
        filter.where_clause()
    );
    let mut query = sqlx::query_as::<_, AccountRow>(&sql);
    if let Some(id) = filter.id {
        query = query.bind(id.to_string());
    }
    if let Some(owner_id) = filter.owner_id {
        query = query.bind(owner_id.to_string());
    }
    if let Some(account_number) = filter.account_number {
        query = query.bind(account_number);
    }
    let rows = query.fetch_all(executor).await?;

    rows.into_iter().map(AccountRow::into_account).collect()
}

async fn execute_insert(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    account: &Account,
) -> StoreResult<()> {
    let row = AccountRow::from(account);
    let sql = format!(
        "INSERT INTO {} (id, owner_id, account_number, account_type, balance, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
        partition_table(account.account_type)
    );
    sqlx::query(&sql)
        .bind(&row.id)
        .bind(&row.owner_id)
        .bind(row.account_number)
        .bind(&row.account_type)
        .bind(row.balance)
        .bind(row.created_at)
        .execute(executor)
        .await?;
    Ok(())
}

/// Conditional update keyed by id alone. The caller inspects the affected
/// row count; a zero means the row vanished or the write lost a race.
async fn execute_update_balance(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    account_type: AccountType,
    id: Uuid,
    new_balance: i64,
) -> StoreResult<u64> {
    let sql = format!(
        "UPDATE {} SET balance = ? WHERE id = ?",
        partition_table(account_type)
    );
    let result = sqlx::query(&sql)
        .bind(new_balance)
        .bind(id.to_string())
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// Handle over both account partitions.
#[derive(Clone)]
pub struct AccountStore {
    pool: SqlitePool,
}

impl AccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Single account matching the filter, if any. Read-only.
    pub async fn find_one(
        &self,
        account_type: AccountType,
        filter: &AccountFilter,
    ) -> StoreResult<Option<Account>> {
        fetch_optional_where(&self.pool, account_type, filter).await
    }

    /// All accounts matching the filter. Read-only.
    pub async fn find_all(
        &self,
        account_type: AccountType,
        filter: &AccountFilter,
    ) -> StoreResult<Vec<Account>> {
        fetch_all_where(&self.pool, account_type, filter).await
    }

    /// Insert one row into the account's partition.
    pub async fn insert(&self, account: &Account) -> StoreResult<()> {
        execute_insert(&self.pool, account).await
    }

    /// Set the balance of one row, reporting how many rows were touched.
    pub async fn update_balance(
        &self,
        account_type: AccountType,
        id: Uuid,
        new_balance: i64,
    ) -> StoreResult<u64> {
        execute_update_balance(&self.pool, account_type, id, new_balance).await
    }

    /// Open an atomic unit spanning both partitions.
    pub async fn begin(&self) -> StoreResult<TransferUnit> {
        let tx = self.pool.begin().await?;
        Ok(TransferUnit { tx })
    }
}

/// One begin/commit/rollback-bounded sequence of reads and balance updates.
///
/// Dropping the unit without [`commit`](TransferUnit::commit) rolls every
/// write back.
pub struct TransferUnit {
    tx: Transaction<'static, Sqlite>,
}

impl TransferUnit {
    pub async fn find_one(
        &mut self,
        account_type: AccountType,
        filter: &AccountFilter,
    ) -> StoreResult<Option<Account>> {
        fetch_optional_where(&mut *self.tx, account_type, filter).await
    }

    pub async fn update_balance(
        &mut self,
        account_type: AccountType,
        id: Uuid,
        new_balance: i64,
    ) -> StoreResult<u64> {
        execute_update_balance(&mut *self.tx, account_type, id, new_balance).await
    }

    /// Make every write in the unit visible at once.
    pub async fn commit(self) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Discard every write in the unit.
    pub async fn rollback(self) -> StoreResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::{connect, init_schema};
    use tempfile::TempDir;

    async fn test_store() -> (TempDir, AccountStore) {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("test.db").display());
        let pool = connect(&url).await.unwrap();
        init_schema(&pool).await.unwrap();
        (dir, AccountStore::new(pool))
    }

    #[test]
    fn test_partition_routing() {
        assert_eq!(partition_table(AccountType::Current), "current_accounts");
        assert_eq!(partition_table(AccountType::Savings), "savings_accounts");
    }

    #[test]
    fn test_filter_where_clause() {
        let filter = AccountFilter::by_id(Uuid::new_v4()).and_owner(Uuid::new_v4());
        assert_eq!(filter.where_clause(), " WHERE id = ? AND owner_id = ?");

        assert_eq!(AccountFilter::default().where_clause(), "");
        assert_eq!(
            AccountFilter::by_number(1234567890).where_clause(),
            " WHERE account_number = ?"
        );
    }

    #[tokio::test]
    async fn test_insert_and_find_one() {
        let (_dir, store) = test_store().await;
        let owner = Uuid::new_v4();
        let account = Account::new(AccountType::Current, owner, 1000000001);

        store.insert(&account).await.unwrap();

        let found = store
            .find_one(AccountType::Current, &AccountFilter::by_id(account.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, account);

        // The row lives only in its own partition.
        let missing = store
            .find_one(AccountType::Savings, &AccountFilter::by_id(account.id))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_by_owner_and_number() {
        let (_dir, store) = test_store().await;
        let owner = Uuid::new_v4();
        let account = Account::new(AccountType::Savings, owner, 2000000002);
        store.insert(&account).await.unwrap();

        let by_owner = store
            .find_one(AccountType::Savings, &AccountFilter::by_owner(owner))
            .await
            .unwrap();
        assert_eq!(by_owner.as_ref().map(|a| a.id), Some(account.id));

        let by_number = store
            .find_one(AccountType::Savings, &AccountFilter::by_number(2000000002))
            .await
            .unwrap();
        assert_eq!(by_number.map(|a| a.id), Some(account.id));
    }

    #[tokio::test]
    async fn test_duplicate_account_number_rejected() {
        let (_dir, store) = test_store().await;
        let account = Account::new(AccountType::Current, Uuid::new_v4(), 3000000003);
        store.insert(&account).await.unwrap();

        let clash = Account::new(AccountType::Current, Uuid::new_v4(), 3000000003);
        let err = store.insert(&clash).await.unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_update_balance_reports_affected_rows() {
        let (_dir, store) = test_store().await;
        let account = Account::new(AccountType::Current, Uuid::new_v4(), 4000000004);
        store.insert(&account).await.unwrap();

        let affected = store
            .update_balance(AccountType::Current, account.id, 500)
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let reread = store
            .find_one(AccountType::Current, &AccountFilter::by_id(account.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reread.balance, 500);

        // Unknown id touches nothing.
        let affected = store
            .update_balance(AccountType::Current, Uuid::new_v4(), 500)
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_unit_commit_makes_both_writes_visible() {
        let (_dir, store) = test_store().await;
        let sender = Account::new(AccountType::Savings, Uuid::new_v4(), 5000000005);
        let receiver = Account::new(AccountType::Current, Uuid::new_v4(), 6000000006);
        store.insert(&sender).await.unwrap();
        store.insert(&receiver).await.unwrap();
        store
            .update_balance(AccountType::Savings, sender.id, 200)
            .await
            .unwrap();

        let mut unit = store.begin().await.unwrap();
        unit.update_balance(AccountType::Savings, sender.id, 100)
            .await
            .unwrap();
        unit.update_balance(AccountType::Current, receiver.id, 100)
            .await
            .unwrap();
        unit.commit().await.unwrap();

        let s = store
            .find_one(AccountType::Savings, &AccountFilter::by_id(sender.id))
            .await
            .unwrap()
            .unwrap();
        let r = store
            .find_one(AccountType::Current, &AccountFilter::by_id(receiver.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!((s.balance, r.balance), (100, 100));
    }

    #[tokio::test]
    async fn test_unit_rollback_discards_writes() {
        let (_dir, store) = test_store().await;
        let account = Account::new(AccountType::Current, Uuid::new_v4(), 7000000007);
        store.insert(&account).await.unwrap();
        store
            .update_balance(AccountType::Current, account.id, 300)
            .await
            .unwrap();

        let mut unit = store.begin().await.unwrap();
        unit.update_balance(AccountType::Current, account.id, 0)
            .await
            .unwrap();
        unit.rollback().await.unwrap();

        let reread = store
            .find_one(AccountType::Current, &AccountFilter::by_id(account.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reread.balance, 300);
    }
}
