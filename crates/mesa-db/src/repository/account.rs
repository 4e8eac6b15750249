//! # Account Repository
//!
//! Database operations for accounts and the points ledger.
//!
//! The ledger is one primitive: an atomic SQL increment on the `points`
//! column. Concurrent adjustments from different dashboards compound
//! correctly regardless of ordering, because the delta is applied where
//! the row lives rather than computed from a client-cached balance.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use mesa_core::Account;

const SELECT_COLUMNS: &str = "id, role, name, email, points, created_at";

/// Repository for account database operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Creates a new AccountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AccountRepository { pool }
    }

    /// Inserts an account. Sign-up itself is owned by the identity
    /// collaborator; this exists for seeding and tests.
    pub async fn insert(&self, account: &Account) -> DbResult<()> {
        debug!(id = %account.id, name = %account.name, "Inserting account");

        sqlx::query(
            r#"
            INSERT INTO accounts (id, role, name, email, points, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&account.id)
        .bind(account.role)
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.points)
        .bind(account.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an account by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {SELECT_COLUMNS} FROM accounts WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Finds accounts by exact display name.
    ///
    /// Returns every match; the caller decides what more than one match
    /// means (the checkout session rejects the link as ambiguous).
    pub async fn find_by_name(&self, name: &str) -> DbResult<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {SELECT_COLUMNS} FROM accounts WHERE name = ?1 ORDER BY created_at"
        ))
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    /// Lists customer accounts, sorted by name. Staff directory view.
    pub async fn list_customers(&self) -> DbResult<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {SELECT_COLUMNS} FROM accounts WHERE role = 'customer' ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    /// Atomically adjusts an account's point balance by `delta` (positive
    /// or negative) and returns the updated account.
    ///
    /// The increment happens in a single UPDATE; there is no
    /// read-modify-write window. Fails with NotFound when the account
    /// row no longer exists, in which case nothing was applied.
    pub async fn adjust_points(&self, id: &str, delta: i64) -> DbResult<Account> {
        debug!(id = %id, delta = delta, "Adjusting points");

        let result = sqlx::query("UPDATE accounts SET points = points + ?2 WHERE id = ?1")
            .bind(id)
            .bind(delta)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Account", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Account", id))
    }

    /// Deletes an account. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting account");

        let result = sqlx::query("DELETE FROM accounts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use mesa_core::Role;

    fn account(id: &str, name: &str, points: i64) -> Account {
        Account {
            id: id.to_string(),
            role: Role::Customer,
            name: name.to_string(),
            email: format!("{}@example.test", id),
            points,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_adjust_points_applies_delta() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.accounts();

        repo.insert(&account("a-1", "Ana", 0)).await.unwrap();

        let updated = repo.adjust_points("a-1", 10).await.unwrap();
        assert_eq!(updated.points, 10);

        let updated = repo.adjust_points("a-1", -10).await.unwrap();
        assert_eq!(updated.points, 0);
    }

    #[tokio::test]
    async fn test_adjust_points_missing_account() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.accounts();

        let err = repo.adjust_points("ghost", 10).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_by_name_is_exact() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.accounts();

        repo.insert(&account("a-1", "Ana", 0)).await.unwrap();
        repo.insert(&account("a-2", "Ana", 5)).await.unwrap();
        repo.insert(&account("a-3", "Anabel", 0)).await.unwrap();

        let matches = repo.find_by_name("Ana").await.unwrap();
        assert_eq!(matches.len(), 2);

        let matches = repo.find_by_name("ana").await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_list_customers_excludes_staff() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.accounts();

        repo.insert(&account("a-1", "Ana", 0)).await.unwrap();
        let mut cashier = account("a-2", "Bo", 0);
        cashier.role = Role::Cashier;
        repo.insert(&cashier).await.unwrap();

        let customers = repo.list_customers().await.unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].id, "a-1");
    }
}
