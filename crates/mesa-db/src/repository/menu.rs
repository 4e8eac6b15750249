//! # Menu Repository
//!
//! Database operations for catalog items: CRUD plus the clamped stock
//! decrement.
//!
//! ## Stock Update Strategy
//! Stock consumption is a delta applied in SQL
//! (`stock = MAX(stock - ?, 0)`), never a value computed client-side.
//! Two cashiers consuming the same item concurrently both apply their
//! delta; neither overwrites the other, and the clamp keeps the row at
//! zero or above no matter the interleaving.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use mesa_core::MenuItem;

const SELECT_COLUMNS: &str = "id, name, stock, price, created_at, updated_at";

/// Repository for menu item database operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Inserts a new menu item.
    pub async fn insert(&self, item: &MenuItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting menu item");

        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, stock, price, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.stock)
        .bind(item.price)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists the whole catalog, sorted by name.
    pub async fn list(&self) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {SELECT_COLUMNS} FROM menu_items ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets a menu item by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {SELECT_COLUMNS} FROM menu_items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Sets the absolute stock level.
    ///
    /// The caller clamps negative input to zero before calling; the
    /// schema's CHECK constraint backstops it. Setting the same value
    /// twice is safe.
    pub async fn set_stock(&self, id: &str, stock: i64) -> DbResult<()> {
        debug!(id = %id, stock = stock, "Setting stock");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE menu_items SET stock = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(stock)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", id));
        }

        Ok(())
    }

    /// Atomically decrements stock by `qty`, clamping the result at zero.
    ///
    /// No-op when the item is absent or `qty` is not positive; the stock
    /// row is never observed negative under any sequence of calls.
    pub async fn decrement_stock(&self, id: &str, qty: i64) -> DbResult<()> {
        if qty <= 0 {
            return Ok(());
        }

        debug!(id = %id, qty = qty, "Decrementing stock");

        let now = Utc::now();

        sqlx::query(
            "UPDATE menu_items SET stock = MAX(stock - ?2, 0), updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(qty)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Sets the item price.
    pub async fn set_price(&self, id: &str, price: i64) -> DbResult<()> {
        debug!(id = %id, price = price, "Setting price");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE menu_items SET price = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(price)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", id));
        }

        Ok(())
    }

    /// Deletes a menu item.
    ///
    /// Returns whether a row was removed. In-flight cart lines and
    /// reservations keep their snapshots; nothing cascades.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting menu item");

        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts catalog items (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new menu item id.
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}
