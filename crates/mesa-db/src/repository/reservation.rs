//! # Reservation Repository
//!
//! Database operations for the reservation queue.
//!
//! ## Conditional Transitions
//! A status change is a single UPDATE gated on `status = 'pending'`.
//! When staff and a customer race to transition the same reservation,
//! whichever statement lands second matches zero rows and the caller is
//! told the precondition no longer holds; terminal states are never
//! overwritten.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use mesa_core::{Reservation, ReservationStatus};

const SELECT_COLUMNS: &str = "id, customer_id, customer_name, item_id, item_name, \
     date, time_slot, quantity, status, points_awarded, created_at";

/// Repository for reservation database operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationRepository { pool }
    }

    /// Inserts a new reservation record.
    pub async fn insert(&self, reservation: &Reservation) -> DbResult<()> {
        debug!(
            id = %reservation.id,
            customer = %reservation.customer_id,
            item = %reservation.item_name,
            "Inserting reservation"
        );

        sqlx::query(
            r#"
            INSERT INTO reservations (
                id, customer_id, customer_name, item_id, item_name,
                date, time_slot, quantity, status, points_awarded, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&reservation.id)
        .bind(&reservation.customer_id)
        .bind(&reservation.customer_name)
        .bind(&reservation.item_id)
        .bind(&reservation.item_name)
        .bind(reservation.date)
        .bind(&reservation.time_slot)
        .bind(reservation.quantity)
        .bind(reservation.status)
        .bind(reservation.points_awarded)
        .bind(reservation.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a reservation by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {SELECT_COLUMNS} FROM reservations WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// Lists every reservation, newest first. Staff view.
    pub async fn list_all(&self) -> DbResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {SELECT_COLUMNS} FROM reservations ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    /// Lists one customer's reservations, newest first.
    pub async fn list_for_customer(&self, customer_id: &str) -> DbResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {SELECT_COLUMNS} FROM reservations \
             WHERE customer_id = ?1 ORDER BY created_at DESC"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    /// Applies a conditional transition away from `pending`.
    ///
    /// Returns `true` when this call performed the transition, `false`
    /// when the precondition failed (row absent, or status already
    /// terminal). The caller fetches the row to tell those apart.
    pub async fn transition(&self, id: &str, to: ReservationStatus) -> DbResult<bool> {
        debug!(id = %id, to = %to, "Transitioning reservation");

        let result = sqlx::query(
            "UPDATE reservations SET status = ?2 WHERE id = ?1 AND status = 'pending'",
        )
        .bind(id)
        .bind(to)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Helper to generate a new reservation id.
pub fn generate_reservation_id() -> String {
    Uuid::new_v4().to_string()
}
