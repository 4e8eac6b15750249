//! # Domain Types
//!
//! Core entity types shared across Mesa POS.
//!
//! Every persisted entity carries a UUID v4 string id (immutable, used for
//! relations) plus the fields of its record shape. Prices and point
//! balances are i64 in the smallest currency unit; no floating point.
//!
//! Reservations carry the item *name* as a snapshot taken at create time,
//! so catalog edits and deletions never rewrite history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Role
// =============================================================================

/// The role attached to an account.
///
/// Assigned by the identity collaborator; the core only reads it to scope
/// visibility and gate staff operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Cashier,
    Admin,
}

impl Role {
    /// Cashiers and admins see the whole reservation queue and the
    /// account directory.
    #[inline]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Role::Cashier | Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

// =============================================================================
// Actor
// =============================================================================

/// The acting identity for a request, as reported by the identity
/// collaborator (`currentAccount()`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub account_id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(account_id: impl Into<String>, role: Role) -> Self {
        Actor {
            account_id: account_id.into(),
            role,
        }
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A catalog entry: what can be reserved or rung up at the register.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on every dashboard.
    pub name: String,

    /// Units on hand. Never negative: decrements clamp at zero.
    pub stock: i64,

    /// Price in the smallest currency unit.
    pub price: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// True when at least one unit can be added to a cart.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Account
// =============================================================================

/// A user account with its loyalty point balance.
///
/// Owned by the identity collaborator; the core reads accounts and
/// adjusts `points` through the ledger's atomic increment only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub email: String,
    /// Loyalty point balance.
    pub points: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Reservation Status
// =============================================================================

/// Reservation lifecycle state.
///
/// ```text
///              customer cancel / staff cancel
///            ┌────────────────────────────────► cancelled (absorbing)
///   pending ─┤
///            └────────────────────────────────► completed (absorbing)
///                      staff complete
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Awaiting staff action; the only state with outgoing transitions.
    Pending,
    /// Fulfilled by staff.
    Completed,
    /// Withdrawn by the customer or voided by staff.
    Cancelled,
}

impl ReservationStatus {
    /// Completed and cancelled permit no further transition.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, ReservationStatus::Pending)
    }

    /// Lowercase wire/database form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::Pending
    }
}

// =============================================================================
// Reservation
// =============================================================================

/// A customer's claim on a menu item for a date and time slot.
///
/// After creation the only mutable fields are `status` (at most one
/// transition away from pending) and nothing else; `item_name` is a
/// snapshot frozen at create time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub item_id: String,
    /// Item name at reservation time (frozen).
    pub item_name: String,
    /// Calendar day the reservation is for.
    pub date: NaiveDate,
    /// Time slot label, e.g. "18:30".
    pub time_slot: String,
    pub quantity: i64,
    pub status: ReservationStatus,
    /// True when the create-time loyalty bonus was recorded as granted.
    /// A customer cancel reverses the bonus only when this is set.
    pub points_awarded: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_is_staff() {
        assert!(!Role::Customer.is_staff());
        assert!(Role::Cashier.is_staff());
        assert!(Role::Admin.is_staff());
    }

    #[test]
    fn test_status_terminality() {
        assert!(!ReservationStatus::Pending.is_terminal());
        assert!(ReservationStatus::Completed.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_display_matches_wire_form() {
        assert_eq!(ReservationStatus::Pending.to_string(), "pending");
        assert_eq!(ReservationStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_record_shapes_serialize_camel_case() {
        let item = MenuItem {
            id: "i-1".to_string(),
            name: "Burger".to_string(),
            stock: 5,
            price: 85,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["name"], "Burger");
        assert_eq!(value["stock"], 5);
        assert!(value.get("createdAt").is_some());
    }
}
