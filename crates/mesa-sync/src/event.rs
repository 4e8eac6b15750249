//! # Change Events
//!
//! The documents fanned out to dashboards, and the scope that decides
//! who receives what.

use serde::{Deserialize, Serialize};

use mesa_core::{Account, MenuItem, Reservation, Role};

// =============================================================================
// Events
// =============================================================================

/// A catalog mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CatalogChange {
    /// An item was created or edited; carries the updated document.
    Upserted(MenuItem),
    /// An item was removed from the catalog.
    Deleted { id: String },
}

/// A state change, carrying the updated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "collection", rename_all = "camelCase")]
pub enum ChangeEvent {
    /// Catalog changed. Delivered to every dashboard.
    Catalog(CatalogChange),
    /// A reservation was created or transitioned. Delivered to staff and
    /// to the owning customer.
    Reservation(Reservation),
    /// An account's points balance (or the directory) changed. Delivered
    /// to staff and to the account's owner.
    Account(Account),
}

// =============================================================================
// Subscriber Scope
// =============================================================================

/// Who is watching: the acting account and its role at subscribe time.
///
/// A role change or logout invalidates the scope; the dashboard drops
/// its subscription and opens a new one, so events never leak across
/// accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberScope {
    pub account_id: String,
    pub role: Role,
}

impl SubscriberScope {
    pub fn new(account_id: impl Into<String>, role: Role) -> Self {
        SubscriberScope {
            account_id: account_id.into(),
            role,
        }
    }

    /// Whether an event is visible to this subscriber.
    pub fn matches(&self, event: &ChangeEvent) -> bool {
        match event {
            ChangeEvent::Catalog(_) => true,
            ChangeEvent::Reservation(r) => {
                self.role.is_staff() || r.customer_id == self.account_id
            }
            ChangeEvent::Account(a) => self.role.is_staff() || a.id == self.account_id,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use mesa_core::ReservationStatus;

    fn reservation_for(customer_id: &str) -> Reservation {
        Reservation {
            id: "r-1".to_string(),
            customer_id: customer_id.to_string(),
            customer_name: "Ana".to_string(),
            item_id: "i-1".to_string(),
            item_name: "Burger".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 14).unwrap(),
            time_slot: "18:30".to_string(),
            quantity: 1,
            status: ReservationStatus::Pending,
            points_awarded: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_catalog_events_reach_everyone() {
        let event = ChangeEvent::Catalog(CatalogChange::Deleted {
            id: "i-1".to_string(),
        });
        assert!(SubscriberScope::new("a-1", Role::Customer).matches(&event));
        assert!(SubscriberScope::new("a-2", Role::Cashier).matches(&event));
    }

    #[test]
    fn test_reservation_events_scoped_to_owner_or_staff() {
        let event = ChangeEvent::Reservation(reservation_for("a-1"));

        assert!(SubscriberScope::new("a-1", Role::Customer).matches(&event));
        assert!(!SubscriberScope::new("a-2", Role::Customer).matches(&event));
        assert!(SubscriberScope::new("a-3", Role::Cashier).matches(&event));
        assert!(SubscriberScope::new("a-4", Role::Admin).matches(&event));
    }

    #[test]
    fn test_event_serializes_with_collection_tag() {
        let event = ChangeEvent::Reservation(reservation_for("a-1"));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["collection"], "reservation");
        assert_eq!(value["customerId"], "a-1");
    }
}
