//! # Change Hub
//!
//! One broadcast channel fans every committed mutation out to the open
//! dashboards. Each subscription filters by its scope on the receiving
//! side, so a publisher never needs to know who is listening.

use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

use crate::error::{SyncError, SyncResult};
use crate::event::{ChangeEvent, SubscriberScope};

/// Default event buffer per subscriber.
///
/// A dashboard that falls more than this far behind receives
/// [`SyncError::Lagged`] and requeries.
pub const DEFAULT_HUB_CAPACITY: usize = 256;

// =============================================================================
// Hub
// =============================================================================

/// The change fan-out hub.
///
/// Cloning is cheap; every engine service holds a clone and publishes
/// after each successful mutation.
#[derive(Debug, Clone)]
pub struct ChangeHub {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeHub {
    /// Creates a hub with the default buffer capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HUB_CAPACITY)
    }

    /// Creates a hub with an explicit buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        ChangeHub { tx }
    }

    /// Publishes an event to every live subscription.
    ///
    /// Publishing with no subscribers is not an error; the event simply
    /// has no audience.
    pub fn publish(&self, event: ChangeEvent) {
        let delivered = self.tx.send(event).unwrap_or(0);
        debug!(subscribers = delivered, "Published change event");
    }

    /// Opens a subscription scoped to the given account and role.
    ///
    /// The subscription observes events published after this call, in
    /// publish order. Drop it (or call [`Subscription::unsubscribe`]) on
    /// disconnect or when the acting account changes.
    pub fn subscribe(&self, scope: SubscriberScope) -> Subscription {
        debug!(account = %scope.account_id, role = ?scope.role, "Opening subscription");
        Subscription {
            rx: self.tx.subscribe(),
            scope,
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// One dashboard's live view of the change feed.
///
/// Events outside the subscriber's scope are filtered out before
/// delivery; a customer subscription never observes another customer's
/// reservations or account.
pub struct Subscription {
    rx: broadcast::Receiver<ChangeEvent>,
    scope: SubscriberScope,
}

impl Subscription {
    /// Receives the next in-scope event.
    ///
    /// Returns [`SyncError::Lagged`] when the subscriber fell behind the
    /// buffer (subsequent calls resume from the oldest retained event)
    /// and [`SyncError::Closed`] when the hub is gone.
    pub async fn recv(&mut self) -> SyncResult<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if self.scope.matches(&event) => return Ok(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    return Err(SyncError::Lagged { skipped })
                }
                Err(broadcast::error::RecvError::Closed) => return Err(SyncError::Closed),
            }
        }
    }

    /// The scope this subscription was opened with.
    pub fn scope(&self) -> &SubscriberScope {
        &self.scope
    }

    /// Converts the subscription into a stream of in-scope events.
    pub fn into_stream(self) -> impl Stream<Item = SyncResult<ChangeEvent>> {
        let scope = self.scope;
        BroadcastStream::new(self.rx).filter_map(move |item| match item {
            Ok(event) if scope.matches(&event) => Some(Ok(event)),
            Ok(_) => None,
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                Some(Err(SyncError::Lagged { skipped }))
            }
        })
    }

    /// Explicit teardown. Equivalent to dropping the subscription.
    pub fn unsubscribe(self) {}
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CatalogChange;
    use chrono::{NaiveDate, Utc};
    use mesa_core::{MenuItem, Reservation, ReservationStatus, Role};

    fn item(id: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            stock: 5,
            price: 85,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn reservation_for(customer_id: &str) -> Reservation {
        Reservation {
            id: format!("r-{}", customer_id),
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

    #[tokio::test]
    async fn test_catalog_event_reaches_customer_and_staff() {
        let hub = ChangeHub::new();
        let mut customer = hub.subscribe(SubscriberScope::new("a-1", Role::Customer));
        let mut cashier = hub.subscribe(SubscriberScope::new("a-2", Role::Cashier));

        hub.publish(ChangeEvent::Catalog(CatalogChange::Upserted(item("i-1"))));

        assert!(matches!(
            customer.recv().await.unwrap(),
            ChangeEvent::Catalog(_)
        ));
        assert!(matches!(
            cashier.recv().await.unwrap(),
            ChangeEvent::Catalog(_)
        ));
    }

    #[tokio::test]
    async fn test_reservation_events_do_not_leak_across_customers() {
        let hub = ChangeHub::new();
        let mut owner = hub.subscribe(SubscriberScope::new("a-1", Role::Customer));
        let mut other = hub.subscribe(SubscriberScope::new("a-2", Role::Customer));

        hub.publish(ChangeEvent::Reservation(reservation_for("a-1")));
        hub.publish(ChangeEvent::Reservation(reservation_for("a-2")));

        // The owner sees only their own reservation; the other customer's
        // event is filtered and the next in-scope event is theirs.
        match owner.recv().await.unwrap() {
            ChangeEvent::Reservation(r) => assert_eq!(r.customer_id, "a-1"),
            other => panic!("unexpected event: {:?}", other),
        }
        match other.recv().await.unwrap() {
            ChangeEvent::Reservation(r) => assert_eq!(r.customer_id, "a-2"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_order_preserved_per_subscriber() {
        let hub = ChangeHub::new();
        let mut staff = hub.subscribe(SubscriberScope::new("a-9", Role::Admin));

        for i in 0..5 {
            hub.publish(ChangeEvent::Catalog(CatalogChange::Deleted {
                id: format!("i-{}", i),
            }));
        }

        for i in 0..5 {
            match staff.recv().await.unwrap() {
                ChangeEvent::Catalog(CatalogChange::Deleted { id }) => {
                    assert_eq!(id, format!("i-{}", i));
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_lagged_subscriber_is_told_to_resync() {
        let hub = ChangeHub::with_capacity(1);
        let mut slow = hub.subscribe(SubscriberScope::new("a-1", Role::Admin));

        hub.publish(ChangeEvent::Catalog(CatalogChange::Deleted {
            id: "i-1".to_string(),
        }));
        hub.publish(ChangeEvent::Catalog(CatalogChange::Deleted {
            id: "i-2".to_string(),
        }));

        assert!(matches!(
            slow.recv().await,
            Err(SyncError::Lagged { skipped }) if skipped > 0
        ));
    }

    #[tokio::test]
    async fn test_drop_tears_down_subscription() {
        let hub = ChangeHub::new();
        let sub = hub.subscribe(SubscriberScope::new("a-1", Role::Customer));
        assert_eq!(hub.subscriber_count(), 1);

        sub.unsubscribe();
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_closed_hub_ends_stream() {
        let hub = ChangeHub::new();
        let mut sub = hub.subscribe(SubscriberScope::new("a-1", Role::Customer));
        drop(hub);

        assert!(matches!(sub.recv().await, Err(SyncError::Closed)));
    }
}
