//! # mesa-sync: Change Notification for Mesa POS
//!
//! Every mutation the engine commits is published here as a
//! [`ChangeEvent`] carrying the updated document. Each open dashboard
//! holds one [`Subscription`], scoped by role and ownership: customers
//! receive the catalog, their own reservations, and their own account;
//! staff receive everything.
//!
//! Delivery is at-least-once and order-preserving per publisher. A
//! subscriber that falls too far behind gets [`SyncError::Lagged`] with
//! the skip count, so it can requery instead of silently missing
//! updates. Dropping a subscription tears it down deterministically.

pub mod error;
pub mod event;
pub mod hub;

pub use error::SyncError;
pub use event::{CatalogChange, ChangeEvent, SubscriberScope};
pub use hub::{ChangeHub, Subscription};
