//! # mesa-db: Persistence Layer for Mesa POS
//!
//! SQLite-backed substrate honoring the contract the engine relies on:
//! per-row atomic field updates, atomic numeric increments, clamped
//! decrements, conditional status transitions, and equality/range
//! queries. Change *notification* is not this crate's job; the engine
//! publishes to the mesa-sync hub after each successful mutation.
//!
//! ## Modules
//!
//! - [`pool`] - Connection pool configuration and the [`Database`] handle
//! - [`migrations`] - Embedded schema migrations
//! - [`repository`] - Menu, account, and reservation repositories
//! - [`error`] - Database error types

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::account::AccountRepository;
pub use repository::menu::MenuRepository;
pub use repository::reservation::ReservationRepository;
