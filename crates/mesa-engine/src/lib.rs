//! # mesa-engine: Orchestration Layer for Mesa POS
//!
//! The services each dashboard consumes:
//!
//! - [`CatalogService`] - admin catalog CRUD + clamped stock decrement
//! - [`LedgerService`] - atomic loyalty point adjustments
//! - [`ReservationEngine`] - the reservation state machine
//! - [`CheckoutSession`] - per-cashier cart and commit
//!
//! Wire-up goes through [`Engine`], which owns the database handle, the
//! change hub, and the loyalty configuration; services are cheap
//! accessor-constructed values, never process-wide singletons.
//!
//! Control flow: a customer action enters the [`ReservationEngine`],
//! which mutates a reservation record and calls the ledger; a cashier
//! action runs inside a [`CheckoutSession`], which reads the catalog,
//! optionally resolves a customer, and on commit calls the ledger and
//! consumes stock. Every committed mutation flows out through the
//! mesa-sync hub to the subscribed dashboards.

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod ledger;
pub mod reservation;

pub use catalog::CatalogService;
pub use checkout::{CheckoutReceipt, CheckoutSession};
pub use config::{ConfigError, EngineConfig};
pub use error::{EngineError, EngineResult};
pub use ledger::LedgerService;
pub use reservation::{ReservationDraft, ReservationEngine, ReservationOutcome};

use mesa_db::Database;
use mesa_sync::{ChangeHub, SubscriberScope, Subscription};

// =============================================================================
// Engine
// =============================================================================

/// Top-level handle wiring the database, the change hub, and the
/// loyalty configuration together.
#[derive(Debug, Clone)]
pub struct Engine {
    db: Database,
    hub: ChangeHub,
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine over an initialized database.
    pub fn new(db: Database, config: EngineConfig) -> Self {
        Engine {
            db,
            hub: ChangeHub::new(),
            config,
        }
    }

    /// The catalog service.
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.db.menu(), self.hub.clone())
    }

    /// The points ledger.
    pub fn ledger(&self) -> LedgerService {
        LedgerService::new(self.db.accounts(), self.hub.clone())
    }

    /// The reservation engine.
    pub fn reservations(&self) -> ReservationEngine {
        ReservationEngine::new(
            self.db.reservations(),
            self.db.menu(),
            self.db.accounts(),
            self.ledger(),
            self.hub.clone(),
            self.config.loyalty.reservation_bonus,
        )
    }

    /// A fresh checkout session for one cashier dashboard.
    pub fn checkout_session(&self) -> CheckoutSession {
        CheckoutSession::new(
            self.db.menu(),
            self.db.accounts(),
            self.ledger(),
            self.hub.clone(),
            self.config.loyalty,
        )
    }

    /// Opens a role-scoped change subscription for one dashboard.
    pub fn subscribe(&self, scope: SubscriberScope) -> Subscription {
        self.hub.subscribe(scope)
    }

    /// The underlying change hub.
    pub fn hub(&self) -> &ChangeHub {
        &self.hub
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
