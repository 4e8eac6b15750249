//! # Reservation Engine
//!
//! Owns the reservation lifecycle and its point side effects.
//!
//! ## State machine
//! ```text
//!              customer cancel / staff cancel
//!            ┌────────────────────────────────► cancelled
//!   pending ─┤
//!            └────────────────────────────────► completed
//!                      staff complete
//! ```
//!
//! Transitions are conditional at the persistence layer (`WHERE status =
//! 'pending'`): a racing second transition sees its precondition fail
//! instead of overwriting a terminal state.
//!
//! Point grants and reversals are secondary effects. The reservation
//! mutation is committed first; a ledger failure afterwards leaves the
//! reservation as committed and comes back as a warning on the outcome.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use mesa_core::validation::{validate_required, validate_reservation_quantity};
use mesa_core::{
    Actor, CoreError, Reservation, ReservationStatus, ValidationError,
};
use mesa_db::{AccountRepository, MenuRepository, ReservationRepository};
use mesa_sync::{ChangeEvent, ChangeHub};

use crate::error::{EngineError, EngineResult};
use crate::ledger::LedgerService;

// =============================================================================
// Inputs and Outcomes
// =============================================================================

/// Customer input for a new reservation.
///
/// All four business fields are required; validation runs before
/// anything is persisted.
#[derive(Debug, Clone)]
pub struct ReservationDraft {
    pub item_id: String,
    pub date: Option<NaiveDate>,
    pub time_slot: String,
    pub quantity: i64,
}

/// Result of a reservation mutation whose point side effect may have
/// failed independently.
///
/// `points_warning` carries the ledger failure of a degraded success:
/// the reservation mutation stands either way.
#[derive(Debug)]
pub struct ReservationOutcome {
    pub reservation: Reservation,
    pub points_warning: Option<EngineError>,
}

impl ReservationOutcome {
    fn clean(reservation: Reservation) -> Self {
        ReservationOutcome {
            reservation,
            points_warning: None,
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// The reservation lifecycle service.
#[derive(Debug, Clone)]
pub struct ReservationEngine {
    reservations: ReservationRepository,
    menu: MenuRepository,
    accounts: AccountRepository,
    ledger: LedgerService,
    hub: ChangeHub,
    reservation_bonus: i64,
}

impl ReservationEngine {
    /// Creates a new ReservationEngine.
    pub fn new(
        reservations: ReservationRepository,
        menu: MenuRepository,
        accounts: AccountRepository,
        ledger: LedgerService,
        hub: ChangeHub,
        reservation_bonus: i64,
    ) -> Self {
        ReservationEngine {
            reservations,
            menu,
            accounts,
            ledger,
            hub,
            reservation_bonus,
        }
    }

    /// Creates a pending reservation for the acting customer, then
    /// grants the reservation bonus.
    ///
    /// Validation failures and a missing item or account persist
    /// nothing. A bonus grant failure after the insert is a degraded
    /// success: the pending reservation exists and the failure rides
    /// back in `points_warning`.
    pub async fn create(
        &self,
        actor: &Actor,
        draft: ReservationDraft,
    ) -> EngineResult<ReservationOutcome> {
        let item_id = validate_required("item", &draft.item_id).map_err(CoreError::from)?;
        let time_slot =
            validate_required("time", &draft.time_slot).map_err(CoreError::from)?;
        let date = draft.date.ok_or_else(|| {
            CoreError::from(ValidationError::Required {
                field: "date".to_string(),
            })
        })?;
        validate_reservation_quantity(draft.quantity).map_err(CoreError::from)?;

        let account = self
            .accounts
            .get_by_id(&actor.account_id)
            .await?
            .ok_or_else(|| CoreError::AccountNotFound(actor.account_id.clone()))?;

        let item = self
            .menu
            .get_by_id(&item_id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(item_id.clone()))?;

        let reservation = Reservation {
            id: Uuid::new_v4().to_string(),
            customer_id: account.id.clone(),
            customer_name: account.name.clone(),
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            date,
            time_slot,
            quantity: draft.quantity,
            status: ReservationStatus::Pending,
            points_awarded: true,
            created_at: Utc::now(),
        };

        self.reservations.insert(&reservation).await?;
        info!(id = %reservation.id, customer = %reservation.customer_id, "Reservation created");
        self.hub
            .publish(ChangeEvent::Reservation(reservation.clone()));

        let points_warning = match self
            .ledger
            .adjust_points(&account.id, self.reservation_bonus)
            .await
        {
            Ok(_) => None,
            Err(e) => {
                warn!(
                    reservation = %reservation.id,
                    error = %e,
                    "Reservation bonus grant failed; reservation stands"
                );
                Some(e)
            }
        };

        Ok(ReservationOutcome {
            reservation,
            points_warning,
        })
    }

    /// Customer-initiated cancel. Permitted only to the owner and only
    /// while the reservation is still pending.
    ///
    /// Reverses the reservation bonus when it was granted; the reversal
    /// is a secondary effect reported via `points_warning` on failure.
    pub async fn cancel_own(&self, actor: &Actor, id: &str) -> EngineResult<ReservationOutcome> {
        let reservation = self.owned_reservation(actor, id).await?;

        if reservation.status.is_terminal() {
            return Err(CoreError::InvalidTransition {
                id: id.to_string(),
                status: reservation.status,
            }
            .into());
        }

        let cancelled = self
            .apply_transition(reservation, ReservationStatus::Cancelled)
            .await?;

        let points_warning = if cancelled.points_awarded {
            match self
                .ledger
                .adjust_points(&actor.account_id, -self.reservation_bonus)
                .await
            {
                Ok(_) => None,
                Err(e) => {
                    warn!(
                        reservation = %cancelled.id,
                        error = %e,
                        "Bonus reversal failed; cancellation stands"
                    );
                    Some(e)
                }
            }
        } else {
            None
        };

        Ok(ReservationOutcome {
            reservation: cancelled,
            points_warning,
        })
    }

    /// Staff transition to `completed` or `cancelled`, on any
    /// customer's reservation.
    ///
    /// Staff cancellation does not reverse points; only the customer's
    /// own cancel path does.
    pub async fn staff_transition(
        &self,
        actor: &Actor,
        id: &str,
        to: ReservationStatus,
    ) -> EngineResult<Reservation> {
        if !actor.role.is_staff() {
            return Err(EngineError::Forbidden {
                role: actor.role,
                action: "transition reservations",
            });
        }

        let id = validate_required("reservation id", id).map_err(CoreError::from)?;
        if to == ReservationStatus::Pending {
            return Err(CoreError::from(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: "pending is not a transition target".to_string(),
            })
            .into());
        }

        let reservation = self
            .reservations
            .get_by_id(&id)
            .await?
            .ok_or_else(|| CoreError::ReservationNotFound(id.clone()))?;

        if reservation.status.is_terminal() {
            return Err(CoreError::InvalidTransition {
                id,
                status: reservation.status,
            }
            .into());
        }

        let updated = self.apply_transition(reservation, to).await?;
        Ok(updated)
    }

    /// Lists reservations visible to the actor: staff see the whole
    /// queue, customers see their own. Newest first either way.
    pub async fn list_for(&self, actor: &Actor) -> EngineResult<Vec<Reservation>> {
        let reservations = if actor.role.is_staff() {
            self.reservations.list_all().await?
        } else {
            self.reservations.list_for_customer(&actor.account_id).await?
        };

        Ok(reservations)
    }

    /// Fetches a reservation for the customer cancel path. Ownership is
    /// strict: anyone else's reservation is reported as not found.
    async fn owned_reservation(&self, actor: &Actor, id: &str) -> EngineResult<Reservation> {
        let reservation = self
            .reservations
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ReservationNotFound(id.to_string()))?;

        if reservation.customer_id != actor.account_id {
            return Err(CoreError::ReservationNotFound(id.to_string()).into());
        }

        Ok(reservation)
    }

    /// Applies the conditional transition and publishes the result.
    ///
    /// A failed precondition re-reads the row: the reservation either
    /// vanished or another transition won the race.
    async fn apply_transition(
        &self,
        reservation: Reservation,
        to: ReservationStatus,
    ) -> EngineResult<Reservation> {
        let applied = self.reservations.transition(&reservation.id, to).await?;

        if !applied {
            let current = self
                .reservations
                .get_by_id(&reservation.id)
                .await?
                .ok_or_else(|| CoreError::ReservationNotFound(reservation.id.clone()))?;
            return Err(CoreError::InvalidTransition {
                id: current.id,
                status: current.status,
            }
            .into());
        }

        info!(id = %reservation.id, to = %to, "Reservation transitioned");

        let updated = Reservation {
            status: to,
            ..reservation
        };
        self.hub.publish(ChangeEvent::Reservation(updated.clone()));
        Ok(updated)
    }
}
