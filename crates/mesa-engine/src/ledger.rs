//! # Ledger Service
//!
//! The single mutation surface for loyalty points.
//!
//! Every grant and reversal in the system funnels through
//! [`LedgerService::adjust_points`], which applies the delta with the
//! repository's atomic increment. Balances are never computed from a
//! dashboard's cached copy.

use tracing::debug;

use mesa_core::{Account, CoreError};
use mesa_db::{AccountRepository, DbError};
use mesa_sync::{ChangeEvent, ChangeHub};

use crate::error::EngineResult;

/// Applies atomic point adjustments and fans out the updated account.
#[derive(Debug, Clone)]
pub struct LedgerService {
    accounts: AccountRepository,
    hub: ChangeHub,
}

impl LedgerService {
    /// Creates a new LedgerService.
    pub fn new(accounts: AccountRepository, hub: ChangeHub) -> Self {
        LedgerService { accounts, hub }
    }

    /// Atomically adjusts an account's balance by `delta` (positive or
    /// negative) and returns the updated account.
    ///
    /// Commutative under concurrency: N concurrent adjustments land as
    /// the sum of their deltas regardless of interleaving. Fails with
    /// [`CoreError::AccountNotFound`] when the account row is gone; the
    /// caller decides whether that is fatal (checkout) or a degraded
    /// success (reservation side effects).
    pub async fn adjust_points(&self, account_id: &str, delta: i64) -> EngineResult<Account> {
        debug!(account = %account_id, delta = delta, "Ledger adjustment");

        let account = match self.accounts.adjust_points(account_id, delta).await {
            Ok(account) => account,
            Err(DbError::NotFound { .. }) => {
                return Err(CoreError::AccountNotFound(account_id.to_string()).into())
            }
            Err(e) => return Err(e.into()),
        };

        self.hub.publish(ChangeEvent::Account(account.clone()));
        Ok(account)
    }

    /// Reads the current balance. Read-only; dashboards display this but
    /// never write it back.
    pub async fn balance(&self, account_id: &str) -> EngineResult<i64> {
        let account = self
            .accounts
            .get_by_id(account_id)
            .await?
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;

        Ok(account.points)
    }
}
