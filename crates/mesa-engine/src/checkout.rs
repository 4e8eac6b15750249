//! # Checkout Session
//!
//! One cashier's in-progress transaction: the cart, an optionally linked
//! customer, and the commit.
//!
//! The session lives in the cashier's dashboard memory only. Prices are
//! frozen into the cart at add time; stock is checked at add time but
//! consumed only at commit. The point grant is part of the commit: if it
//! fails, the checkout fails and the cart is left intact for a retry.

use tracing::{info, warn};

use mesa_core::validation::validate_customer_name;
use mesa_core::{Account, Cart, CartLine, CoreError, LoyaltyRules, VoidDecision};
use mesa_db::{AccountRepository, MenuRepository};
use mesa_sync::{CatalogChange, ChangeEvent, ChangeHub};

use crate::error::{EngineError, EngineResult};
use crate::ledger::LedgerService;

// =============================================================================
// Receipt
// =============================================================================

/// What a completed checkout hands back to the cashier UI.
#[derive(Debug)]
pub struct CheckoutReceipt {
    /// Sum of frozen line totals.
    pub total: i64,

    /// Points granted, when a customer was linked.
    pub points_earned: Option<i64>,

    /// The linked customer after the grant, when one was linked.
    pub customer: Option<Account>,

    /// Stock consumption failures. The checkout itself succeeded; these
    /// items could not be decremented (e.g. deleted mid-transaction).
    pub stock_warnings: Vec<EngineError>,
}

// =============================================================================
// Session
// =============================================================================

/// A per-cashier checkout session. Not shared, not persisted.
pub struct CheckoutSession {
    cart: Cart,
    customer: Option<Account>,
    menu: MenuRepository,
    accounts: AccountRepository,
    ledger: LedgerService,
    hub: ChangeHub,
    rules: LoyaltyRules,
}

impl CheckoutSession {
    /// Creates an empty session.
    pub fn new(
        menu: MenuRepository,
        accounts: AccountRepository,
        ledger: LedgerService,
        hub: ChangeHub,
        rules: LoyaltyRules,
    ) -> Self {
        CheckoutSession {
            cart: Cart::new(),
            customer: None,
            menu,
            accounts,
            ledger,
            hub,
            rules,
        }
    }

    /// Adds one unit of a catalog item to the cart.
    ///
    /// Refuses the add when the item is gone or its catalog stock is
    /// exhausted. The stock check is advisory (nothing is reserved);
    /// consumption happens at [`checkout`](Self::checkout).
    pub async fn add_line(&mut self, item_id: &str) -> EngineResult<CartLine> {
        let item = self
            .menu
            .get_by_id(item_id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

        if !item.in_stock() {
            return Err(CoreError::OutOfStock { name: item.name }.into());
        }

        let line = self.cart.add_item(&item)?.clone();
        Ok(line)
    }

    /// Voids a cart line, gated on the cashier's confirmation.
    ///
    /// `Declined` leaves the cart unchanged and returns `None`.
    pub fn remove_line(
        &mut self,
        item_id: &str,
        decision: VoidDecision,
    ) -> EngineResult<Option<CartLine>> {
        if decision == VoidDecision::Declined {
            return Ok(None);
        }

        let line = self
            .cart
            .remove_line(item_id)
            .ok_or_else(|| CoreError::LineNotFound(item_id.to_string()))?;

        info!(item = %line.name, quantity = line.quantity, "Cart line voided");
        Ok(Some(line))
    }

    /// Links a customer account by exact display name, for point
    /// accrual.
    ///
    /// No match fails with `CustomerNotFound`; more than one match is
    /// rejected as ambiguous rather than silently picking one.
    pub async fn link_customer(&mut self, name: &str) -> EngineResult<&Account> {
        let name = validate_customer_name(name).map_err(CoreError::from)?;

        let mut matches = self.accounts.find_by_name(&name).await?;
        match matches.len() {
            0 => Err(CoreError::CustomerNotFound { name }.into()),
            1 => {
                let account = matches.remove(0);
                info!(customer = %account.id, name = %account.name, "Customer linked");
                Ok(self.customer.insert(account))
            }
            n => Err(CoreError::AmbiguousCustomer { name, matches: n }.into()),
        }
    }

    /// Unlinks the customer. Returns the previously linked account.
    pub fn unlink_customer(&mut self) -> Option<Account> {
        self.customer.take()
    }

    /// The currently linked customer, if any.
    pub fn customer(&self) -> Option<&Account> {
        self.customer.as_ref()
    }

    /// Current cart lines, in add order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Cart total over frozen snapshot prices.
    pub fn total(&self) -> i64 {
        self.cart.total()
    }

    /// Points the linked customer would earn at the current total.
    pub fn points_preview(&self) -> Option<i64> {
        self.customer
            .as_ref()
            .map(|_| self.rules.points_for_total(self.cart.total()))
    }

    /// Commits the transaction.
    ///
    /// Fails with `EmptyCart` when there is nothing to ring up. With a
    /// linked customer the point grant is part of the commit: a ledger
    /// failure fails the checkout and keeps the cart. After the commit,
    /// stock is consumed per line with the clamped decrement; those
    /// failures degrade to warnings on the receipt. The cart always
    /// clears on success, customer linked or not.
    pub async fn checkout(&mut self) -> EngineResult<CheckoutReceipt> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let total = self.cart.total();
        let mut points_earned = None;
        let mut customer_after = None;

        if let Some(customer) = &self.customer {
            let earned = self.rules.points_for_total(total);
            let updated = self.ledger.adjust_points(&customer.id, earned).await?;
            info!(
                customer = %updated.id,
                earned = earned,
                balance = updated.points,
                "Checkout points granted"
            );
            points_earned = Some(earned);
            customer_after = Some(updated);
        }

        let mut stock_warnings = Vec::new();
        for line in self.cart.lines() {
            match self.menu.decrement_stock(&line.item_id, line.quantity).await {
                Ok(()) => {
                    if let Ok(Some(item)) = self.menu.get_by_id(&line.item_id).await {
                        self.hub
                            .publish(ChangeEvent::Catalog(CatalogChange::Upserted(item)));
                    }
                }
                Err(e) => {
                    warn!(item = %line.item_id, error = %e, "Stock consumption failed");
                    stock_warnings.push(e.into());
                }
            }
        }

        info!(total = total, lines = self.cart.line_count(), "Checkout committed");
        self.cart.clear();

        Ok(CheckoutReceipt {
            total,
            points_earned,
            customer: customer_after,
            stock_warnings,
        })
    }
}
