//! # Cart
//!
//! The cashier's in-progress transaction: a list of lines with prices
//! frozen at add time.
//!
//! A cart lives in one cashier's session memory only. It is never
//! persisted, never shared between cashiers, and owns no identifier; it
//! exists until checked out or abandoned.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::MenuItem;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the cart.
///
/// `unit_price` is captured when the item is first added and is immune to
/// later catalog price edits, so a checkout can never silently reprice
/// items already rung up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog item this line references.
    pub item_id: String,

    /// Item name at add time (frozen).
    pub name: String,

    /// Price at add time (frozen), smallest currency unit.
    pub unit_price: i64,

    pub quantity: i64,
}

impl CartLine {
    /// Creates a line at quantity 1 from the item's current catalog state.
    pub fn from_item(item: &MenuItem) -> Self {
        CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
        }
    }

    /// Line total: frozen unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> i64 {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Void Confirmation
// =============================================================================

/// Caller-supplied confirmation for voiding a cart line.
///
/// Voiding is destructive from the cashier's point of view, so the UI
/// must ask first and pass the answer down; `Declined` leaves the cart
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoidDecision {
    Confirmed,
    Declined,
}

// =============================================================================
// Cart
// =============================================================================

/// The cashier cart.
///
/// ## Invariants
/// - Lines are unique by `item_id`; adding the same item again merges
///   into the existing line.
/// - `total()` is always the sum of `unit_price × quantity` over lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of a catalog item.
    ///
    /// Merges into an existing line for the same item (quantity += 1) or
    /// appends a new line at quantity 1 with the item's current price as
    /// the snapshot. Stock availability is checked by the caller; the
    /// cart itself never touches the catalog.
    pub fn add_item(&mut self, item: &MenuItem) -> CoreResult<&CartLine> {
        if let Some(idx) = self.lines.iter().position(|l| l.item_id == item.id) {
            let line = &mut self.lines[idx];
            if line.quantity + 1 > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: line.quantity + 1,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity += 1;
            return Ok(&self.lines[idx]);
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::from_item(item));
        Ok(self.lines.last().expect("line just pushed"))
    }

    /// Removes the line for `item_id`, returning it.
    ///
    /// Returns `None` if no line references the item.
    pub fn remove_line(&mut self, item_id: &str) -> Option<CartLine> {
        let idx = self.lines.iter().position(|l| l.item_id == item_id)?;
        Some(self.lines.remove(idx))
    }

    /// Current lines, in add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of frozen line totals.
    pub fn total(&self) -> i64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drops every line. Called after a successful checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
