//! # mesa-core: Pure Business Logic for Mesa POS
//!
//! The heart of Mesa POS: domain types and business rules with zero I/O
//! dependencies.
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Account, Reservation, Actor)
//! - [`cart`] - The cashier cart with snapshot pricing
//! - [`loyalty`] - Loyalty point rules (reservation bonus, checkout earn)
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output; no hidden state
//! 2. **No I/O**: database, network, and file access are forbidden here
//! 3. **Integer money**: prices are i64 in the smallest currency unit
//! 4. **Explicit errors**: typed enums, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod loyalty;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, VoidDecision};
pub use error::{CoreError, CoreResult, ValidationError};
pub use loyalty::LoyaltyRules;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in a cart.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum quantity a single reservation may request.
pub const MAX_RESERVATION_QUANTITY: i64 = 10;
