//! # Error Types
//!
//! Domain-specific error types for mesa-core.
//!
//! ## Error Hierarchy
//! ```text
//! mesa-core errors (this file)
//! ├── CoreError        - Business rule violations
//! └── ValidationError  - Input validation failures
//!
//! mesa-db errors (separate crate)
//! └── DbError          - Persistence failures
//!
//! mesa-engine errors
//! └── EngineError      - Core + Db + role gating, what dashboards see
//! ```
//!
//! Every failure is scoped to the single requested operation; nothing in
//! the core is fatal to the process.

use thiserror::Error;

use crate::types::ReservationStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu item cannot be found (deleted, or never existed).
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    /// Reservation cannot be found. Also returned when a customer asks
    /// about a reservation they do not own: ownership is enforced
    /// server-side and other customers' records are indistinguishable
    /// from absent ones.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    /// The cart has no line for the referenced item.
    #[error("No cart line for item {0}")]
    LineNotFound(String),

    /// Account row is gone; the points adjustment was not applied.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Cashier customer lookup matched nothing.
    #[error("No customer named '{name}'")]
    CustomerNotFound { name: String },

    /// Cashier customer lookup matched more than one account.
    /// The caller must resolve with a unique name.
    #[error("{matches} customers share the name '{name}'")]
    AmbiguousCustomer { name: String, matches: usize },

    /// Reservation is not in a state that allows the requested transition.
    ///
    /// Completed and cancelled are absorbing: once reached, every further
    /// transition lands here.
    #[error("Reservation {id} is {status}, cannot transition")]
    InvalidTransition {
        id: String,
        status: ReservationStatus,
    },

    /// Catalog stock for the item is exhausted at add-to-cart time.
    #[error("'{name}' is out of stock")]
    OutOfStock { name: String },

    /// Checkout attempted with no cart lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart line quantity would exceed the allowed maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Cart has exceeded the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Always caller-recoverable: fix the input and resubmit.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed UUID or date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidTransition {
            id: "r-1".to_string(),
            status: ReservationStatus::Cancelled,
        };
        assert_eq!(err.to_string(), "Reservation r-1 is cancelled, cannot transition");

        let err = CoreError::AmbiguousCustomer {
            name: "Ana".to_string(),
            matches: 2,
        };
        assert_eq!(err.to_string(), "2 customers share the name 'Ana'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "time_slot".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
