//! # Validation Module
//!
//! Input validation helpers shared by the engine services.
//!
//! Validators run before any persistence call, so a `ValidationError`
//! always means nothing was written.

use crate::error::ValidationError;
use crate::MAX_RESERVATION_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// Returns the trimmed name.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

/// Validates a non-empty identifier or free-form required field.
pub fn validate_required(field: &'static str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Validates the customer name the cashier searches for.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }
    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: 200,
        });
    }
    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in the smallest currency unit. Zero is allowed.
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a reservation quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed [`MAX_RESERVATION_QUANTITY`]
pub fn validate_reservation_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if qty > MAX_RESERVATION_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_RESERVATION_QUANTITY,
        });
    }
    Ok(())
}

/// Clamps a stock input to the valid range.
///
/// Negative admin input is treated as zero rather than rejected, matching
/// the clamp applied by the stock decrement.
#[inline]
pub fn clamp_stock(stock: i64) -> i64 {
    stock.max(0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert_eq!(validate_item_name("  Burger ").unwrap(), "Burger");
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("time_slot", "").is_err());
        assert_eq!(validate_required("time_slot", " 18:30 ").unwrap(), "18:30");
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(85).is_ok());
        assert!(validate_price(-1).is_err());
    }

    #[test]
    fn test_validate_reservation_quantity() {
        assert!(validate_reservation_quantity(1).is_ok());
        assert!(validate_reservation_quantity(10).is_ok());
        assert!(validate_reservation_quantity(0).is_err());
        assert!(validate_reservation_quantity(11).is_err());
    }

    #[test]
    fn test_clamp_stock() {
        assert_eq!(clamp_stock(-5), 0);
        assert_eq!(clamp_stock(0), 0);
        assert_eq!(clamp_stock(7), 7);
    }
}
