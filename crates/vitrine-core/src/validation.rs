//! # Validation Module
//!
//! Opt-in strict checks for line items and discounts.
//!
//! ## When To Use
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Cart store + pricing (always)                                         │
//! │  └── Permissive: bad numbers fall back, nothing is rejected            │
//! │                                                                         │
//! │  THIS MODULE (only when the caller asks)                               │
//! │  ├── price: present, a number, finite, not negative                    │
//! │  ├── quantity: present, a whole number in 0..=MAX_ITEM_QUANTITY        │
//! │  └── discount: a number in 0..=100                                     │
//! │                                                                         │
//! │  The storefront command layer runs these when `strict_validation`      │
//! │  is enabled in its configuration.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrine_core::validation::validate_line_item;
//! use vitrine_core::LineItem;
//!
//! assert!(validate_line_item(&LineItem::new(1_i64, "A", 10.0, 2_i64)).is_ok());
//! assert!(validate_line_item(&LineItem::new(1_i64, "A", "10", 2_i64)).is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::numeric::{Numeric, NumericInput};
use crate::pricing::DiscountPercent;
use crate::types::LineItem;
use crate::MAX_ITEM_QUANTITY;

/// Reads a field as a finite number.
fn require_finite(field: &str, input: &NumericInput) -> ValidationResult<f64> {
    if input.is_missing() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    match input.check() {
        Numeric::Valid(n) if n.is_finite() => Ok(n),
        Numeric::Valid(_) => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be finite".to_string(),
        }),
        Numeric::Fallback => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        }),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be present and a finite number
/// - Must be non-negative (zero is allowed: free items)
pub fn validate_price(price: &NumericInput) -> ValidationResult<f64> {
    let price = require_finite("price", price)?;

    if price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(price)
}

/// Validates a quantity.
///
/// ## Rules
/// - Must be present and a whole number
/// - Must be between 0 and MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(quantity: &NumericInput) -> ValidationResult<i64> {
    let quantity = require_finite("quantity", quantity)?;

    if quantity.fract() != 0.0 {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must be a whole number".to_string(),
        });
    }

    if !(0.0..=MAX_ITEM_QUANTITY as f64).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(quantity as i64)
}

/// Validates a discount percentage without clamping it.
///
/// ## Rules
/// - Must be present and a finite number
/// - Must be between 0 and 100
pub fn validate_discount_percent(discount: &NumericInput) -> ValidationResult<DiscountPercent> {
    let value = require_finite("discount", discount)?;

    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(DiscountPercent::normalize(discount))
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates the numeric fields of a line item.
///
/// Metadata and `name` are never inspected.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_price(&item.price)?;
    validate_quantity(&item.quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price(&NumericInput::from(0.0)), Ok(0.0));
        assert_eq!(validate_price(&NumericInput::from(10.99)), Ok(10.99));

        assert!(matches!(
            validate_price(&NumericInput::missing()),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_price(&NumericInput::from("100")),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_price(&NumericInput::from(f64::NAN)),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_price(&NumericInput::from(f64::INFINITY)),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_price(&NumericInput::from(-1.0)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(&NumericInput::from(0_i64)), Ok(0));
        assert_eq!(validate_quantity(&NumericInput::from(999_i64)), Ok(999));

        assert!(validate_quantity(&NumericInput::from(1.5)).is_err());
        assert!(validate_quantity(&NumericInput::from(-1_i64)).is_err());
        assert!(validate_quantity(&NumericInput::from(1000_i64)).is_err());
        assert!(validate_quantity(&NumericInput::missing()).is_err());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert_eq!(
            validate_discount_percent(&NumericInput::from(10.0)).map(DiscountPercent::value),
            Ok(10.0)
        );
        assert!(validate_discount_percent(&NumericInput::from(100.0)).is_ok());
        assert!(validate_discount_percent(&NumericInput::from(-10.0)).is_err());
        assert!(validate_discount_percent(&NumericInput::from(200.0)).is_err());
        assert!(validate_discount_percent(&NumericInput::from("10")).is_err());
    }

    #[test]
    fn test_validate_line_item() {
        assert!(validate_line_item(&LineItem::new(1_i64, "A", 100.0, 2_i64)).is_ok());
        assert!(validate_line_item(&LineItem::new(1_i64, "A", 100.0, NumericInput::missing())).is_err());
        assert!(validate_line_item(&LineItem::new(1_i64, "A", -5.0, 1_i64)).is_err());
    }
}
