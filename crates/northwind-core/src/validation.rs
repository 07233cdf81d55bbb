//! # Validation Module
//!
//! Input-shape validation for order placement.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (pure input-shape rules)                          │
//! │  ├── quantity positive, discount in range, ids non-blank                │
//! │  └── runs before any I/O; failures carry no side effects                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Workflow (reads against live state)                           │
//! │  ├── customer/product existence, discontinued flag, stock level         │
//! │  └── northwind-orders, outside the write transaction                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite constraints)                                 │
//! │  └── NOT NULL, CHECK, foreign keys — the last line of defense           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

/// Validates a customer id.
///
/// Customer keys are opaque strings (`"ALFKI"`); the only shape rule is
/// that they are not blank.
pub fn validate_customer_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer_id".to_string(),
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// Must be positive and at most [`MAX_LINE_QUANTITY`].
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a discount in basis points.
///
/// A discount is a fraction in `[0, 1)`, so bps must be below 10000.
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps >= 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 9_999,
        });
    }

    Ok(())
}

/// Validates the item count of an order.
///
/// An order carries at least one line and at most [`MAX_ORDER_LINES`].
pub fn validate_line_count(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if count > MAX_ORDER_LINES {
        return Err(ValidationError::TooMany {
            field: "items".to_string(),
            max: MAX_ORDER_LINES,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
