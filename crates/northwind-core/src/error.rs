//! # Error Types
//!
//! Input validation errors for the domain layer.
//!
//! The full order-placement taxonomy (not-found, discontinued, insufficient
//! stock, infrastructure) lives in `northwind-orders`, which can see the
//! database layer; this crate only knows about the shape of inputs.
//!
//! ## Design Principles
//! 1. `thiserror` derive, never manual `impl`
//! 2. Context in messages (field, bounds)
//! 3. Errors are enum variants, never `String`

use thiserror::Error;

/// Input validation errors.
///
/// Raised by the [`crate::validation`] rules before any business logic or
/// I/O runs. They represent caller input problems and are never retried.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Collection exceeds its size limit.
    #[error("{field} cannot have more than {max} entries")]
    TooMany { field: String, max: usize },
}

/// Convenience alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "customer_id".to_string(),
        };
        assert_eq!(err.to_string(), "customer_id is required");

        let err = ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 9999,
        };
        assert_eq!(err.to_string(), "discount must be between 0 and 9999");
    }
}
