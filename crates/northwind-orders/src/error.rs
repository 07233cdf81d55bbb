//! # Order Placement Errors
//!
//! The error taxonomy callers of [`crate::place_order`] match on.
//!
//! ## Two Classes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  REQUEST ERRORS (fix the request, don't retry as-is)                    │
//! │  ├── Validation          input shape is wrong                           │
//! │  ├── CustomerNotFound    unknown customer key                           │
//! │  ├── ProductNotFound     unknown product id                             │
//! │  ├── Discontinued        product no longer sold                         │
//! │  └── InsufficientStock   not enough units on hand                       │
//! │       all raised BEFORE any transaction opens — zero side effects       │
//! │                                                                         │
//! │  OPERATIONAL ERRORS                                                     │
//! │  ├── Cancelled           caller gave up; any open scope rolled back     │
//! │  └── Infrastructure      store/transaction failure, after rollback      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use northwind_core::ValidationError;
use northwind_db::DbError;

/// Errors from the order placement workflow.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The request references a customer that does not exist.
    #[error("customer not found: {0}")]
    CustomerNotFound(String),

    /// The request references a product that does not exist.
    #[error("product not found: {0}")]
    ProductNotFound(i64),

    /// The product exists but is no longer sold.
    #[error("product {product_id} ({name}) is discontinued")]
    Discontinued { product_id: i64, name: String },

    /// Not enough units on hand to satisfy a line.
    #[error(
        "insufficient stock for product {product_id} ({name}): \
         {available} available, {requested} requested"
    )]
    InsufficientStock {
        product_id: i64,
        name: String,
        available: i64,
        requested: i64,
    },

    /// The request shape is invalid (empty items, bad quantity, ...).
    #[error("invalid order request: {0}")]
    Validation(#[from] ValidationError),

    /// The caller cancelled the placement. Any open transaction was rolled
    /// back before this was raised.
    #[error("order placement was cancelled")]
    Cancelled,

    /// A store or transaction operation failed. Always preceded by a
    /// rollback attempt; the database holds no partial order.
    #[error("database error: {0}")]
    Infrastructure(#[from] DbError),
}

impl OrderError {
    /// Whether this error is the caller's to fix (as opposed to a
    /// cancellation or infrastructure failure).
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            OrderError::CustomerNotFound(_)
                | OrderError::ProductNotFound(_)
                | OrderError::Discontinued { .. }
                | OrderError::InsufficientStock { .. }
                | OrderError::Validation(_)
        )
    }
}

/// Result type for order placement.
pub type OrderResult<T> = Result<T, OrderError>;
