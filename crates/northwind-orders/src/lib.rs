//! # northwind-orders: Order Placement Workflow
//!
//! The orchestration layer of the Northwind order service: takes a
//! [`PlaceOrderRequest`], validates it, checks the catalog, and commits the
//! order header, its lines, and the matching stock decrements as a single
//! transaction.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller (API handler, CLI, test)                                        │
//! │       │  PlaceOrderRequest + CancellationToken                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             northwind-orders (THIS CRATE)                       │   │
//! │  │   place_order ──► validate ──► read ──► transact ──► receipt    │   │
//! │  │   OrderError: what went wrong and whether to retry              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │              rules │           │ stores, transactions                   │
//! │                    ▼           ▼                                        │
//! │        northwind-core     northwind-db                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use northwind_orders::{place_order, OrderItem, PlaceOrderRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! let request = PlaceOrderRequest::new(
//!     "ALFKI",
//!     vec![OrderItem { product_id: 1, quantity: 5, discount_bps: 0 }],
//! );
//! let receipt = place_order(&db, request, CancellationToken::new()).await?;
//! println!("{}", receipt.message);
//! ```

pub mod error;
pub mod place_order;

pub use error::{OrderError, OrderResult};
pub use place_order::{place_order, OrderItem, OrderReceipt, PlaceOrderRequest};
