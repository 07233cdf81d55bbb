//! # northwind-core: Pure Business Logic for the Northwind Order Service
//!
//! This crate is the **heart** of the order service. It contains the domain
//! entities and every business rule as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Northwind Order Service                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               northwind-orders (workflow)                       │   │
//! │  │    place_order: validate ──► begin ──► write ──► commit         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ northwind-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────────┐              │   │
//! │  │   │   types   │  │   money   │  │  validation   │              │   │
//! │  │   │ Customer  │  │   Money   │  │    rules      │              │   │
//! │  │   │ Product   │  │ Discount  │  │    checks     │              │   │
//! │  │   │ Order     │  └───────────┘  └───────────────┘              │   │
//! │  │   └───────────┘                                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               northwind-db (Database Layer)                     │   │
//! │  │     SQLite stores, unit of work, transaction manager            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: monetary values are cents (i64) to avoid float errors
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use money::{Discount, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of lines allowed in a single order.
///
/// Prevents runaway requests; orders this large are split upstream.
pub const MAX_ORDER_LINES: usize = 50;

/// Maximum quantity of a single product on one order line.
///
/// Guards against typos (1000 instead of 10); real wholesale orders of this
/// size go through a separate channel.
pub const MAX_LINE_QUANTITY: i64 = 999;
