//! # northwind-db: Database Layer for the Northwind Order Service
//!
//! SQLite data access via sqlx, organized around the unit-of-work pattern.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Northwind Data Flow                                 │
//! │                                                                         │
//! │  place_order (northwind-orders)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 northwind-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   Database ──► UnitOfWork ──┬── CustomerStore                   │   │
//! │  │   (pool.rs)   (one conn)    ├── CategoryStore                   │   │
//! │  │                             ├── ProductStore                    │   │
//! │  │                             ├── OrderStore                      │   │
//! │  │                             └── TransactionManager              │   │
//! │  │                                 (begin/flush/commit/rollback)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (WAL mode, foreign keys on)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`store`] - Entity store contract and implementations
//! - [`transaction`] - Transaction manager
//! - [`unit_of_work`] - Per-operation store factory on one connection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use northwind_db::{Database, DbConfig, UnitOfWork};
//!
//! let db = Database::new(DbConfig::new("northwind.db")).await?;
//! let uow = UnitOfWork::new(&db).await?;
//!
//! let customer = uow.customers().get_by_id("ALFKI").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod store;
pub mod transaction;
pub mod unit_of_work;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::category::CategoryStore;
pub use store::customer::CustomerStore;
pub use store::order::OrderStore;
pub use store::product::ProductStore;
pub use store::EntityStore;
pub use transaction::TransactionManager;
pub use unit_of_work::UnitOfWork;
