//! # Unit of Work
//!
//! One connection, one operation, one transaction scope.
//!
//! ## Shape
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                         UnitOfWork                                 │
//! │                                                                    │
//! │   pool ──► checked-out connection (kept for the unit's lifetime)   │
//! │                      │                                             │
//! │        ┌─────────────┼──────────────┬─────────────┐                │
//! │        ▼             ▼              ▼             ▼                │
//! │   customers()   products()     orders()    categories()            │
//! │   (created on first access, then reused)                           │
//! │                      │                                             │
//! │                      ▼                                             │
//! │               transaction()                                        │
//! │   begin / flush / commit / rollback over the same connection       │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because every store and the transaction manager share the unit's
//! connection, uncommitted writes are visible to the whole unit and to
//! nothing else. Dropping the unit closes the connection, which discards
//! any transaction left open.

use std::sync::{Arc, OnceLock};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use crate::store::category::CategoryStore;
use crate::store::customer::CustomerStore;
use crate::store::order::OrderStore;
use crate::store::product::ProductStore;
use crate::store::SharedConnection;
use crate::transaction::TransactionManager;

/// Scopes a group of store operations to a single connection.
///
/// Stores and the transaction manager are created lazily and memoized:
/// repeated accessor calls return the same instance.
pub struct UnitOfWork {
    conn: SharedConnection,
    customers: OnceLock<CustomerStore>,
    categories: OnceLock<CategoryStore>,
    products: OnceLock<ProductStore>,
    orders: OnceLock<OrderStore>,
    transaction: OnceLock<TransactionManager>,
}

impl UnitOfWork {
    /// Creates a unit of work by checking a connection out of the pool.
    ///
    /// The connection is detached from the pool: it belongs to this unit
    /// until the unit is dropped, at which point it is closed (not
    /// returned). An open transaction dies with it, so an abandoned unit
    /// can never leak uncommitted writes into later operations.
    pub async fn new(db: &Database) -> DbResult<Self> {
        debug!("Opening unit of work");

        let conn = db.pool().acquire().await?.detach();

        Ok(UnitOfWork {
            conn: Arc::new(Mutex::new(conn)),
            customers: OnceLock::new(),
            categories: OnceLock::new(),
            products: OnceLock::new(),
            orders: OnceLock::new(),
            transaction: OnceLock::new(),
        })
    }

    /// The customer store for this unit.
    pub fn customers(&self) -> &CustomerStore {
        self.customers
            .get_or_init(|| CustomerStore::new(Arc::clone(&self.conn)))
    }

    /// The category store for this unit.
    pub fn categories(&self) -> &CategoryStore {
        self.categories
            .get_or_init(|| CategoryStore::new(Arc::clone(&self.conn)))
    }

    /// The product store for this unit.
    pub fn products(&self) -> &ProductStore {
        self.products
            .get_or_init(|| ProductStore::new(Arc::clone(&self.conn)))
    }

    /// The order store for this unit.
    pub fn orders(&self) -> &OrderStore {
        self.orders
            .get_or_init(|| OrderStore::new(Arc::clone(&self.conn)))
    }

    /// The transaction manager for this unit.
    pub fn transaction(&self) -> &TransactionManager {
        self.transaction
            .get_or_init(|| TransactionManager::new(Arc::clone(&self.conn)))
    }
}
