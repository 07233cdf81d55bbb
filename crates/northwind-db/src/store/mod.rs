//! # Entity Stores
//!
//! Per-aggregate CRUD access behind one uniform contract.
//!
//! ## Store Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Entity Store Contract                                 │
//! │                                                                         │
//! │  place_order / handlers                                                 │
//! │       │                                                                 │
//! │       │  uow.products().get_by_id(&42)                                  │
//! │       ▼                                                                 │
//! │  EntityStore (capability set)                                           │
//! │  ├── get_by_id / list / insert / update / delete / exists               │
//! │  └── implemented independently per aggregate, no inheritance            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  One shared SQLite connection (the unit of work's)                      │
//! │                                                                         │
//! │  Stores own NO business logic: validation and orchestration happen      │
//! │  in northwind-orders.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All stores created by one [`crate::unit_of_work::UnitOfWork`] share its
//! connection, so writes made inside an open transaction are visible to
//! every store of that unit and invisible elsewhere until commit.

use async_trait::async_trait;
use sqlx::SqliteConnection;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::DbResult;

pub mod category;
pub mod customer;
pub mod order;
pub mod product;

/// The connection shared by all stores of one unit of work.
///
/// The mutex serializes statements; a unit of work serves one logical
/// operation, so there is no contention in practice.
pub(crate) type SharedConnection = Arc<Mutex<SqliteConnection>>;

/// Uniform CRUD contract for one aggregate type.
///
/// ## Contract
/// - `insert` takes `&mut` so stores with generated keys can write the new
///   id back into the entity; the id becomes durable on flush/commit.
/// - `update` and `delete` report [`crate::DbError::NotFound`] when zero
///   rows are affected.
#[async_trait]
pub trait EntityStore {
    type Entity: Send + Sync;
    type Key: ?Sized + Sync;

    async fn get_by_id(&self, id: &Self::Key) -> DbResult<Option<Self::Entity>>;

    async fn list(&self) -> DbResult<Vec<Self::Entity>>;

    async fn insert(&self, entity: &mut Self::Entity) -> DbResult<()>;

    async fn update(&self, entity: &Self::Entity) -> DbResult<()>;

    async fn delete(&self, id: &Self::Key) -> DbResult<()>;

    async fn exists(&self, id: &Self::Key) -> DbResult<bool>;
}
