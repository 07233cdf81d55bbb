//! # Transaction Manager
//!
//! Explicit transaction control over a unit of work's connection.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  begin() ──► work through stores ──► commit()               │
//! │     │                                    │                  │
//! │     │          failure anywhere          │ COMMIT fails     │
//! │     └──────────────┬─────────────────────┘                  │
//! │                    ▼                                        │
//! │               rollback()  (idempotent, safe in cleanup)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! sqlx's own `Transaction` type ties the transaction to a borrow of the
//! connection, which doesn't fit a unit of work whose stores each hold the
//! same shared connection. Raw `BEGIN`/`COMMIT`/`ROLLBACK` statements plus
//! an activity flag give the same guarantees without the borrow.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

use crate::error::{DbError, DbResult};
use crate::store::SharedConnection;

/// Manages one explicit transaction scope on a shared connection.
///
/// At most one transaction can be open at a time; nested `begin` calls
/// are rejected rather than silently stacked.
pub struct TransactionManager {
    conn: SharedConnection,
    active: AtomicBool,
}

impl TransactionManager {
    pub(crate) fn new(conn: SharedConnection) -> Self {
        TransactionManager {
            conn,
            active: AtomicBool::new(false),
        }
    }

    /// Returns whether a transaction is currently open.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Opens a transaction.
    ///
    /// `BEGIN IMMEDIATE` takes the write lock up front, so a concurrent
    /// writer surfaces as an error here instead of at the first write.
    ///
    /// Errors with [`DbError::AlreadyInTransaction`] if a scope is open.
    pub async fn begin(&self) -> DbResult<()> {
        if self.active.swap(true, Ordering::SeqCst) {
            return Err(DbError::AlreadyInTransaction);
        }

        debug!("Beginning transaction");

        let mut conn = self.conn.lock().await;
        if let Err(e) = sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await {
            self.active.store(false, Ordering::SeqCst);
            return Err(DbError::TransactionFailed(e.to_string()));
        }

        Ok(())
    }

    /// Commits the open transaction, making all its writes durable.
    ///
    /// If the `COMMIT` statement itself fails, the transaction is rolled
    /// back before the error is returned, so the connection is never left
    /// holding a half-committed scope.
    ///
    /// Errors with [`DbError::NotInTransaction`] if no scope is open.
    pub async fn commit(&self) -> DbResult<()> {
        if !self.active.load(Ordering::SeqCst) {
            return Err(DbError::NotInTransaction);
        }

        debug!("Committing transaction");

        let mut conn = self.conn.lock().await;
        let commit_result = sqlx::query("COMMIT").execute(&mut *conn).await;
        self.active.store(false, Ordering::SeqCst);

        if let Err(commit_err) = commit_result {
            error!(error = %commit_err, "Commit failed, rolling back");
            if let Err(rb_err) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                // SQLite usually auto-rolls-back on a failed COMMIT; the
                // original failure is still what the caller needs to see.
                error!(error = %rb_err, "Rollback after failed commit also failed");
            }
            return Err(DbError::TransactionFailed(commit_err.to_string()));
        }

        info!("Transaction committed");
        Ok(())
    }

    /// Rolls back the open transaction, discarding all its writes.
    ///
    /// Idempotent: rolling back with no open transaction is a no-op, so
    /// error-path cleanup can call this unconditionally.
    pub async fn rollback(&self) -> DbResult<()> {
        if !self.active.swap(false, Ordering::SeqCst) {
            debug!("Rollback requested with no open transaction, ignoring");
            return Ok(());
        }

        info!("Rolling back transaction");

        let mut conn = self.conn.lock().await;
        sqlx::query("ROLLBACK")
            .execute(&mut *conn)
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Checkpoints pending writes inside the open transaction.
    ///
    /// Statements on this connection execute eagerly, so all prior writes
    /// (including generated ids) are already visible within the scope;
    /// this verifies the scope is still open and the connection alive.
    ///
    /// Errors with [`DbError::NotInTransaction`] if no scope is open.
    pub async fn flush(&self) -> DbResult<()> {
        if !self.active.load(Ordering::SeqCst) {
            return Err(DbError::NotInTransaction);
        }

        let mut conn = self.conn.lock().await;
        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }
}
