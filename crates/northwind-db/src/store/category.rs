//! # Category Store
//!
//! Database operations for product categories. Category ids are generated
//! by SQLite; `insert` writes the new id back into the entity.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::{EntityStore, SharedConnection};
use northwind_core::Category;

/// Store for category rows, bound to one unit of work's connection.
pub struct CategoryStore {
    conn: SharedConnection,
}

impl CategoryStore {
    pub(crate) fn new(conn: SharedConnection) -> Self {
        CategoryStore { conn }
    }
}

#[async_trait]
impl EntityStore for CategoryStore {
    type Entity = Category;
    type Key = i64;

    async fn get_by_id(&self, id: &i64) -> DbResult<Option<Category>> {
        let mut conn = self.conn.lock().await;

        let category = sqlx::query_as::<_, Category>(
            "SELECT category_id, category_name, description \
             FROM categories WHERE category_id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(category)
    }

    async fn list(&self) -> DbResult<Vec<Category>> {
        let mut conn = self.conn.lock().await;

        let categories = sqlx::query_as::<_, Category>(
            "SELECT category_id, category_name, description \
             FROM categories ORDER BY category_name",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(categories)
    }

    async fn insert(&self, category: &mut Category) -> DbResult<()> {
        debug!(category_name = %category.category_name, "Inserting category");

        let mut conn = self.conn.lock().await;

        let result = sqlx::query(
            "INSERT INTO categories (category_name, description) VALUES (?, ?)",
        )
        .bind(&category.category_name)
        .bind(&category.description)
        .execute(&mut *conn)
        .await?;

        category.category_id = result.last_insert_rowid();

        Ok(())
    }

    async fn update(&self, category: &Category) -> DbResult<()> {
        debug!(category_id = category.category_id, "Updating category");

        let mut conn = self.conn.lock().await;

        let result = sqlx::query(
            "UPDATE categories SET category_name = ?, description = ? WHERE category_id = ?",
        )
        .bind(&category.category_name)
        .bind(&category.description)
        .bind(category.category_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", category.category_id));
        }

        Ok(())
    }

    async fn delete(&self, id: &i64) -> DbResult<()> {
        debug!(category_id = id, "Deleting category");

        let mut conn = self.conn.lock().await;

        let result = sqlx::query("DELETE FROM categories WHERE category_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }

    async fn exists(&self, id: &i64) -> DbResult<bool> {
        let mut conn = self.conn.lock().await;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE category_id = ?")
                .bind(id)
                .fetch_one(&mut *conn)
                .await?;

        Ok(count > 0)
    }
}
