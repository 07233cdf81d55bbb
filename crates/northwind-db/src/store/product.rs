//! # Product Store
//!
//! Database operations for products. Order placement reads products up
//! front and writes stock decrements back through [`EntityStore::update`],
//! so `update` persists the full row rather than individual columns.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::{EntityStore, SharedConnection};
use northwind_core::Product;

/// Store for product rows, bound to one unit of work's connection.
pub struct ProductStore {
    conn: SharedConnection,
}

impl ProductStore {
    pub(crate) fn new(conn: SharedConnection) -> Self {
        ProductStore { conn }
    }

    /// Lists all products that are still orderable.
    pub async fn list_active(&self) -> DbResult<Vec<Product>> {
        let mut conn = self.conn.lock().await;

        let products = sqlx::query_as::<_, Product>(
            "SELECT product_id, product_name, category_id, unit_price_cents, \
                    units_in_stock, discontinued \
             FROM products WHERE discontinued = 0 ORDER BY product_name",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(products)
    }
}

#[async_trait]
impl EntityStore for ProductStore {
    type Entity = Product;
    type Key = i64;

    async fn get_by_id(&self, id: &i64) -> DbResult<Option<Product>> {
        let mut conn = self.conn.lock().await;

        let product = sqlx::query_as::<_, Product>(
            "SELECT product_id, product_name, category_id, unit_price_cents, \
                    units_in_stock, discontinued \
             FROM products WHERE product_id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(product)
    }

    async fn list(&self) -> DbResult<Vec<Product>> {
        let mut conn = self.conn.lock().await;

        let products = sqlx::query_as::<_, Product>(
            "SELECT product_id, product_name, category_id, unit_price_cents, \
                    units_in_stock, discontinued \
             FROM products ORDER BY product_name",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(products)
    }

    async fn insert(&self, product: &mut Product) -> DbResult<()> {
        debug!(product_name = %product.product_name, "Inserting product");

        let mut conn = self.conn.lock().await;

        let result = sqlx::query(
            "INSERT INTO products (product_name, category_id, unit_price_cents, \
                                   units_in_stock, discontinued) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&product.product_name)
        .bind(product.category_id)
        .bind(product.unit_price_cents)
        .bind(product.units_in_stock)
        .bind(product.discontinued)
        .execute(&mut *conn)
        .await?;

        product.product_id = result.last_insert_rowid();

        Ok(())
    }

    async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(
            product_id = product.product_id,
            units_in_stock = ?product.units_in_stock,
            "Updating product"
        );

        let mut conn = self.conn.lock().await;

        let result = sqlx::query(
            "UPDATE products SET product_name = ?, category_id = ?, unit_price_cents = ?, \
                                 units_in_stock = ?, discontinued = ? \
             WHERE product_id = ?",
        )
        .bind(&product.product_name)
        .bind(product.category_id)
        .bind(product.unit_price_cents)
        .bind(product.units_in_stock)
        .bind(product.discontinued)
        .bind(product.product_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.product_id));
        }

        Ok(())
    }

    async fn delete(&self, id: &i64) -> DbResult<()> {
        debug!(product_id = id, "Deleting product");

        let mut conn = self.conn.lock().await;

        let result = sqlx::query("DELETE FROM products WHERE product_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    async fn exists(&self, id: &i64) -> DbResult<bool> {
        let mut conn = self.conn.lock().await;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE product_id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(count > 0)
    }
}
