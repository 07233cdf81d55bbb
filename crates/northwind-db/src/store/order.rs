//! # Order Store
//!
//! Database operations for order headers and their line items.
//!
//! Order ids are generated by SQLite. Line items are keyed by
//! `(order_id, product_id)`, so the header must be inserted (and its
//! generated id read back) before any lines can be added.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::{EntityStore, SharedConnection};
use northwind_core::{Order, OrderLine};

/// Store for order rows and their lines, bound to one unit of work's
/// connection.
pub struct OrderStore {
    conn: SharedConnection,
}

impl OrderStore {
    pub(crate) fn new(conn: SharedConnection) -> Self {
        OrderStore { conn }
    }

    /// Inserts a line item for an existing order.
    ///
    /// Fails with [`DbError::UniqueViolation`] if the order already has a
    /// line for the same product, and [`DbError::ForeignKeyViolation`] if
    /// the order or product row does not exist.
    pub async fn add_line(&self, line: &OrderLine) -> DbResult<()> {
        debug!(
            order_id = line.order_id,
            product_id = line.product_id,
            quantity = line.quantity,
            "Inserting order line"
        );

        let mut conn = self.conn.lock().await;

        sqlx::query(
            "INSERT INTO order_details (order_id, product_id, unit_price_cents, \
                                        quantity, discount_bps) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(line.order_id)
        .bind(line.product_id)
        .bind(line.unit_price_cents)
        .bind(line.quantity)
        .bind(line.discount_bps)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Returns all line items of an order, in insertion order.
    pub async fn lines(&self, order_id: i64) -> DbResult<Vec<OrderLine>> {
        let mut conn = self.conn.lock().await;

        let lines = sqlx::query_as::<_, OrderLine>(
            "SELECT order_id, product_id, unit_price_cents, quantity, discount_bps \
             FROM order_details WHERE order_id = ? ORDER BY rowid",
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(lines)
    }

    /// Returns all orders placed by one customer, newest first.
    pub async fn list_for_customer(&self, customer_id: &str) -> DbResult<Vec<Order>> {
        let mut conn = self.conn.lock().await;

        let orders = sqlx::query_as::<_, Order>(
            "SELECT order_id, customer_id, employee_id, order_date, required_date, \
                    ship_via, freight_cents, ship_name, ship_address, ship_city, \
                    ship_region, ship_postal_code, ship_country \
             FROM orders WHERE customer_id = ? ORDER BY order_date DESC, order_id DESC",
        )
        .bind(customer_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(orders)
    }
}

#[async_trait]
impl EntityStore for OrderStore {
    type Entity = Order;
    type Key = i64;

    async fn get_by_id(&self, id: &i64) -> DbResult<Option<Order>> {
        let mut conn = self.conn.lock().await;

        let order = sqlx::query_as::<_, Order>(
            "SELECT order_id, customer_id, employee_id, order_date, required_date, \
                    ship_via, freight_cents, ship_name, ship_address, ship_city, \
                    ship_region, ship_postal_code, ship_country \
             FROM orders WHERE order_id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(order)
    }

    async fn list(&self) -> DbResult<Vec<Order>> {
        let mut conn = self.conn.lock().await;

        let orders = sqlx::query_as::<_, Order>(
            "SELECT order_id, customer_id, employee_id, order_date, required_date, \
                    ship_via, freight_cents, ship_name, ship_address, ship_city, \
                    ship_region, ship_postal_code, ship_country \
             FROM orders ORDER BY order_id",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(orders)
    }

    async fn insert(&self, order: &mut Order) -> DbResult<()> {
        debug!(customer_id = %order.customer_id, "Inserting order header");

        let mut conn = self.conn.lock().await;

        let result = sqlx::query(
            "INSERT INTO orders (customer_id, employee_id, order_date, required_date, \
                                 ship_via, freight_cents, ship_name, ship_address, \
                                 ship_city, ship_region, ship_postal_code, ship_country) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&order.customer_id)
        .bind(order.employee_id)
        .bind(order.order_date)
        .bind(order.required_date)
        .bind(order.ship_via)
        .bind(order.freight_cents)
        .bind(&order.ship_name)
        .bind(&order.ship_address)
        .bind(&order.ship_city)
        .bind(&order.ship_region)
        .bind(&order.ship_postal_code)
        .bind(&order.ship_country)
        .execute(&mut *conn)
        .await?;

        order.order_id = result.last_insert_rowid();

        Ok(())
    }

    async fn update(&self, order: &Order) -> DbResult<()> {
        debug!(order_id = order.order_id, "Updating order header");

        let mut conn = self.conn.lock().await;

        let result = sqlx::query(
            "UPDATE orders SET customer_id = ?, employee_id = ?, order_date = ?, \
                               required_date = ?, ship_via = ?, freight_cents = ?, \
                               ship_name = ?, ship_address = ?, ship_city = ?, \
                               ship_region = ?, ship_postal_code = ?, ship_country = ? \
             WHERE order_id = ?",
        )
        .bind(&order.customer_id)
        .bind(order.employee_id)
        .bind(order.order_date)
        .bind(order.required_date)
        .bind(order.ship_via)
        .bind(order.freight_cents)
        .bind(&order.ship_name)
        .bind(&order.ship_address)
        .bind(&order.ship_city)
        .bind(&order.ship_region)
        .bind(&order.ship_postal_code)
        .bind(&order.ship_country)
        .bind(order.order_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order.order_id));
        }

        Ok(())
    }

    async fn delete(&self, id: &i64) -> DbResult<()> {
        debug!(order_id = id, "Deleting order");

        let mut conn = self.conn.lock().await;

        // Line items go with the header via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM orders WHERE order_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    async fn exists(&self, id: &i64) -> DbResult<bool> {
        let mut conn = self.conn.lock().await;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE order_id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(count > 0)
    }
}
