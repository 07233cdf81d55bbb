//! # Customer Store
//!
//! Database operations for customers. Customer keys are caller-assigned
//! opaque strings (`"ALFKI"`), so `insert` never generates an id.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::{EntityStore, SharedConnection};
use northwind_core::Customer;

/// Store for customer rows, bound to one unit of work's connection.
pub struct CustomerStore {
    conn: SharedConnection,
}

impl CustomerStore {
    pub(crate) fn new(conn: SharedConnection) -> Self {
        CustomerStore { conn }
    }
}

#[async_trait]
impl EntityStore for CustomerStore {
    type Entity = Customer;
    type Key = str;

    async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let mut conn = self.conn.lock().await;

        let customer = sqlx::query_as::<_, Customer>(
            "SELECT customer_id, company_name, contact_name, address, city, region, \
                    postal_code, country \
             FROM customers WHERE customer_id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(customer)
    }

    async fn list(&self) -> DbResult<Vec<Customer>> {
        let mut conn = self.conn.lock().await;

        let customers = sqlx::query_as::<_, Customer>(
            "SELECT customer_id, company_name, contact_name, address, city, region, \
                    postal_code, country \
             FROM customers ORDER BY customer_id",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(customers)
    }

    async fn insert(&self, customer: &mut Customer) -> DbResult<()> {
        debug!(customer_id = %customer.customer_id, "Inserting customer");

        let mut conn = self.conn.lock().await;

        sqlx::query(
            "INSERT INTO customers (customer_id, company_name, contact_name, address, city, \
                                    region, postal_code, country) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&customer.customer_id)
        .bind(&customer.company_name)
        .bind(&customer.contact_name)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.region)
        .bind(&customer.postal_code)
        .bind(&customer.country)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(customer_id = %customer.customer_id, "Updating customer");

        let mut conn = self.conn.lock().await;

        let result = sqlx::query(
            "UPDATE customers SET company_name = ?, contact_name = ?, address = ?, city = ?, \
                                  region = ?, postal_code = ?, country = ? \
             WHERE customer_id = ?",
        )
        .bind(&customer.company_name)
        .bind(&customer.contact_name)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.region)
        .bind(&customer.postal_code)
        .bind(&customer.country)
        .bind(&customer.customer_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.customer_id));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(customer_id = %id, "Deleting customer");

        let mut conn = self.conn.lock().await;

        let result = sqlx::query("DELETE FROM customers WHERE customer_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    async fn exists(&self, id: &str) -> DbResult<bool> {
        let mut conn = self.conn.lock().await;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE customer_id = ?")
                .bind(id)
                .fetch_one(&mut *conn)
                .await?;

        Ok(count > 0)
    }
}
