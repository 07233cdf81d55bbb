//! # Domain Types
//!
//! Entities of the Northwind trading schema. Field layout mirrors the
//! database columns one-to-one so the `FromRow` derive (behind the `sqlx`
//! feature) maps rows without glue code.
//!
//! Monetary fields are raw integer cents (`*_cents`); arithmetic goes
//! through [`crate::money::Money`]. Nullable price and stock columns are
//! `Option` here and treated as zero by the order workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A customer with shipping profile fields.
///
/// Read-only input to the order workflow: the shipping snapshot on a new
/// order defaults to these fields unless the caller overrides them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Opaque string key, e.g. `"ALFKI"`.
    pub customer_id: String,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Store-assigned on insert; 0 until persisted.
    pub category_id: i64,
    pub category_name: String,
    pub description: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A product with live inventory state.
///
/// The order workflow holds a transient, transaction-scoped working copy:
/// it decrements `units_in_stock` in memory per line and persists the
/// mutated copy through the product store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned on insert; 0 until persisted.
    pub product_id: i64,
    pub product_name: String,
    pub category_id: Option<i64>,
    /// Unit price in cents; `None` is treated as zero.
    pub unit_price_cents: Option<i64>,
    /// Stock on hand; nullable signed count, `None` is treated as zero.
    pub units_in_stock: Option<i64>,
    /// Discontinued products cannot appear on new orders.
    pub discontinued: bool,
}

impl Product {
    /// Current unit price, with a missing price treated as zero.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents.unwrap_or(0))
    }

    /// Stock on hand, with a missing count treated as zero.
    #[inline]
    pub fn stock_on_hand(&self) -> i64 {
        self.units_in_stock.unwrap_or(0)
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order header. Aggregate root owning its [`OrderLine`]s.
///
/// `order_id` is assigned by the store on insert and is not known before
/// persistence. The `ship_*` fields are a snapshot copied from the customer
/// at order time (caller-overridable), so later customer edits never
/// rewrite shipped paperwork.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub order_id: i64,
    pub customer_id: String,
    pub employee_id: Option<i64>,
    pub order_date: DateTime<Utc>,
    pub required_date: Option<DateTime<Utc>>,
    /// Shipper reference.
    pub ship_via: Option<i64>,
    pub freight_cents: i64,
    pub ship_name: Option<String>,
    pub ship_address: Option<String>,
    pub ship_city: Option<String>,
    pub ship_region: Option<String>,
    pub ship_postal_code: Option<String>,
    pub ship_country: Option<String>,
}

impl Order {
    #[inline]
    pub fn freight(&self) -> Money {
        Money::from_cents(self.freight_cents)
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// One line of an order. Belongs to exactly one order; lines cannot outlive
/// or be shared across orders.
///
/// `unit_price_cents` is captured at order time and never follows later
/// price changes on the product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub order_id: i64,
    pub product_id: i64,
    pub unit_price_cents: i64,
    pub quantity: i64,
    /// Discount fraction in basis points (1000 = 10%).
    pub discount_bps: i64,
}

impl OrderLine {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
