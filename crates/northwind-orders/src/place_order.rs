//! # Order Placement
//!
//! The transactional order-placement workflow.
//!
//! ## Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. VALIDATE (pure)      item count, quantities, discounts, ids         │
//! │  2. READ (no txn)        customer, distinct products,                   │
//! │                          discontinued + stock checks                    │
//! │  3. TRANSACT             begin ── header ── flush ── per item:          │
//! │                          line (frozen price) + stock decrement          │
//! │                          ── commit                                      │
//! │     any failure here ──► rollback, then the original error              │
//! │  4. RECEIPT              order id, total, item count, message           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Race
//! Stock is checked in phase 2, before the write transaction opens. Two
//! concurrent placements can both pass the check against the same stock
//! level and drive `units_in_stock` negative. Callers that need hard
//! reservations serialize placements themselves.

use std::collections::HashMap;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use northwind_core::{validation, Customer, Discount, Money, Order, OrderLine, Product};
use northwind_db::{Database, EntityStore, UnitOfWork};

use crate::error::{OrderError, OrderResult};

// =============================================================================
// Request / Receipt
// =============================================================================

/// One requested order line.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i64,
    /// Discount in basis points (1000 = 10% off). Defaults to none.
    #[serde(default)]
    pub discount_bps: u32,
}

/// A request to place an order.
///
/// Shipping fields are optional overrides; anything left out is snapshotted
/// from the customer record at placement time.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub customer_id: String,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub shipper_id: Option<i64>,
    #[serde(default)]
    pub required_date: Option<chrono::DateTime<Utc>>,
    /// Freight charge in cents. Defaults to 0.
    #[serde(default)]
    pub freight_cents: i64,
    #[serde(default)]
    pub ship_name: Option<String>,
    #[serde(default)]
    pub ship_address: Option<String>,
    #[serde(default)]
    pub ship_city: Option<String>,
    #[serde(default)]
    pub ship_region: Option<String>,
    #[serde(default)]
    pub ship_postal_code: Option<String>,
    #[serde(default)]
    pub ship_country: Option<String>,
    pub items: Vec<OrderItem>,
}

impl PlaceOrderRequest {
    /// A minimal request: customer plus items, everything else defaulted.
    pub fn new(customer_id: impl Into<String>, items: Vec<OrderItem>) -> Self {
        PlaceOrderRequest {
            customer_id: customer_id.into(),
            employee_id: None,
            shipper_id: None,
            required_date: None,
            freight_cents: 0,
            ship_name: None,
            ship_address: None,
            ship_city: None,
            ship_region: None,
            ship_postal_code: None,
            ship_country: None,
            items,
        }
    }
}

/// Confirmation returned for a successfully placed order. Never persisted.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: i64,
    /// Grand total of all lines after discounts, excluding freight.
    pub total: Money,
    pub item_count: usize,
    pub message: String,
}

// =============================================================================
// Workflow
// =============================================================================

/// Places an order: validates the request, checks the catalog, and writes
/// the order header, its lines, and the stock decrements as one
/// transaction.
///
/// Request-class failures ([`OrderError::is_request_error`]) happen before
/// any transaction opens and leave no trace. Failures inside the
/// transactional phase roll back before propagating. Cancellation is
/// honored between phases and between items.
pub async fn place_order(
    db: &Database,
    request: PlaceOrderRequest,
    cancel: CancellationToken,
) -> OrderResult<OrderReceipt> {
    if cancel.is_cancelled() {
        return Err(OrderError::Cancelled);
    }

    validate_request(&request)?;

    let uow = UnitOfWork::new(db).await?;

    let customer = uow
        .customers()
        .get_by_id(&request.customer_id)
        .await?
        .ok_or_else(|| OrderError::CustomerNotFound(request.customer_id.clone()))?;

    let mut products = load_and_check_products(&uow, &request).await?;

    debug!(
        customer_id = %request.customer_id,
        items = request.items.len(),
        "Order request validated, opening transaction"
    );

    if cancel.is_cancelled() {
        return Err(OrderError::Cancelled);
    }

    let tx = uow.transaction();
    tx.begin().await?;

    match write_order(&uow, &customer, &request, &mut products, &cancel).await {
        Ok((order_id, total)) => {
            tx.commit().await?;

            info!(
                order_id,
                total = %total,
                items = request.items.len(),
                "Order placed"
            );

            Ok(OrderReceipt {
                order_id,
                total,
                item_count: request.items.len(),
                message: format!(
                    "Order #{} created successfully with {} items",
                    order_id,
                    request.items.len()
                ),
            })
        }
        Err(e) => {
            // The rollback keeps the database clean; the original error is
            // what the caller needs to see even if rollback also fails.
            if let Err(rb_err) = tx.rollback().await {
                error!(error = %rb_err, "Rollback failed after aborted order placement");
            }
            Err(e)
        }
    }
}

/// Pure input-shape validation. Runs before any I/O.
fn validate_request(request: &PlaceOrderRequest) -> OrderResult<()> {
    validation::validate_customer_id(&request.customer_id)?;
    validation::validate_line_count(request.items.len())?;

    for item in &request.items {
        validation::validate_quantity(item.quantity)?;
        validation::validate_discount_bps(item.discount_bps)?;
    }

    Ok(())
}

/// Loads each distinct product once and checks it is orderable.
///
/// Returns working copies keyed by product id; the transactional phase
/// decrements stock on these and writes them back.
async fn load_and_check_products(
    uow: &UnitOfWork,
    request: &PlaceOrderRequest,
) -> OrderResult<HashMap<i64, Product>> {
    let mut products: HashMap<i64, Product> = HashMap::new();

    for item in &request.items {
        if !products.contains_key(&item.product_id) {
            let product = uow
                .products()
                .get_by_id(&item.product_id)
                .await?
                .ok_or(OrderError::ProductNotFound(item.product_id))?;
            products.insert(item.product_id, product);
        }

        let product = &products[&item.product_id];

        if product.discontinued {
            return Err(OrderError::Discontinued {
                product_id: product.product_id,
                name: product.product_name.clone(),
            });
        }

        // Missing stock counts as zero.
        let available = product.stock_on_hand();
        if item.quantity > available {
            return Err(OrderError::InsufficientStock {
                product_id: product.product_id,
                name: product.product_name.clone(),
                available,
                requested: item.quantity,
            });
        }
    }

    Ok(products)
}

/// The transactional phase: header, lines, stock decrements.
///
/// Runs with a transaction already open; the caller commits on `Ok` and
/// rolls back on `Err`.
async fn write_order(
    uow: &UnitOfWork,
    customer: &Customer,
    request: &PlaceOrderRequest,
    products: &mut HashMap<i64, Product>,
    cancel: &CancellationToken,
) -> OrderResult<(i64, Money)> {
    let mut order = build_header(customer, request);
    uow.orders().insert(&mut order).await?;

    // Checkpoint: the generated order id must be in hand before any line
    // references it.
    uow.transaction().flush().await?;

    debug!(order_id = order.order_id, "Order header inserted");

    let mut total = Money::zero();

    for item in &request.items {
        if cancel.is_cancelled() {
            return Err(OrderError::Cancelled);
        }

        let product = products
            .get_mut(&item.product_id)
            .ok_or(OrderError::ProductNotFound(item.product_id))?;

        // Price is frozen onto the line; later catalog changes don't touch
        // placed orders.
        let unit_price = product.unit_price();
        let discount = Discount::from_bps(item.discount_bps);

        uow.orders()
            .add_line(&OrderLine {
                order_id: order.order_id,
                product_id: item.product_id,
                unit_price_cents: unit_price.cents(),
                quantity: item.quantity,
                discount_bps: item.discount_bps as i64,
            })
            .await?;

        total += unit_price.line_total(item.quantity, discount);

        product.units_in_stock = Some(product.stock_on_hand() - item.quantity);
        uow.products().update(product).await?;
    }

    Ok((order.order_id, total))
}

/// Builds the order header: shipping fields are caller overrides where
/// given, otherwise a snapshot of the customer record.
fn build_header(customer: &Customer, request: &PlaceOrderRequest) -> Order {
    Order {
        order_id: 0,
        customer_id: customer.customer_id.clone(),
        employee_id: request.employee_id,
        order_date: Utc::now(),
        required_date: request.required_date,
        ship_via: request.shipper_id,
        freight_cents: request.freight_cents,
        ship_name: request
            .ship_name
            .clone()
            .or_else(|| Some(customer.company_name.clone())),
        ship_address: request.ship_address.clone().or_else(|| customer.address.clone()),
        ship_city: request.ship_city.clone().or_else(|| customer.city.clone()),
        ship_region: request.ship_region.clone().or_else(|| customer.region.clone()),
        ship_postal_code: request
            .ship_postal_code
            .clone()
            .or_else(|| customer.postal_code.clone()),
        ship_country: request.ship_country.clone().or_else(|| customer.country.clone()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
