//! Integration tests for the order placement workflow, end to end against
//! real file-backed SQLite databases.

use tokio_util::sync::CancellationToken;

use northwind_core::{Customer, Product};
use northwind_db::{Database, DbConfig, DbError, EntityStore, UnitOfWork};
use northwind_orders::{place_order, OrderError, OrderItem, PlaceOrderRequest};

async fn test_db() -> Database {
    let path = std::env::temp_dir().join(format!("northwind-orders-{}.db", uuid::Uuid::new_v4()));
    Database::new(DbConfig::new(path)).await.unwrap()
}

/// Seeds one customer and the given products, returning the product ids in
/// insertion order.
async fn seed(db: &Database, products: &[(&str, i64, i64, bool)]) -> Vec<i64> {
    let uow = UnitOfWork::new(db).await.unwrap();

    let mut alfki = Customer {
        customer_id: "ALFKI".to_string(),
        company_name: "Alfreds Futterkiste".to_string(),
        contact_name: Some("Maria Anders".to_string()),
        address: Some("Obere Str. 57".to_string()),
        city: Some("Berlin".to_string()),
        region: None,
        postal_code: Some("12209".to_string()),
        country: Some("Germany".to_string()),
    };
    uow.customers().insert(&mut alfki).await.unwrap();

    let mut ids = Vec::new();
    for &(name, cents, stock, discontinued) in products {
        let mut product = Product {
            product_id: 0,
            product_name: name.to_string(),
            category_id: None,
            unit_price_cents: Some(cents),
            units_in_stock: Some(stock),
            discontinued,
        };
        uow.products().insert(&mut product).await.unwrap();
        ids.push(product.product_id);
    }
    ids
}

async fn stock_of(db: &Database, product_id: i64) -> Option<i64> {
    let uow = UnitOfWork::new(db).await.unwrap();
    uow.products()
        .get_by_id(&product_id)
        .await
        .unwrap()
        .unwrap()
        .units_in_stock
}

async fn order_count(db: &Database) -> usize {
    let uow = UnitOfWork::new(db).await.unwrap();
    uow.orders().list().await.unwrap().len()
}

fn item(product_id: i64, quantity: i64, discount_bps: u32) -> OrderItem {
    OrderItem {
        product_id,
        quantity,
        discount_bps,
    }
}

// =============================================================================
// Success path
// =============================================================================

#[tokio::test]
async fn places_order_and_returns_receipt() {
    let db = test_db().await;
    let ids = seed(&db, &[("Chai", 18_00, 39, false), ("Chang", 19_00, 17, false)]).await;

    // 18.00×5 + 19.00×3×0.9 = 141.30
    let request = PlaceOrderRequest::new(
        "ALFKI",
        vec![item(ids[0], 5, 0), item(ids[1], 3, 1_000)],
    );

    let receipt = place_order(&db, request, CancellationToken::new())
        .await
        .unwrap();

    assert!(receipt.order_id > 0);
    assert_eq!(receipt.total.cents(), 14_130);
    assert_eq!(receipt.item_count, 2);
    assert_eq!(
        receipt.message,
        format!("Order #{} created successfully with 2 items", receipt.order_id)
    );

    // Stock decrements equal the ordered quantities.
    assert_eq!(stock_of(&db, ids[0]).await, Some(34));
    assert_eq!(stock_of(&db, ids[1]).await, Some(14));

    // Header and lines are durable, with the unit price frozen per line.
    let uow = UnitOfWork::new(&db).await.unwrap();
    let order = uow
        .orders()
        .get_by_id(&receipt.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.customer_id, "ALFKI");
    assert_eq!(order.ship_name.as_deref(), Some("Alfreds Futterkiste"));
    assert_eq!(order.ship_city.as_deref(), Some("Berlin"));

    let lines = uow.orders().lines(receipt.order_id).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].unit_price_cents, 18_00);
    assert_eq!(lines[0].quantity, 5);
    assert_eq!(lines[1].unit_price_cents, 19_00);
    assert_eq!(lines[1].discount_bps, 1_000);
}

#[tokio::test]
async fn line_price_stays_frozen_after_catalog_change() {
    let db = test_db().await;
    let ids = seed(&db, &[("Chai", 18_00, 39, false)]).await;

    let receipt = place_order(
        &db,
        PlaceOrderRequest::new("ALFKI", vec![item(ids[0], 2, 0)]),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    // Raise the catalog price after the order is placed.
    let uow = UnitOfWork::new(&db).await.unwrap();
    let mut chai = uow.products().get_by_id(&ids[0]).await.unwrap().unwrap();
    chai.unit_price_cents = Some(25_00);
    uow.products().update(&chai).await.unwrap();

    let lines = uow.orders().lines(receipt.order_id).await.unwrap();
    assert_eq!(lines[0].unit_price_cents, 18_00);
}

// =============================================================================
// Request rejections (no side effects)
// =============================================================================

#[tokio::test]
async fn insufficient_stock_rejects_whole_order() {
    let db = test_db().await;
    let ids = seed(&db, &[("Chai", 18_00, 10, false), ("Chang", 19_00, 2, false)]).await;

    let request = PlaceOrderRequest::new(
        "ALFKI",
        vec![item(ids[0], 5, 0), item(ids[1], 3, 0)],
    );

    let err = place_order(&db, request, CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        OrderError::InsufficientStock {
            product_id,
            available,
            requested,
            ..
        } => {
            assert_eq!(product_id, ids[1]);
            assert_eq!(available, 2);
            assert_eq!(requested, 3);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    // The passing line left no trace either.
    assert_eq!(stock_of(&db, ids[0]).await, Some(10));
    assert_eq!(stock_of(&db, ids[1]).await, Some(2));
    assert_eq!(order_count(&db).await, 0);
}

#[tokio::test]
async fn missing_stock_counts_as_zero() {
    let db = test_db().await;
    let ids = seed(&db, &[("Chai", 18_00, 0, false)]).await;

    // Null out the stock column entirely.
    let uow = UnitOfWork::new(&db).await.unwrap();
    let mut chai = uow.products().get_by_id(&ids[0]).await.unwrap().unwrap();
    chai.units_in_stock = None;
    uow.products().update(&chai).await.unwrap();

    let err = place_order(
        &db,
        PlaceOrderRequest::new("ALFKI", vec![item(ids[0], 1, 0)]),
        CancellationToken::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        OrderError::InsufficientStock { available: 0, requested: 1, .. }
    ));
}

#[tokio::test]
async fn discontinued_product_is_rejected() {
    let db = test_db().await;
    let ids = seed(&db, &[("Chef Anton's Gumbo Mix", 21_35, 40, true)]).await;

    let err = place_order(
        &db,
        PlaceOrderRequest::new("ALFKI", vec![item(ids[0], 1, 0)]),
        CancellationToken::new(),
    )
    .await
    .unwrap_err();

    match err {
        OrderError::Discontinued { product_id, name } => {
            assert_eq!(product_id, ids[0]);
            assert_eq!(name, "Chef Anton's Gumbo Mix");
        }
        other => panic!("expected Discontinued, got {other:?}"),
    }
    assert_eq!(order_count(&db).await, 0);
}

#[tokio::test]
async fn unknown_customer_and_product_are_rejected() {
    let db = test_db().await;
    let ids = seed(&db, &[("Chai", 18_00, 39, false)]).await;

    let err = place_order(
        &db,
        PlaceOrderRequest::new("NOONE", vec![item(ids[0], 1, 0)]),
        CancellationToken::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, OrderError::CustomerNotFound(id) if id == "NOONE"));

    let err = place_order(
        &db,
        PlaceOrderRequest::new("ALFKI", vec![item(9_999, 1, 0)]),
        CancellationToken::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, OrderError::ProductNotFound(9_999)));

    assert_eq!(order_count(&db).await, 0);
}

#[tokio::test]
async fn invalid_request_shape_leaves_state_untouched() {
    let db = test_db().await;
    let ids = seed(&db, &[("Chai", 18_00, 39, false)]).await;

    let err = place_order(
        &db,
        PlaceOrderRequest::new("ALFKI", vec![item(ids[0], 0, 0)]),
        CancellationToken::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));
    assert!(err.is_request_error());

    let err = place_order(
        &db,
        PlaceOrderRequest::new("ALFKI", vec![]),
        CancellationToken::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));

    assert_eq!(stock_of(&db, ids[0]).await, Some(39));
    assert_eq!(order_count(&db).await, 0);
}

// =============================================================================
// Rollback and cancellation
// =============================================================================

#[tokio::test]
async fn mid_transaction_failure_rolls_back_everything() {
    let db = test_db().await;
    let ids = seed(&db, &[("Chai", 18_00, 39, false)]).await;

    // Two lines for the same product pass the catalog checks but violate
    // the (order_id, product_id) primary key on the second line insert,
    // after the header and the first line are already written.
    let request = PlaceOrderRequest::new(
        "ALFKI",
        vec![item(ids[0], 2, 0), item(ids[0], 1, 0)],
    );

    let err = place_order(&db, request, CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        OrderError::Infrastructure(DbError::UniqueViolation { .. }) => {}
        other => panic!("expected unique violation, got {other:?}"),
    }

    // Header, first line, and the first stock decrement are all gone.
    assert_eq!(order_count(&db).await, 0);
    assert_eq!(stock_of(&db, ids[0]).await, Some(39));
}

#[tokio::test]
async fn pre_cancelled_token_aborts_before_any_work() {
    let db = test_db().await;
    let ids = seed(&db, &[("Chai", 18_00, 39, false)]).await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = place_order(
        &db,
        PlaceOrderRequest::new("ALFKI", vec![item(ids[0], 5, 0)]),
        cancel,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, OrderError::Cancelled));
    assert_eq!(stock_of(&db, ids[0]).await, Some(39));
    assert_eq!(order_count(&db).await, 0);
}
