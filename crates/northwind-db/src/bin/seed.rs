//! Seeds a database with a small sample catalog for local development.
//!
//! Usage:
//! ```text
//! seed [path/to/northwind.db]     (defaults to ./northwind.db)
//! ```
//!
//! Idempotent on an empty database only: re-running against a seeded
//! database fails on the duplicate customer keys and rolls back.

use tracing::info;
use tracing_subscriber::EnvFilter;

use northwind_core::{Category, Customer, Product};
use northwind_db::{Database, DbConfig, DbResult, EntityStore, UnitOfWork};

#[tokio::main]
async fn main() -> DbResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "northwind.db".to_string());

    info!(path = %path, "Seeding sample catalog");

    let db = Database::new(DbConfig::new(&path)).await?;
    let uow = UnitOfWork::new(&db).await?;

    uow.transaction().begin().await?;

    match seed(&uow).await {
        Ok(()) => {
            uow.transaction().commit().await?;
            info!("Seed complete");
            Ok(())
        }
        Err(e) => {
            uow.transaction().rollback().await?;
            Err(e)
        }
    }
}

async fn seed(uow: &UnitOfWork) -> DbResult<()> {
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
    let mut anatr = Customer {
        customer_id: "ANATR".to_string(),
        company_name: "Ana Trujillo Emparedados y helados".to_string(),
        contact_name: Some("Ana Trujillo".to_string()),
        address: Some("Avda. de la Constitución 2222".to_string()),
        city: Some("México D.F.".to_string()),
        region: None,
        postal_code: Some("05021".to_string()),
        country: Some("Mexico".to_string()),
    };
    uow.customers().insert(&mut alfki).await?;
    uow.customers().insert(&mut anatr).await?;

    let mut beverages = Category {
        category_id: 0,
        category_name: "Beverages".to_string(),
        description: Some("Soft drinks, coffees, teas, beers, and ales".to_string()),
    };
    let mut condiments = Category {
        category_id: 0,
        category_name: "Condiments".to_string(),
        description: Some("Sweet and savory sauces, relishes, spreads, and seasonings".to_string()),
    };
    uow.categories().insert(&mut beverages).await?;
    uow.categories().insert(&mut condiments).await?;

    let products = [
        ("Chai", beverages.category_id, 18_00, 39, false),
        ("Chang", beverages.category_id, 19_00, 17, false),
        ("Aniseed Syrup", condiments.category_id, 10_00, 13, false),
        (
            "Chef Anton's Cajun Seasoning",
            condiments.category_id,
            22_00,
            53,
            false,
        ),
        (
            "Chef Anton's Gumbo Mix",
            condiments.category_id,
            21_35,
            0,
            true,
        ),
    ];

    for (name, category_id, cents, stock, discontinued) in products {
        let mut product = Product {
            product_id: 0,
            product_name: name.to_string(),
            category_id: Some(category_id),
            unit_price_cents: Some(cents),
            units_in_stock: Some(stock),
            discontinued,
        };
        uow.products().insert(&mut product).await?;
        info!(
            product_id = product.product_id,
            name, "Seeded product"
        );
    }

    Ok(())
}
