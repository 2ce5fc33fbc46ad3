//! # Seed Data Generator
//!
//! Populates the database with kirana-store products for development.
//!
//! ## Usage
//! ```bash
//! # Default database path (./khata.db)
//! cargo run -p khata-db --bin seed
//!
//! # Specify database path
//! cargo run -p khata-db --bin seed -- --db ./data/khata.db
//! ```

use std::env;

use khata_core::{Money, NewProduct};
use khata_db::{Database, DbConfig};
use tracing::info;

/// (name, purchase price paisa, sale price paisa, starting stock)
const PRODUCTS: &[(&str, i64, i64, i64)] = &[
    ("Milk 1L", 9000, 11000, 40),
    ("Bread", 4000, 5500, 25),
    ("Sugar 1kg", 8500, 10000, 60),
    ("Basmati Rice 5kg", 55000, 65000, 15),
    ("Atta 10kg", 48000, 56000, 20),
    ("Cooking Oil 1L", 28000, 32000, 30),
    ("Tea 250g", 14000, 17500, 35),
    ("Red Lentils 1kg", 18000, 21000, 25),
    ("Salt 800g", 2500, 4000, 50),
    ("Washing Soap", 3500, 5000, 45),
    ("Biscuits", 2000, 3000, 80),
    ("Ghee 1kg", 95000, 110000, 10),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let db_path = parse_db_path();
    info!(path = %db_path, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let products = db.products();

    let mut inserted = 0;
    for &(name, purchase, sale, stock) in PRODUCTS {
        if products.get_by_name(name).await?.is_some() {
            continue;
        }
        products
            .insert(&NewProduct {
                product_name: name.to_string(),
                price_purchase: Money::from_paisa(purchase),
                price_sale: Money::from_paisa(sale),
                quantity: stock,
            })
            .await?;
        inserted += 1;
    }

    let total = products.count().await?;
    info!(inserted, total, "Seed complete");

    db.close().await;
    Ok(())
}

fn parse_db_path() -> String {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
        .cloned()
        .unwrap_or_else(|| "./khata.db".to_string())
}
