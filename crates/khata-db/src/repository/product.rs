//! # Product Repository
//!
//! Database operations for the inventory.
//!
//! ## Key Operations
//! - administrative CRUD (pool-backed)
//! - transactional stock mutation for the sale/purchase paths (`*_tx`)
//!
//! Stock changes always go through `decrement_stock_tx` / `apply_restock_tx`
//! on the transaction connection so an aborted sale never leaks a decrement.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use khata_core::{Money, NewProduct, Product};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Pool-backed administrative operations
    // -------------------------------------------------------------------------

    /// Lists all products, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, product_name, price_purchase_paisa, price_sale_paisa, quantity
            FROM products
            ORDER BY product_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by its id.
    pub async fn get(&self, product_id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, product_name, price_purchase_paisa, price_sale_paisa, quantity
            FROM products
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its (unique) name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, product_name, price_purchase_paisa, price_sale_paisa, quantity
            FROM products
            WHERE product_name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns it with its generated id.
    ///
    /// Returns `DbError::UniqueViolation` when the name already exists.
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        debug!(name = %new.product_name, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (product_name, price_purchase_paisa, price_sale_paisa, quantity)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&new.product_name)
        .bind(new.price_purchase.paisa())
        .bind(new.price_sale.paisa())
        .bind(new.quantity)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            product_id: result.last_insert_rowid(),
            product_name: new.product_name.clone(),
            price_purchase_paisa: new.price_purchase.paisa(),
            price_sale_paisa: new.price_sale.paisa(),
            quantity: new.quantity,
        })
    }

    /// Writes a product back in full (the merge of a partial update happens
    /// in the service layer).
    ///
    /// Returns `DbError::NotFound` when the id doesn't exist.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.product_id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                product_name = ?2,
                price_purchase_paisa = ?3,
                price_sale_paisa = ?4,
                quantity = ?5
            WHERE product_id = ?1
            "#,
        )
        .bind(product.product_id)
        .bind(&product.product_name)
        .bind(product.price_purchase_paisa)
        .bind(product.price_sale_paisa)
        .bind(product.quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", product.product_id));
        }

        Ok(())
    }

    /// Deletes a product by id and returns the deleted row.
    ///
    /// Returns `Ok(None)` when the id doesn't exist - a missing row is not
    /// an error on this path.
    pub async fn delete(&self, product_id: i64) -> DbResult<Option<Product>> {
        let Some(product) = self.get(product_id).await? else {
            return Ok(None);
        };

        debug!(id = product_id, name = %product.product_name, "Deleting product");

        sqlx::query("DELETE FROM products WHERE product_id = ?1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(Some(product))
    }

    /// Counts products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Transaction-scoped operations (sale / purchase paths)
    // -------------------------------------------------------------------------

    /// Gets a product by name on the transaction connection.
    pub async fn get_by_name_tx(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
    ) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, product_name, price_purchase_paisa, price_sale_paisa, quantity
            FROM products
            WHERE product_name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(conn)
        .await?;

        Ok(product)
    }

    /// Creates a product within a purchase transaction (first stock of a
    /// previously unknown product).
    pub async fn insert_tx(
        &self,
        conn: &mut SqliteConnection,
        new: &NewProduct,
    ) -> DbResult<Product> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (product_name, price_purchase_paisa, price_sale_paisa, quantity)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&new.product_name)
        .bind(new.price_purchase.paisa())
        .bind(new.price_sale.paisa())
        .bind(new.quantity)
        .execute(conn)
        .await?;

        Ok(Product {
            product_id: result.last_insert_rowid(),
            product_name: new.product_name.clone(),
            price_purchase_paisa: new.price_purchase.paisa(),
            price_sale_paisa: new.price_sale.paisa(),
            quantity: new.quantity,
        })
    }

    /// Decrements on-hand stock for a sale line.
    ///
    /// The stock check happens in the service before this call; the delta
    /// form keeps the SQL itself race-free under SQLite's serialization.
    pub async fn decrement_stock_tx(
        &self,
        conn: &mut SqliteConnection,
        product_id: i64,
        quantity: i64,
    ) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity - ?2
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", product_id));
        }

        Ok(())
    }

    /// Applies a restock: new weighted-average purchase price, overwritten
    /// sale price, summed quantity.
    pub async fn apply_restock_tx(
        &self,
        conn: &mut SqliteConnection,
        product_id: i64,
        price_purchase: Money,
        price_sale: Money,
        quantity: i64,
    ) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                price_purchase_paisa = ?2,
                price_sale_paisa = ?3,
                quantity = ?4
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .bind(price_purchase.paisa())
        .bind(price_sale.paisa())
        .bind(quantity)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", product_id));
        }

        Ok(())
    }
}
