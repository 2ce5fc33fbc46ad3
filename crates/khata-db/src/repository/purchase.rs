//! # Purchase Repository
//!
//! Purchase headers, product links, and udhar (credit due) rows. Mirrors
//! the sale repository minus profit/loss, which only sales produce.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use khata_core::{Money, PurchaseRecord, UdharPurchase};

/// Repository for purchase database operations.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    /// Creates a new PurchaseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Lists all purchase headers.
    pub async fn list(&self) -> DbResult<Vec<PurchaseRecord>> {
        let purchases = sqlx::query_as::<_, PurchaseRecord>(
            r#"
            SELECT purch_id, vend_id, transaction_date, total_amount_paisa, total_quantity
            FROM purchase_data
            ORDER BY purch_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(purchases)
    }

    /// Gets a purchase header by id.
    pub async fn get(&self, purch_id: i64) -> DbResult<Option<PurchaseRecord>> {
        let purchase = sqlx::query_as::<_, PurchaseRecord>(
            r#"
            SELECT purch_id, vend_id, transaction_date, total_amount_paisa, total_quantity
            FROM purchase_data
            WHERE purch_id = ?1
            "#,
        )
        .bind(purch_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(purchase)
    }

    /// The udhar row for a purchase, present only when the bill was unpaid.
    pub async fn get_udhar(&self, purch_id: i64) -> DbResult<Option<UdharPurchase>> {
        let udhar = sqlx::query_as::<_, UdharPurchase>(
            r#"
            SELECT udhar_id, purch_id, date_of_entry, date_of_payment
            FROM udhar_purchase
            WHERE purch_id = ?1
            "#,
        )
        .bind(purch_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(udhar)
    }

    /// Product ids linked to a purchase.
    pub async fn linked_product_ids(&self, purch_id: i64) -> DbResult<Vec<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT prod_id FROM purchase_products
            WHERE purch_id = ?1
            ORDER BY link_id
            "#,
        )
        .bind(purch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    // -------------------------------------------------------------------------
    // Transaction-scoped writes
    // -------------------------------------------------------------------------

    /// Inserts a header with zero totals and returns its id.
    pub async fn insert_header_tx(
        &self,
        conn: &mut SqliteConnection,
        vend_id: i64,
        transaction_date: NaiveDate,
    ) -> DbResult<i64> {
        debug!(vend_id, %transaction_date, "Inserting purchase header");

        let result = sqlx::query(
            r#"
            INSERT INTO purchase_data (vend_id, transaction_date, total_amount_paisa, total_quantity)
            VALUES (?1, ?2, 0, 0)
            "#,
        )
        .bind(vend_id)
        .bind(transaction_date)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Links a product to the purchase header.
    pub async fn link_product_tx(
        &self,
        conn: &mut SqliteConnection,
        purch_id: i64,
        prod_id: i64,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO purchase_products (purch_id, prod_id)
            VALUES (?1, ?2)
            "#,
        )
        .bind(purch_id)
        .bind(prod_id)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Writes the accumulated totals onto the header (write-once).
    pub async fn set_totals_tx(
        &self,
        conn: &mut SqliteConnection,
        purch_id: i64,
        total_amount: Money,
        total_quantity: i64,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE purchase_data SET
                total_amount_paisa = ?2,
                total_quantity = ?3
            WHERE purch_id = ?1
            "#,
        )
        .bind(purch_id)
        .bind(total_amount.paisa())
        .bind(total_quantity)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Creates the credit-due row for an unpaid purchase.
    pub async fn insert_udhar_tx(
        &self,
        conn: &mut SqliteConnection,
        purch_id: i64,
        date_of_entry: NaiveDate,
        date_of_payment: NaiveDate,
    ) -> DbResult<()> {
        debug!(purch_id, due = %date_of_payment, "Recording purchase udhar");

        sqlx::query(
            r#"
            INSERT INTO udhar_purchase (purch_id, date_of_entry, date_of_payment)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(purch_id)
        .bind(date_of_entry)
        .bind(date_of_payment)
        .execute(conn)
        .await?;

        Ok(())
    }
}
