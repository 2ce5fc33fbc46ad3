//! # Sale Repository
//!
//! Sale headers, product links, profit/loss rows, and udhar (credit due)
//! rows.
//!
//! ## Write Path
//! ```text
//! record_sale transaction
//!   insert_header_tx        header with zero totals (gets sales_id)
//!   [per accepted line]
//!     link_product_tx       sales_id <-> prod_id
//!     insert_profit_loss_tx sign + absolute amount
//!   set_totals_tx           write-once totals
//!   insert_udhar_tx         only when unpaid
//! ```
//!
//! Link rows intentionally carry no per-line price or quantity; individual
//! line prices cannot be reconstructed from persisted state afterwards.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use khata_core::costing::ProfitOutcome;
use khata_core::{Money, ProfitLossEntry, SaleRecord, UdharSale};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Lists all sale headers.
    pub async fn list(&self) -> DbResult<Vec<SaleRecord>> {
        let sales = sqlx::query_as::<_, SaleRecord>(
            r#"
            SELECT sales_id, cust_id, transaction_date, total_amount_paisa, total_quantity
            FROM sales_data
            ORDER BY sales_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Gets a sale header by id.
    pub async fn get(&self, sales_id: i64) -> DbResult<Option<SaleRecord>> {
        let sale = sqlx::query_as::<_, SaleRecord>(
            r#"
            SELECT sales_id, cust_id, transaction_date, total_amount_paisa, total_quantity
            FROM sales_data
            WHERE sales_id = ?1
            "#,
        )
        .bind(sales_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Profit/loss rows for a sale, in line order.
    pub async fn profit_entries(&self, sales_id: i64) -> DbResult<Vec<ProfitLossEntry>> {
        let entries = sqlx::query_as::<_, ProfitLossEntry>(
            r#"
            SELECT pl_id, sales_id, is_profit, amount_paisa
            FROM profit_loss
            WHERE sales_id = ?1
            ORDER BY pl_id
            "#,
        )
        .bind(sales_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// The udhar row for a sale, present only when the bill was unpaid.
    pub async fn get_udhar(&self, sales_id: i64) -> DbResult<Option<UdharSale>> {
        let udhar = sqlx::query_as::<_, UdharSale>(
            r#"
            SELECT udhar_id, sales_id, date_of_entry, date_of_payment
            FROM udhar_sales
            WHERE sales_id = ?1
            "#,
        )
        .bind(sales_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(udhar)
    }

    /// Product ids linked to a sale.
    pub async fn linked_product_ids(&self, sales_id: i64) -> DbResult<Vec<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT prod_id FROM sale_products
            WHERE sales_id = ?1
            ORDER BY link_id
            "#,
        )
        .bind(sales_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    // -------------------------------------------------------------------------
    // Transaction-scoped writes
    // -------------------------------------------------------------------------

    /// Inserts a header with zero totals and returns its id, so line rows
    /// have something to reference before totals are known.
    pub async fn insert_header_tx(
        &self,
        conn: &mut SqliteConnection,
        cust_id: i64,
        transaction_date: NaiveDate,
    ) -> DbResult<i64> {
        debug!(cust_id, %transaction_date, "Inserting sale header");

        let result = sqlx::query(
            r#"
            INSERT INTO sales_data (cust_id, transaction_date, total_amount_paisa, total_quantity)
            VALUES (?1, ?2, 0, 0)
            "#,
        )
        .bind(cust_id)
        .bind(transaction_date)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Links a product to the sale header.
    pub async fn link_product_tx(
        &self,
        conn: &mut SqliteConnection,
        sales_id: i64,
        prod_id: i64,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sale_products (sales_id, prod_id)
            VALUES (?1, ?2)
            "#,
        )
        .bind(sales_id)
        .bind(prod_id)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Records the profit/loss outcome of one accepted line.
    pub async fn insert_profit_loss_tx(
        &self,
        conn: &mut SqliteConnection,
        sales_id: i64,
        outcome: ProfitOutcome,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO profit_loss (sales_id, is_profit, amount_paisa)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(sales_id)
        .bind(outcome.is_profit)
        .bind(outcome.amount.paisa())
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Writes the accumulated totals onto the header (write-once).
    pub async fn set_totals_tx(
        &self,
        conn: &mut SqliteConnection,
        sales_id: i64,
        total_amount: Money,
        total_quantity: i64,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE sales_data SET
                total_amount_paisa = ?2,
                total_quantity = ?3
            WHERE sales_id = ?1
            "#,
        )
        .bind(sales_id)
        .bind(total_amount.paisa())
        .bind(total_quantity)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Creates the credit-due row for an unpaid sale.
    pub async fn insert_udhar_tx(
        &self,
        conn: &mut SqliteConnection,
        sales_id: i64,
        date_of_entry: NaiveDate,
        date_of_payment: NaiveDate,
    ) -> DbResult<()> {
        debug!(sales_id, due = %date_of_payment, "Recording sale udhar");

        sqlx::query(
            r#"
            INSERT INTO udhar_sales (sales_id, date_of_entry, date_of_payment)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(sales_id)
        .bind(date_of_entry)
        .bind(date_of_payment)
        .execute(conn)
        .await?;

        Ok(())
    }
}
