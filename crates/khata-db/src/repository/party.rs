//! # Party Repository
//!
//! Customer and vendor persistence. Both are deduplicated by phone number:
//! resolve-or-create looks the phone up first and only inserts on a miss,
//! so repeated calls with the same phone always return the same row.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use khata_core::{Customer, Vendor};

/// Repository for counterparty (customer/vendor) operations.
#[derive(Debug, Clone)]
pub struct PartyRepository {
    pool: SqlitePool,
}

impl PartyRepository {
    /// Creates a new PartyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PartyRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    /// Resolves a customer by phone, creating one when absent.
    /// Idempotent on phone number; the name is only used on first creation.
    pub async fn get_or_create_customer_tx(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        phone: &str,
    ) -> DbResult<Customer> {
        let existing = sqlx::query_as::<_, Customer>(
            r#"
            SELECT cust_id, customer_name, phone_no
            FROM customers
            WHERE phone_no = ?1
            "#,
        )
        .bind(phone)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(customer) = existing {
            return Ok(customer);
        }

        debug!(name = %name, phone = %phone, "Creating customer");

        let result = sqlx::query(
            r#"
            INSERT INTO customers (customer_name, phone_no)
            VALUES (?1, ?2)
            "#,
        )
        .bind(name)
        .bind(phone)
        .execute(conn)
        .await?;

        Ok(Customer {
            cust_id: result.last_insert_rowid(),
            customer_name: name.to_string(),
            phone_no: phone.to_string(),
        })
    }

    // -------------------------------------------------------------------------
    // Vendors
    // -------------------------------------------------------------------------

    /// Resolves a vendor by phone, creating one when absent.
    pub async fn get_or_create_vendor_tx(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        phone: &str,
    ) -> DbResult<Vendor> {
        let existing = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT vend_id, vendor_name, phone_no
            FROM vendors
            WHERE phone_no = ?1
            "#,
        )
        .bind(phone)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(vendor) = existing {
            return Ok(vendor);
        }

        debug!(name = %name, phone = %phone, "Creating vendor");

        let result = sqlx::query(
            r#"
            INSERT INTO vendors (vendor_name, phone_no)
            VALUES (?1, ?2)
            "#,
        )
        .bind(name)
        .bind(phone)
        .execute(conn)
        .await?;

        Ok(Vendor {
            vend_id: result.last_insert_rowid(),
            vendor_name: name.to_string(),
            phone_no: phone.to_string(),
        })
    }

    /// Lists all vendors.
    pub async fn list_vendors(&self) -> DbResult<Vec<Vendor>> {
        let vendors = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT vend_id, vendor_name, phone_no
            FROM vendors
            ORDER BY vend_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vendors)
    }

    /// Gets a vendor by id.
    pub async fn get_vendor(&self, vend_id: i64) -> DbResult<Option<Vendor>> {
        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT vend_id, vendor_name, phone_no
            FROM vendors
            WHERE vend_id = ?1
            "#,
        )
        .bind(vend_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vendor)
    }
}
