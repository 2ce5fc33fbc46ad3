//! # Domain Types
//!
//! Core domain types for the khata ledger.
//!
//! ## Type Groups
//! ```text
//! Persisted entities      Product, Customer, Vendor, SaleRecord,
//!                         PurchaseRecord, ProfitLossEntry, UdharSale,
//!                         UdharPurchase
//! Transaction requests    SaleRequest/SaleLine, PurchaseRequest/PurchaseLine
//! Admin payloads          NewProduct, ProductUpdate
//! Confirmations           SaleConfirmation, PurchaseConfirmation
//! ```
//!
//! Persisted entities mirror the database schema (integer ids, paisa
//! columns) and derive `sqlx::FromRow` behind the `sqlx` feature; `Money`
//! accessors convert at the call site, matching the raw-column +
//! typed-accessor pattern used throughout the codebase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Products
// =============================================================================

/// A product on the shelf.
///
/// `quantity` is mutated in place by every sale (decrement) and purchase
/// (increment plus purchase-price reweighting). Invariant: never negative
/// after a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub product_id: i64,
    /// Business key; sale and purchase lines reference products by name.
    pub product_name: String,
    /// Weighted-average purchase cost in paisa.
    pub price_purchase_paisa: i64,
    /// Current sale price in paisa (overwritten by every restock).
    pub price_sale_paisa: i64,
    /// On-hand stock.
    pub quantity: i64,
}

impl Product {
    /// Returns the purchase cost as Money.
    #[inline]
    pub fn price_purchase(&self) -> Money {
        Money::from_paisa(self.price_purchase_paisa)
    }

    /// Returns the sale price as Money.
    #[inline]
    pub fn price_sale(&self) -> Money {
        Money::from_paisa(self.price_sale_paisa)
    }
}

/// Payload for registering a product directly (admin path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub product_name: String,
    pub price_purchase: Money,
    pub price_sale: Money,
    pub quantity: i64,
}

/// Partial update for a product. Only `Some` fields are applied; everything
/// else is left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub product_name: Option<String>,
    pub price_purchase: Option<Money>,
    pub price_sale: Option<Money>,
    pub quantity: Option<i64>,
}

impl ProductUpdate {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.price_purchase.is_none()
            && self.price_sale.is_none()
            && self.quantity.is_none()
    }
}

// =============================================================================
// Counterparties
// =============================================================================

/// A customer, deduplicated by phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub cust_id: i64,
    pub customer_name: String,
    pub phone_no: String,
}

/// A vendor, deduplicated by phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Vendor {
    pub vend_id: i64,
    pub vendor_name: String,
    pub phone_no: String,
}

// =============================================================================
// Transaction Headers
// =============================================================================

/// A sale header. Totals are written once, after the line loop has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleRecord {
    pub sales_id: i64,
    pub cust_id: i64,
    pub transaction_date: NaiveDate,
    pub total_amount_paisa: i64,
    pub total_quantity: i64,
}

impl SaleRecord {
    /// Returns the total amount as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_paisa(self.total_amount_paisa)
    }
}

/// A purchase header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PurchaseRecord {
    pub purch_id: i64,
    pub vend_id: i64,
    pub transaction_date: NaiveDate,
    pub total_amount_paisa: i64,
    pub total_quantity: i64,
}

impl PurchaseRecord {
    /// Returns the total amount as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_paisa(self.total_amount_paisa)
    }
}

// =============================================================================
// Derived Records
// =============================================================================

/// One profit/loss row per accepted sale line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProfitLossEntry {
    pub pl_id: i64,
    pub sales_id: i64,
    pub is_profit: bool,
    /// Absolute amount in paisa; `is_profit` carries the sign.
    pub amount_paisa: i64,
}

impl ProfitLossEntry {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_paisa(self.amount_paisa)
    }
}

/// Outstanding receivable for an unpaid sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UdharSale {
    pub udhar_id: i64,
    pub sales_id: i64,
    pub date_of_entry: NaiveDate,
    pub date_of_payment: NaiveDate,
}

/// Outstanding payable for an unpaid purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UdharPurchase {
    pub udhar_id: i64,
    pub purch_id: i64,
    pub date_of_entry: NaiveDate,
    pub date_of_payment: NaiveDate,
}

// =============================================================================
// Transaction Requests
// =============================================================================

/// One product entry within a sale request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_name: String,
    pub quantity: i64,
    /// Per-unit sale rate for this line.
    pub rate: Money,
}

/// A structured sale request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    pub customer_name: String,
    /// Receipt destination; falls back to the configured default when absent.
    pub phone_no: Option<String>,
    pub transaction_date: NaiveDate,
    pub bill_paid: bool,
    /// Required when `bill_paid` is false.
    pub payment_due_date: Option<NaiveDate>,
    pub lines: Vec<SaleLine>,
}

/// One product entry within a purchase request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub product_name: String,
    pub price_purchase: Money,
    pub price_sale: Money,
    pub quantity: i64,
}

/// A structured purchase request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub vendor_name: String,
    pub phone_no: Option<String>,
    pub transaction_date: NaiveDate,
    pub bill_paid: bool,
    pub payment_due_date: Option<NaiveDate>,
    pub lines: Vec<PurchaseLine>,
}

// =============================================================================
// Confirmations
// =============================================================================

/// Returned after a committed sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleConfirmation {
    pub sale_id: i64,
}

/// Returned after a committed purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseConfirmation {
    pub purchase_id: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_money_accessors() {
        let product = Product {
            product_id: 1,
            product_name: "Milk".into(),
            price_purchase_paisa: 3000,
            price_sale_paisa: 5000,
            quantity: 10,
        };
        assert_eq!(product.price_purchase().paisa(), 3000);
        assert_eq!(product.price_sale().paisa(), 5000);
    }

    #[test]
    fn test_product_update_is_empty() {
        assert!(ProductUpdate::default().is_empty());

        let update = ProductUpdate {
            quantity: Some(5),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_money_serializes_as_plain_integer() {
        // Wire payloads carry paisa as a bare number, not a nested object.
        let line = SaleLine {
            product_name: "Milk".into(),
            quantity: 3,
            rate: Money::from_paisa(5000),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["rate"], 5000);
    }
}
