//! # Validation Module
//!
//! Business rule validation for ledger requests.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: caller             type validation (deserialization)
//! Layer 2: THIS MODULE        business rule validation, before any mutation
//! Layer 3: SQLite             NOT NULL / UNIQUE / foreign key constraints
//! ```
//!
//! A request that fails here never reaches the database.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{NewProduct, ProductUpdate, PurchaseRequest, SaleRequest};

/// Validates a sale request.
///
/// ## Rules
/// - customer_name must not be blank
/// - unpaid bills must carry a payment due date
///
/// Lines with quantity <= 0 are not rejected here; the ledger skips them
/// silently, per the transaction contract.
pub fn validate_sale_request(request: &SaleRequest) -> ValidationResult<()> {
    if request.customer_name.trim().is_empty() {
        return Err(ValidationError::required("customer_name"));
    }
    if !request.bill_paid && request.payment_due_date.is_none() {
        return Err(ValidationError::DueDateMissing);
    }
    Ok(())
}

/// Validates a purchase request.
///
/// ## Rules
/// - vendor_name must not be blank
/// - unpaid bills must carry a payment due date
/// - line quantities and prices must not be negative (a zero-quantity
///   restock is accepted and leaves the weighted-average price unchanged)
pub fn validate_purchase_request(request: &PurchaseRequest) -> ValidationResult<()> {
    if request.vendor_name.trim().is_empty() {
        return Err(ValidationError::required("vendor_name"));
    }
    if !request.bill_paid && request.payment_due_date.is_none() {
        return Err(ValidationError::DueDateMissing);
    }
    for line in &request.lines {
        if line.product_name.trim().is_empty() {
            return Err(ValidationError::required("product_name"));
        }
        if line.quantity < 0 {
            return Err(ValidationError::Negative {
                field: "quantity".into(),
            });
        }
        if line.price_purchase.is_negative() || line.price_sale.is_negative() {
            return Err(ValidationError::Negative {
                field: "price".into(),
            });
        }
    }
    Ok(())
}

/// Validates a direct product registration.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    if product.product_name.trim().is_empty() {
        return Err(ValidationError::required("product_name"));
    }
    if product.quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".into(),
        });
    }
    if product.price_purchase.is_negative() || product.price_sale.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".into(),
        });
    }
    Ok(())
}

/// Validates a partial product update before any field is applied.
pub fn validate_product_update(update: &ProductUpdate) -> ValidationResult<()> {
    if update.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }
    if let Some(name) = &update.product_name {
        if name.trim().is_empty() {
            return Err(ValidationError::required("product_name"));
        }
    }
    if let Some(quantity) = update.quantity {
        if quantity < 0 {
            return Err(ValidationError::Negative {
                field: "quantity".into(),
            });
        }
    }
    if update.price_purchase.is_some_and(|p| p.is_negative())
        || update.price_sale.is_some_and(|p| p.is_negative())
    {
        return Err(ValidationError::Negative {
            field: "price".into(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{PurchaseLine, SaleLine};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sale_request(bill_paid: bool, due: Option<&str>) -> SaleRequest {
        SaleRequest {
            customer_name: "Asif".into(),
            phone_no: None,
            transaction_date: date("2026-08-29"),
            bill_paid,
            payment_due_date: due.map(date),
            lines: vec![SaleLine {
                product_name: "Milk".into(),
                quantity: 1,
                rate: Money::from_paisa(5000),
            }],
        }
    }

    #[test]
    fn test_unpaid_sale_requires_due_date() {
        assert_eq!(
            validate_sale_request(&sale_request(false, None)),
            Err(ValidationError::DueDateMissing)
        );
        assert!(validate_sale_request(&sale_request(false, Some("2026-09-15"))).is_ok());
        assert!(validate_sale_request(&sale_request(true, None)).is_ok());
    }

    #[test]
    fn test_blank_customer_name_rejected() {
        let mut request = sale_request(true, None);
        request.customer_name = "  ".into();
        assert_eq!(
            validate_sale_request(&request),
            Err(ValidationError::required("customer_name"))
        );
    }

    #[test]
    fn test_purchase_rejects_negative_quantity() {
        let request = PurchaseRequest {
            vendor_name: "Mehta Traders".into(),
            phone_no: None,
            transaction_date: date("2026-08-29"),
            bill_paid: true,
            payment_due_date: None,
            lines: vec![PurchaseLine {
                product_name: "Sugar".into(),
                price_purchase: Money::from_paisa(9000),
                price_sale: Money::from_paisa(11000),
                quantity: -5,
            }],
        };
        assert_eq!(
            validate_purchase_request(&request),
            Err(ValidationError::Negative {
                field: "quantity".into()
            })
        );
    }

    #[test]
    fn test_zero_quantity_restock_is_accepted() {
        let request = PurchaseRequest {
            vendor_name: "Mehta Traders".into(),
            phone_no: None,
            transaction_date: date("2026-08-29"),
            bill_paid: true,
            payment_due_date: None,
            lines: vec![PurchaseLine {
                product_name: "Sugar".into(),
                price_purchase: Money::from_paisa(9000),
                price_sale: Money::from_paisa(11000),
                quantity: 0,
            }],
        };
        assert!(validate_purchase_request(&request).is_ok());
    }

    #[test]
    fn test_empty_update_rejected() {
        assert_eq!(
            validate_product_update(&ProductUpdate::default()),
            Err(ValidationError::EmptyUpdate)
        );
    }

    #[test]
    fn test_update_rejects_negative_price() {
        let update = ProductUpdate {
            price_sale: Some(Money::from_paisa(-100)),
            ..Default::default()
        };
        assert_eq!(
            validate_product_update(&update),
            Err(ValidationError::Negative {
                field: "price".into()
            })
        );
    }
}
