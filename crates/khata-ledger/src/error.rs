//! # Ledger Error Types
//!
//! The errors callers of [`crate::LedgerService`] see.
//!
//! ## Failure Semantics
//! Any error raised inside a sale/purchase transaction aborts the whole
//! operation: no stock decrement, header, or line row from that request is
//! committed. Nothing is retried internally, and notification failures are
//! swallowed - they never surface here.

use thiserror::Error;

use khata_core::ValidationError;
use khata_db::DbError;

/// Errors surfaced by the transaction ledger service.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A sale line named a product that was never registered. Products
    /// enter the inventory via the purchase path or direct creation.
    #[error("Product '{0}' does not exist in inventory. Please add it first.")]
    ProductNotFound(String),

    /// A sale line asked for more than is on the shelf.
    #[error("Not enough stock for product '{product}' (Available: {available}, Needed: {requested})")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Request rejected before any mutation ran.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Persistence failure.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Convenience alias for ledger results.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LedgerError::ProductNotFound("Milk".into()).to_string(),
            "Product 'Milk' does not exist in inventory. Please add it first."
        );
        assert_eq!(
            LedgerError::InsufficientStock {
                product: "Milk".into(),
                available: 3,
                requested: 5,
            }
            .to_string(),
            "Not enough stock for product 'Milk' (Available: 3, Needed: 5)"
        );
    }
}
