//! # Error Types
//!
//! Validation errors raised by khata-core.
//!
//! ## Error Hierarchy
//! ```text
//! khata-core   ValidationError  - input/business-rule validation failures
//! khata-db     DbError          - database operation failures
//! khata-ledger LedgerError      - what callers of the service see
//!
//! Flow: ValidationError -> LedgerError -> caller
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, never manual impls
//! 2. Context in the message (field name, offending value)
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

/// Input validation errors.
///
/// Raised before any mutation runs; a request that fails validation leaves
/// the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// An unpaid transaction was submitted without a payment due date.
    #[error("payment_due_date is required when bill_paid is false")]
    DueDateMissing,

    /// An empty partial-update payload.
    #[error("update payload contains no fields")]
    EmptyUpdate,
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

/// Convenience alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::required("customer_name").to_string(),
            "customer_name is required"
        );
        assert_eq!(
            ValidationError::DueDateMissing.to_string(),
            "payment_due_date is required when bill_paid is false"
        );
        assert_eq!(
            ValidationError::Negative {
                field: "quantity".into()
            }
            .to_string(),
            "quantity must not be negative"
        );
    }
}
