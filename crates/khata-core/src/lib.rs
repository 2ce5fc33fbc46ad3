//! # khata-core: Pure Business Logic for the Khata Ledger
//!
//! This crate is the heart of the khata system. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! caller (API / CLI)
//!      │
//!      ▼
//! khata-ledger ── Transaction Ledger Service (orchestration)
//!      │
//!      ▼
//! khata-core  ── THIS CRATE: money, costing, receipts, validation
//!      │
//!      ▼
//! khata-db    ── SQLite queries, migrations, repositories
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Vendor, SaleRecord, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`costing`] - Weighted-average costing and profit/loss math
//! - [`receipt`] - Text-message bill formatting
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in paisa (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example
//!
//! ```rust
//! use khata_core::money::Money;
//! use khata_core::costing::weighted_average_cost;
//!
//! // 10 units bought at 30.00, restocked with 5 units at 36.00
//! let old = Money::from_paisa(3000);
//! let incoming = Money::from_paisa(3600);
//! let blended = weighted_average_cost(old, 10, incoming, 5);
//!
//! // (3000*10 + 3600*5) / 15 = 3200 paisa = 32.00
//! assert_eq!(blended.paisa(), 3200);
//! ```

pub mod costing;
pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// Re-exports so users can write `khata_core::Money` etc.
pub use error::ValidationError;
pub use money::Money;
pub use types::*;
