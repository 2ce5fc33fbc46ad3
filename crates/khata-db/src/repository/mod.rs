//! # Repository Module
//!
//! Database repository implementations for the khata ledger.
//!
//! ## Repository Pattern
//! ```text
//! LedgerService
//!      │  db.products().get_by_name("Milk")
//!      ▼
//! ProductRepository          SQL isolated in one place,
//!      │                     swappable storage, easy to test
//!      ▼
//! SQLite
//! ```
//!
//! ## Two Kinds of Methods
//! - pool-backed methods (`list`, `get`, ...) for standalone admin operations
//! - `*_tx` methods taking `&mut SqliteConnection`, called inside the single
//!   transaction a sale/purchase runs in
//!
//! ## Available Repositories
//! - [`product::ProductRepository`] - inventory CRUD and stock mutation
//! - [`party::PartyRepository`] - customer/vendor resolve-or-create
//! - [`sale::SaleRepository`] - sale headers, links, profit/loss, udhar
//! - [`purchase::PurchaseRepository`] - purchase headers, links, udhar

pub mod party;
pub mod product;
pub mod purchase;
pub mod sale;
