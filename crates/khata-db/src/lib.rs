//! # khata-db: Database Layer for the Khata Ledger
//!
//! SQLite persistence for the khata system, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! khata-ledger (Transaction Ledger Service)
//!      │
//!      ▼
//! khata-db (THIS CRATE)
//!   ├── pool.rs        Database handle, DbConfig, SqlitePool
//!   ├── migrations.rs  embedded schema migrations
//!   ├── error.rs       DbError
//!   └── repository/    product, party, sale, purchase repositories
//!      │
//!      ▼
//! SQLite database file (or :memory: in tests)
//! ```
//!
//! ## Transactions
//!
//! Standalone administrative operations run against the pool directly.
//! Multi-step ledger operations (record sale / record purchase) open a
//! transaction via [`Database::begin`] and pass the connection to the
//! `*_tx` repository methods, so a failing line rolls back everything.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use khata_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("khata.db")).await?;
//! let products = db.products().list().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::party::PartyRepository;
pub use repository::product::ProductRepository;
pub use repository::purchase::PurchaseRepository;
pub use repository::sale::SaleRepository;
