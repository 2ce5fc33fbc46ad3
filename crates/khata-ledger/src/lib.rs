//! # khata-ledger: Transaction Ledger Service
//!
//! Inventory, sales, and purchase bookkeeping for a small retail shop:
//! recording stock, processing sales against stock with weighted-average
//! costing, tracking customer/vendor credit (udhar), and issuing
//! text-message bills.
//!
//! ## Data Flow
//! ```text
//! caller ── SaleRequest / PurchaseRequest
//!      │
//!      ▼
//! LedgerService
//!   1. validate request                         (khata-core)
//!   2. resolve-or-create counterparty ─┐
//!   3. stock check / mutation          │ one SQLite
//!   4. header + links + profit/loss    │ transaction
//!   5. totals + udhar row              │ (khata-db)
//!   6. commit ────────────────────────┘
//!   7. dispatch receipt (fire and forget, post-commit)
//!      │
//!      ▼
//! SaleConfirmation / PurchaseConfirmation
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use khata_ledger::{LedgerConfig, LedgerService, TracingNotifier};
//! use khata_db::{Database, DbConfig};
//! use std::sync::Arc;
//!
//! let db = Database::new(DbConfig::new("khata.db")).await?;
//! let service = LedgerService::new(db, LedgerConfig::default(), Arc::new(TracingNotifier));
//!
//! let confirmation = service.record_sale(request).await?;
//! println!("sale {}", confirmation.sale_id);
//! ```

pub mod config;
pub mod error;
pub mod notify;
pub mod service;

pub use config::LedgerConfig;
pub use error::LedgerError;
pub use notify::{NoopNotifier, ReceiptNotifier, TracingNotifier};
pub use service::LedgerService;
