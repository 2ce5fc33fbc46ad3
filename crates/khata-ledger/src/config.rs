//! # Ledger Configuration
//!
//! Service configuration injected at construction time. Read-only after
//! initialization, so no locking is needed.

use serde::{Deserialize, Serialize};

/// Phone number used when a request carries none, so every transaction
/// still produces a bill somewhere.
pub const DEFAULT_PHONE: &str = "9728084306";

/// Ledger service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Receipt destination substituted when a sale/purchase request omits
    /// the phone number.
    pub default_phone: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            default_phone: DEFAULT_PHONE.to_string(),
        }
    }
}
