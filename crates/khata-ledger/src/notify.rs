//! # Receipt Notification Port
//!
//! Outbound text-message channel for bills.
//!
//! ## Contract
//! Dispatch is best-effort and happens after the ledger transaction has
//! committed. An implementation must never block the caller for long and
//! must never propagate failure - a lost SMS does not un-record a sale.
//! Delivery problems are observable only out of band.

use tracing::debug;

/// Outbound receipt channel.
///
/// Implementations own their delivery mechanics (HTTP gateway, modem,
/// spawned task); from the ledger's perspective the call is fire and
/// forget.
pub trait ReceiptNotifier: Send + Sync {
    /// Dispatches a bill to the given phone number, best effort.
    fn send_receipt(&self, phone: &str, body: &str);
}

/// Discards every receipt. Useful for batch imports and tests that don't
/// care about bills.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl ReceiptNotifier for NoopNotifier {
    fn send_receipt(&self, _phone: &str, _body: &str) {}
}

/// Logs receipts at debug level instead of sending them. The default
/// choice during development.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl ReceiptNotifier for TracingNotifier {
    fn send_receipt(&self, phone: &str, body: &str) {
        debug!(phone = %phone, body = %body, "Receipt dispatched");
    }
}
