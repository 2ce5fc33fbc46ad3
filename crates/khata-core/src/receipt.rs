//! # Receipt Module
//!
//! Formats the text-message bill sent after a committed sale or purchase.
//!
//! ## Format (wire-compatible, do not change)
//! ```text
//! Bill for Asif
//! Date: 2026-08-29
//! ----------------------
//! Milk: 3 x 50.00 = 150.00
//! ----------------------
//! Total: 150.00
//! Status: DUE by 2026-09-15
//! ```
//!
//! Purchase receipts start with `Purchase Bill for <vendor>`; paid bills end
//! with `Status: PAID`.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::money::Money;

/// Which kind of bill is being issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptKind {
    Sale,
    Purchase,
}

impl ReceiptKind {
    fn heading(self) -> &'static str {
        match self {
            ReceiptKind::Sale => "Bill",
            ReceiptKind::Purchase => "Purchase Bill",
        }
    }
}

/// One formatted line item on a bill.
#[derive(Debug, Clone)]
pub struct ReceiptLine {
    pub product_name: String,
    pub quantity: i64,
    /// Per-unit rate (sale) or purchase price (purchase).
    pub rate: Money,
}

impl ReceiptLine {
    /// Line total: quantity x rate.
    pub fn line_total(&self) -> Money {
        self.rate.multiply_quantity(self.quantity)
    }

    fn render(&self) -> String {
        format!(
            "{}: {} x {} = {}",
            self.product_name,
            self.quantity,
            self.rate,
            self.line_total()
        )
    }
}

/// Paid / due-by status footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    Paid,
    DueBy(NaiveDate),
}

/// Builds the complete bill text.
///
/// The layout is consumed verbatim by the SMS channel, so every separator
/// and label here is part of the external contract.
pub fn format_receipt(
    kind: ReceiptKind,
    counterparty_name: &str,
    date: NaiveDate,
    lines: &[ReceiptLine],
    total: Money,
    status: BillStatus,
) -> String {
    let mut text = String::new();

    let _ = writeln!(text, "{} for {}", kind.heading(), counterparty_name);
    let _ = writeln!(text, "Date: {}", date);
    let _ = writeln!(text, "----------------------");
    for line in lines {
        let _ = writeln!(text, "{}", line.render());
    }
    let _ = writeln!(text, "----------------------");
    let _ = writeln!(text, "Total: {}", total);
    match status {
        BillStatus::Paid => {
            let _ = write!(text, "Status: PAID");
        }
        BillStatus::DueBy(due) => {
            let _ = write!(text, "Status: DUE by {}", due);
        }
    }

    text
}

// =============================================================================
// Unit Tests
// =============================================================================
