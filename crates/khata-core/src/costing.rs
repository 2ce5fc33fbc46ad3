//! # Costing Module
//!
//! Weighted-average purchase costing and per-line profit/loss math.
//!
//! ## Weighted-Average Costing
//! ```text
//! On hand:  10 units at 30.00          (old stock, old price)
//! Restock:   5 units at 36.00          (incoming stock, incoming price)
//!
//! new_price = (30.00 x 10 + 36.00 x 5) / (10 + 5) = 32.00
//! ```
//!
//! The recorded purchase cost always reflects a quantity-weighted blend of
//! everything currently on the shelf, so profit on a later sale is measured
//! against what the stock actually cost.

use crate::money::Money;

/// Recomputes a product's purchase cost after a restock as the
/// quantity-weighted average of old and incoming stock.
///
/// When the combined quantity is zero (a zero-quantity restock onto an empty
/// shelf) the old price is returned unchanged. Rejecting such restocks is a
/// business-rule question; the ledger currently accepts them.
///
/// Integer math with rounding, i128 intermediate to avoid overflow.
pub fn weighted_average_cost(
    old_price: Money,
    old_qty: i64,
    incoming_price: Money,
    incoming_qty: i64,
) -> Money {
    let combined = old_qty + incoming_qty;
    if combined <= 0 {
        return old_price;
    }

    let weighted = old_price.paisa() as i128 * old_qty as i128
        + incoming_price.paisa() as i128 * incoming_qty as i128;
    let blended = (weighted + combined as i128 / 2) / combined as i128;
    Money::from_paisa(blended as i64)
}

/// Outcome of selling one line: sign and absolute amount.
///
/// Persisted as one `profit_loss` row per accepted sale line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfitOutcome {
    /// True when the line broke even or better.
    pub is_profit: bool,
    /// Absolute profit or loss amount.
    pub amount: Money,
}

/// Computes profit/loss for one sale line.
///
/// `profit = (rate - purchase cost) x quantity`; a zero margin counts as
/// profit.
///
/// ```rust
/// use khata_core::costing::line_profit;
/// use khata_core::money::Money;
///
/// // Sold 3 units at 50.00, purchased at 30.00: profit 60.00
/// let outcome = line_profit(Money::from_paisa(5000), Money::from_paisa(3000), 3);
/// assert!(outcome.is_profit);
/// assert_eq!(outcome.amount.paisa(), 6000);
/// ```
pub fn line_profit(rate: Money, purchase_cost: Money, quantity: i64) -> ProfitOutcome {
    let margin = (rate - purchase_cost).multiply_quantity(quantity);
    ProfitOutcome {
        is_profit: !margin.is_negative(),
        amount: margin.abs(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_average_basic() {
        // (3000*10 + 3600*5) / 15 = 3200
        let blended = weighted_average_cost(
            Money::from_paisa(3000),
            10,
            Money::from_paisa(3600),
            5,
        );
        assert_eq!(blended.paisa(), 3200);
    }

    #[test]
    fn test_weighted_average_rounds() {
        // (1000*1 + 1001*2) / 3 = 1000.666... -> 1001
        let blended = weighted_average_cost(
            Money::from_paisa(1000),
            1,
            Money::from_paisa(1001),
            2,
        );
        assert_eq!(blended.paisa(), 1001);
    }

    #[test]
    fn test_weighted_average_zero_combined_quantity_keeps_old_price() {
        let old = Money::from_paisa(3000);
        let blended = weighted_average_cost(old, 0, Money::from_paisa(9999), 0);
        assert_eq!(blended, old);
    }

    #[test]
    fn test_weighted_average_restock_from_empty_shelf() {
        // Old stock fully sold out: blend is exactly the incoming price.
        let blended = weighted_average_cost(
            Money::from_paisa(3000),
            0,
            Money::from_paisa(3600),
            5,
        );
        assert_eq!(blended.paisa(), 3600);
    }

    #[test]
    fn test_line_profit() {
        // (50.00 - 30.00) x 3 = 60.00 profit
        let outcome = line_profit(Money::from_paisa(5000), Money::from_paisa(3000), 3);
        assert!(outcome.is_profit);
        assert_eq!(outcome.amount.paisa(), 6000);
    }

    #[test]
    fn test_line_loss() {
        // (25.00 - 30.00) x 2 = -10.00 -> loss of 10.00
        let outcome = line_profit(Money::from_paisa(2500), Money::from_paisa(3000), 2);
        assert!(!outcome.is_profit);
        assert_eq!(outcome.amount.paisa(), 1000);
    }

    #[test]
    fn test_zero_margin_counts_as_profit() {
        let outcome = line_profit(Money::from_paisa(3000), Money::from_paisa(3000), 4);
        assert!(outcome.is_profit);
        assert!(outcome.amount.is_zero());
    }
}
