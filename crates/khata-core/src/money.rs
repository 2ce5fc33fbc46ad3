//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! In floating point:  0.1 + 0.2 = 0.30000000000000004   WRONG!
//!
//! OUR SOLUTION: integer paisa (smallest currency unit)
//!   1000 paisa / 3 = 333 paisa (x3 = 999 paisa)
//!   We KNOW we lost 1 paisa, and handle it explicitly.
//! ```
//!
//! ## Usage
//! ```rust
//! use khata_core::money::Money;
//!
//! // Create from paisa (preferred)
//! let rate = Money::from_paisa(5000); // 50.00
//!
//! // Arithmetic
//! let line_total = rate.multiply_quantity(3); // 150.00
//! assert_eq!(line_total.paisa(), 15000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paisa).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for losses on a sale
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for request/response payloads
///
/// Every monetary value in the system (rates, purchase prices, totals,
/// profit amounts) flows through this type; the database stores the raw
/// paisa column and repositories convert at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paisa (the smallest currency unit).
    ///
    /// ```rust
    /// use khata_core::money::Money;
    ///
    /// let rate = Money::from_paisa(5099); // 50.99
    /// assert_eq!(rate.paisa(), 5099);
    /// ```
    #[inline]
    pub const fn from_paisa(paisa: i64) -> Self {
        Money(paisa)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paisa.
    #[inline]
    pub const fn paisa(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paisa portion (always 0-99).
    #[inline]
    pub const fn paisa_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (a loss).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    ///
    /// ```rust
    /// use khata_core::money::Money;
    ///
    /// let loss = Money::from_paisa(-550);
    /// assert_eq!(loss.abs().paisa(), 550);
    /// ```
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// Saturation instead of wrapping: i64 paisa covers ~92 trillion
    /// rupees, so a clamped result only ever comes from garbage input and
    /// must not silently flip sign.
    ///
    /// ```rust
    /// use khata_core::money::Money;
    ///
    /// let rate = Money::from_paisa(5000);           // 50.00
    /// assert_eq!(rate.multiply_quantity(3).paisa(), 15000); // 150.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as a plain decimal amount (`150.00`, `-5.50`).
///
/// Receipts use this directly, so the format is load-bearing: no currency
/// symbol, always two decimal places.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.rupees().abs(), self.paisa_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity (i64), saturating like
/// [`Money::multiply_quantity`].
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paisa() {
        let money = Money::from_paisa(5099);
        assert_eq!(money.paisa(), 5099);
        assert_eq!(money.rupees(), 50);
        assert_eq!(money.paisa_part(), 99);
    }

    #[test]
    fn test_from_rupees() {
        assert_eq!(Money::from_rupees(50).paisa(), 5000);
        assert_eq!(Money::from_rupees(-5).paisa(), -500);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paisa(15000)), "150.00");
        assert_eq!(format!("{}", Money::from_paisa(5099)), "50.99");
        assert_eq!(format!("{}", Money::from_paisa(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_paisa(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paisa(1000);
        let b = Money::from_paisa(500);

        assert_eq!((a + b).paisa(), 1500);
        assert_eq!((a - b).paisa(), 500);
        assert_eq!((a * 3).paisa(), 3000);

        let mut running = Money::zero();
        running += a;
        running += b;
        assert_eq!(running.paisa(), 1500);
    }

    #[test]
    fn test_multiply_quantity() {
        let rate = Money::from_paisa(5000);
        assert_eq!(rate.multiply_quantity(3).paisa(), 15000);
    }

    #[test]
    fn test_multiply_quantity_saturates_instead_of_wrapping() {
        let huge = Money::from_paisa(i64::MAX);
        assert_eq!(huge.multiply_quantity(2).paisa(), i64::MAX);
        assert_eq!((huge * -2).paisa(), i64::MIN);
    }

    #[test]
    fn test_abs_and_sign_checks() {
        let loss = Money::from_paisa(-550);
        assert!(loss.is_negative());
        assert_eq!(loss.abs().paisa(), 550);
        assert!(Money::zero().is_zero());
    }
}
