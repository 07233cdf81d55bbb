//! # Money Module
//!
//! `Money` and `Discount` for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Summed over a fifty-line order, drift becomes visible on the invoice.  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                             │
//! │    $19.00 × 3 × (1 − 0.10) = 1900 × 3 × 9000 / 10000 = 5130 cents       │
//! │    Exact. Rounding happens once per line, half-up, in integer math.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use northwind_core::money::{Discount, Money};
//!
//! let unit_price = Money::from_cents(1900); // $19.00
//! let line_total = unit_price.line_total(3, Discount::from_bps(1000));
//! assert_eq!(line_total.cents(), 5130); // $51.30
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for credits and corrections
/// - **Single field tuple struct**: zero-cost abstraction over i64
///
/// Every monetary value in the system flows through this type; the database
/// stores the raw cents (`*_cents` columns), only display code formats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Computes the total for one order line:
    /// `unit_price × quantity × (1 − discount)`.
    ///
    /// ## Numeric Semantics
    /// The product is computed in i128 (no overflow for any realistic
    /// order) and rounded half-up to whole cents once, at the end. Line
    /// totals are rounded independently and then summed; there is no
    /// intermediate rounding inside the multiplication.
    ///
    /// ## Example
    /// ```rust
    /// use northwind_core::money::{Discount, Money};
    ///
    /// // $18.00 × 5, no discount
    /// assert_eq!(Money::from_cents(1800).line_total(5, Discount::none()).cents(), 9000);
    /// // $19.00 × 3, 10% off
    /// assert_eq!(
    ///     Money::from_cents(1900).line_total(3, Discount::from_bps(1000)).cents(),
    ///     5130
    /// );
    /// ```
    pub fn line_total(&self, quantity: i64, discount: Discount) -> Money {
        let gross = self.0 as i128 * quantity as i128;
        let kept = (10_000 - discount.bps() as i128).max(0);
        let cents = (gross * kept + 5_000) / 10_000;
        Money::from_cents(cents as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
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

// =============================================================================
// Discount
// =============================================================================

/// A discount fraction in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000. A valid discount is in `[0, 10000)` —
/// 1000 bps is 10% off; a full 100% discount is not a thing we sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount(u32);

impl Discount {
    /// Creates a discount from basis points. Range is enforced by
    /// [`crate::validation::validate_discount_bps`] at the workflow edge.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Discount(bps)
    }

    /// No discount.
    #[inline]
    pub const fn none() -> Self {
        Discount(0)
    }

    /// Returns the discount in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the discount as a fraction (display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut acc = Money::zero();
        acc += a;
        acc += b;
        assert_eq!(acc.cents(), 1500);
    }

    #[test]
    fn test_line_total_no_discount() {
        let total = Money::from_cents(1800).line_total(5, Discount::none());
        assert_eq!(total.cents(), 9000);
    }

    #[test]
    fn test_line_total_with_discount() {
        // $19.00 × 3 × 0.9 = $51.30 exactly
        let total = Money::from_cents(1900).line_total(3, Discount::from_bps(1000));
        assert_eq!(total.cents(), 5130);
    }

    /// The worked invoice example: 18.00×5 + 19.00×3×0.9 = 141.30.
    #[test]
    fn test_order_total_is_exact() {
        let mut total = Money::zero();
        total += Money::from_cents(1800).line_total(5, Discount::none());
        total += Money::from_cents(1900).line_total(3, Discount::from_bps(1000));
        assert_eq!(total.cents(), 14130);
        assert_eq!(format!("{}", total), "$141.30");
    }

    #[test]
    fn test_line_total_rounds_half_up() {
        // $0.01 × 1 × (1 − 0.0001) = 0.9999 cents → 1 cent
        let total = Money::from_cents(1).line_total(1, Discount::from_bps(1));
        assert_eq!(total.cents(), 1);

        // $0.01 × 1 × (1 − 0.5001) = 0.4999 cents → 0 cents
        let total = Money::from_cents(1).line_total(1, Discount::from_bps(5001));
        assert_eq!(total.cents(), 0);
    }

    #[test]
    fn test_discount_fraction() {
        assert_eq!(Discount::from_bps(1000).fraction(), 0.1);
        assert_eq!(Discount::none().bps(), 0);
    }
}
