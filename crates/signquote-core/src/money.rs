//! # Money Module
//!
//! Provides the `Won` type for handling quoted amounts safely.
//!
//! ## Why Integer Won?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Area pricing in floating point:                                        │
//! │    (w × h) / 1_000_000 × 11_000 can land on 0.4999999 instead of 0.5   │
//! │    and round the wrong way at a half-won boundary                       │
//! │                                                                         │
//! │  OUR SOLUTION: exact integer numerators                                 │
//! │    round(w × h × 11_000 / 1_000_000) computed in i128                   │
//! │    with a single half-up division at the end                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! KRW has no minor unit, so one `Won` is the smallest billable amount.
//!
//! ## Usage
//! ```rust
//! use signquote_core::money::Won;
//!
//! let per_item = Won::new(7_208);
//! let total = per_item * 3;
//! assert_eq!(total.amount(), 21_624);
//! assert_eq!(total.to_string(), "21,624원");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};
use ts_rs::TS;

use crate::types::VatRate;

// =============================================================================
// Won Type
// =============================================================================

/// A monetary amount in Korean won.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction of two amounts never underflows silently
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: serialized as a bare number so the UI formats it itself
///
/// ## Where Won is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Band unit price ──► Pricing.per_item ──► Pricing.total                 │
/// │                                                │                        │
/// │  Post-process / accessory / delivery rates ────┤                        │
/// │                                                ▼                        │
/// │                         Quote.supply ──► Quote.vat ──► Quote.total     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Won(i64);

impl Won {
    /// Creates an amount from whole won.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Won(amount)
    }

    /// Returns the amount in whole won.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero won.
    #[inline]
    pub const fn zero() -> Self {
        Won(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the amount is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a per-item amount by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use signquote_core::money::Won;
    ///
    /// let per_item = Won::new(8_000);
    /// assert_eq!(per_item.multiply_quantity(5).amount(), 40_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Won(self.0 * qty)
    }

    /// Calculates VAT on this amount, rounding half up.
    ///
    /// Negative amounts are treated as zero; VAT is never a credit here.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`, where the +5000 is the
    /// half-won rounding term.
    ///
    /// ## Example
    /// ```rust
    /// use signquote_core::money::Won;
    /// use signquote_core::types::VatRate;
    ///
    /// let supply = Won::new(25_005);
    /// let vat = supply.calculate_vat(VatRate::from_bps(1000));
    /// // 2,500.5 rounds up
    /// assert_eq!(vat.amount(), 2_501);
    /// ```
    pub fn calculate_vat(&self, rate: VatRate) -> Won {
        let base = self.0.max(0) as i128;
        Won(((base * rate.bps() as i128 + 5000) / 10000) as i64)
    }
}

// =============================================================================
// Integer Rounding Helpers
// =============================================================================

/// Divides and rounds half up: `round(numerator / denominator)`.
///
/// Both operands are expected non-negative (dimensions and prices), with a
/// positive denominator. `0.5` rounds to `1`.
///
/// ```rust
/// use signquote_core::money::round_div;
///
/// assert_eq!(round_div(1, 2), 1);
/// assert_eq!(round_div(7_208_000_000, 1_000_000), 7_208);
/// assert_eq!(round_div(14_175, 4), 3_544);
/// ```
#[inline]
pub fn round_div(numerator: i128, denominator: i128) -> i64 {
    ((2 * numerator + denominator) / (2 * denominator)) as i64
}

/// Divides and rounds up: `ceil(numerator / denominator)` for non-negative operands.
#[inline]
pub fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator - 1) / denominator
}

/// Formats an integer with `,` thousands separators (ko-KR grouping).
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount the way the quote sheet prints it: `25,000원`.
impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", group_thousands(self.0), crate::CURRENCY_SUFFIX)
    }
}

impl Default for Won {
    fn default() -> Self {
        Won::zero()
    }
}

impl Add for Won {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Won(self.0 + other.0)
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Won {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Won(self.0 * qty)
    }
}

impl std::iter::Sum for Won {
    fn sum<I: Iterator<Item = Won>>(iter: I) -> Self {
        iter.fold(Won::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Won::new(0).to_string(), "0원");
        assert_eq!(Won::new(999).to_string(), "999원");
        assert_eq!(Won::new(25_000).to_string(), "25,000원");
        assert_eq!(Won::new(1_234_567).to_string(), "1,234,567원");
        assert_eq!(Won::new(-40_000).to_string(), "-40,000원");
    }

    #[test]
    fn test_arithmetic() {
        let a = Won::new(10_000);
        let b = Won::new(2_500);

        assert_eq!((a + b).amount(), 12_500);
        assert_eq!((a * 3).amount(), 30_000);

        let total: Won = [a, b, b].into_iter().sum();
        assert_eq!(total.amount(), 15_000);
    }

    #[test]
    fn test_vat_ten_percent() {
        let rate = VatRate::from_bps(1000);
        assert_eq!(Won::new(25_000).calculate_vat(rate).amount(), 2_500);
        assert_eq!(Won::new(7_208).calculate_vat(rate).amount(), 721);
        assert_eq!(Won::new(25_005).calculate_vat(rate).amount(), 2_501);
        assert_eq!(Won::new(25_004).calculate_vat(rate).amount(), 2_500);
    }

    #[test]
    fn test_vat_on_negative_is_zero() {
        let rate = VatRate::from_bps(1000);
        assert!(Won::new(-5_000).calculate_vat(rate).is_zero());
    }

    #[test]
    fn test_round_div_half_up() {
        assert_eq!(round_div(0, 7), 0);
        assert_eq!(round_div(5, 10), 1);
        assert_eq!(round_div(4, 10), 0);
        assert_eq!(round_div(15, 10), 2);
        assert_eq!(round_div(25, 10), 3);
    }

    #[test]
    fn test_ceil_div() {
        assert_eq!(ceil_div(2500, 1000), 3);
        assert_eq!(ceil_div(2000, 1000), 2);
        assert_eq!(ceil_div(1, 100), 1);
        assert_eq!(ceil_div(0, 1000), 0);
    }
}
