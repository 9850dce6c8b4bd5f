//! # Validation Module
//!
//! Lenient coercion of the raw values the quote form sends.
//!
//! ## Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Degrade, Don't Reject                              │
//! │                                                                         │
//! │  Free-text won amount  "15,000원"   → 15000   (non-digits dropped)      │
//! │                        ""           → 0                                 │
//! │  Quantity              "0" / "x"    → 1       (clamped to 1..=10000)    │
//! │                        "99999"      → 10000                             │
//! │  Extra unit count      "-3"         → 0       (clamped to 0..=1000)     │
//! │  PET size              2000 × 900   → 1800 × 900, width flagged         │
//! │  Dombo width           1300 on 1270 → 1170, exceeded flagged            │
//! │                                                                         │
//! │  Only the pricing engine decides "not computable"; nothing here fails. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use signquote_core::validation::{parse_won, clamp_quantity};
//! use signquote_core::PriceBook;
//!
//! let book = PriceBook::default();
//! assert_eq!(parse_won("15,000").amount(), 15_000);
//! assert_eq!(clamp_quantity(&book, 0), 1);
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::money::Won;
use crate::post_process::dombo_max_width;
use crate::tables::PriceBook;

// =============================================================================
// Free-Text Numbers
// =============================================================================

/// Parses a free-text won amount, keeping only ASCII digits.
///
/// Empty input and values too large for `i64` become zero.
///
/// ## Example
/// ```rust
/// use signquote_core::validation::parse_won;
///
/// assert_eq!(parse_won("15,000").amount(), 15_000);
/// assert_eq!(parse_won("abc123").amount(), 123);
/// assert_eq!(parse_won("").amount(), 0);
/// ```
pub fn parse_won(input: &str) -> Won {
    Won::new(digits_only(input).unwrap_or(0))
}

fn digits_only(input: &str) -> Option<i64> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

// =============================================================================
// Quantities
// =============================================================================

/// Clamps a quantity into `1..=max_quantity`.
pub fn clamp_quantity(book: &PriceBook, qty: i64) -> i64 {
    qty.clamp(1, book.limits.max_quantity)
}

/// Parses a typed quantity; anything unreadable becomes 1.
pub fn parse_quantity(book: &PriceBook, input: &str) -> i64 {
    match input.trim().parse::<i64>() {
        Ok(qty) => clamp_quantity(book, qty),
        Err(_) => 1,
    }
}

/// Clamps an extra unit count (eyelets, hooks, suction cups) into `0..=max_extra`.
pub fn clamp_extra_count(book: &PriceBook, extra: i64) -> i64 {
    extra.clamp(0, book.post.max_extra)
}

// =============================================================================
// Size Corrections
// =============================================================================

/// A size after clamping, with a flag per corrected side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClampedSize {
    pub width: i64,
    pub height: i64,
    pub width_clamped: bool,
    pub height_clamped: bool,
}

impl ClampedSize {
    /// Returns true if either side was corrected.
    pub fn any_clamped(&self) -> bool {
        self.width_clamped || self.height_clamped
    }
}

/// Clamps a custom PET size to the producible maximum.
pub fn clamp_pet_size(book: &PriceBook, width: i64, height: i64) -> ClampedSize {
    let pet = &book.pet;
    ClampedSize {
        width: width.min(pet.max_width),
        height: height.min(pet.max_height),
        width_clamped: width > pet.max_width,
        height_clamped: height > pet.max_height,
    }
}

/// Clamps a sticker width to the usable width of the chosen dombo roll.
///
/// Returns the (possibly reduced) width and whether it exceeded the limit.
pub fn clamp_dombo_width(book: &PriceBook, width: i64, roll_width: i64) -> (i64, bool) {
    match dombo_max_width(book, roll_width) {
        Some(max) if width > max => (max, true),
        _ => (width, false),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_won() {
        assert_eq!(parse_won("15,000").amount(), 15_000);
        assert_eq!(parse_won("abc123").amount(), 123);
        assert_eq!(parse_won("  30000원 ").amount(), 30_000);
        assert_eq!(parse_won("").amount(), 0);
        assert_eq!(parse_won("-500").amount(), 500);
        assert_eq!(parse_won("99999999999999999999999").amount(), 0);
    }

    #[test]
    fn test_clamp_quantity() {
        let book = PriceBook::default();
        assert_eq!(clamp_quantity(&book, 0), 1);
        assert_eq!(clamp_quantity(&book, -5), 1);
        assert_eq!(clamp_quantity(&book, 42), 42);
        assert_eq!(clamp_quantity(&book, 10_005), 10_000);
    }

    #[test]
    fn test_parse_quantity() {
        let book = PriceBook::default();
        assert_eq!(parse_quantity(&book, "x"), 1);
        assert_eq!(parse_quantity(&book, ""), 1);
        assert_eq!(parse_quantity(&book, " 12 "), 12);
        assert_eq!(parse_quantity(&book, "20000"), 10_000);
    }

    #[test]
    fn test_clamp_extra_count() {
        let book = PriceBook::default();
        assert_eq!(clamp_extra_count(&book, -3), 0);
        assert_eq!(clamp_extra_count(&book, 7), 7);
        assert_eq!(clamp_extra_count(&book, 5000), 1000);
    }

    #[test]
    fn test_clamp_pet_size() {
        let book = PriceBook::default();

        let size = clamp_pet_size(&book, 2000, 900);
        assert_eq!((size.width, size.height), (1800, 900));
        assert!(size.width_clamped && !size.height_clamped);

        let size = clamp_pet_size(&book, 1200, 12_000);
        assert_eq!(size.height, 10_000);
        assert!(size.height_clamped);

        assert!(!clamp_pet_size(&book, 600, 1800).any_clamped());
    }

    #[test]
    fn test_clamp_dombo_width() {
        let book = PriceBook::default();
        assert_eq!(clamp_dombo_width(&book, 1300, 1270), (1170, true));
        assert_eq!(clamp_dombo_width(&book, 1170, 1270), (1170, false));
        assert_eq!(clamp_dombo_width(&book, 5000, 0), (5000, false));
    }
}
