//! # Band Matcher
//!
//! Maps a measured side to the standard roll width it is billed at.
//!
//! ## Matching Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  h ≤ 900            nearest band at or BELOW h                          │
//! │                     (smallest band when h is below every band)          │
//! │                                                                         │
//! │      300  400  500  600  700  800  900                                  │
//! │                 ▲ h = 650 → 600                                         │
//! │                                                                         │
//! │  h > 900            nearest band at or ABOVE h                          │
//! │                     (largest band when h is above every band)           │
//! │                                                                         │
//! │      1000 1100 1200 1300 1400 1500 1600 1800                            │
//! │        ▲ h = 901 → 1000                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exact band values always match themselves, so the rule is continuous at
//! 900 and at 1800.

use crate::tables::{Band, BandTable};

/// Sides up to this size round down to a band; above it they round up.
pub const BAND_SPLIT_MM: i64 = 900;

/// Widest roll that can be band-priced. Taller tarpaulin is area-priced.
pub const ROLL_MAX_MM: i64 = 1800;

/// Matches a measured side `h` to a band width.
///
/// ## Example
/// ```rust
/// use signquote_core::band::pick_band;
/// use signquote_core::PriceBook;
///
/// let water = PriceBook::default().bands.water;
/// assert_eq!(pick_band(650, &water), 600);
/// assert_eq!(pick_band(900, &water), 900);
/// assert_eq!(pick_band(901, &water), 1000);
/// assert_eq!(pick_band(5000, &water), 1800);
/// ```
pub fn pick_band(h: i64, table: &BandTable) -> i64 {
    if h <= BAND_SPLIT_MM {
        return table
            .descending()
            .find(|b| b.width <= h)
            .unwrap_or_else(|| table.smallest())
            .width;
    }

    table
        .ascending()
        .find(|b| b.width >= h)
        .unwrap_or_else(|| table.largest())
        .width
}

/// Rounds a short side UP to the nearest band that is at most `limit`.
///
/// Used when the other side is too long for roll matching: the short side is
/// then what the roll must cover, so it may never round down. Falls back to
/// the band at `limit` itself when `side` exceeds every candidate.
pub fn ceil_band_within(side: i64, limit: i64, table: &BandTable) -> Option<Band> {
    table
        .ascending()
        .filter(|b| b.width <= limit)
        .find(|b| b.width >= side)
        .copied()
        .or_else(|| table.ascending().find(|b| b.width == limit).copied())
}

// =============================================================================
// Unit Tests
// =============================================================================
