//! # Post-Process Costs
//!
//! Per-item surcharges for finishing work, plus the dombo-cut width helper.
//!
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────────┐
//! │ Option               │ Per-item cost                                    │
//! ├──────────────────────┼──────────────────────────────────────────────────┤
//! │ Eyelet / String hook │ 4 free, each extra × 500                         │
//! │ Wood batten + rope   │ by billed height band (see wood_rope_cost)       │
//! │ Hot cut & sewing     │ free                                             │
//! │ Rope sewing / Tape   │ ⌈w/1000⌉ × ⌈h/1000⌉ × 1000, minimum 2000         │
//! └──────────────────────┴──────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::band::{BAND_SPLIT_MM, ROLL_MAX_MM};
use crate::money::{ceil_div, Won};
use crate::tables::PriceBook;
use crate::types::Pricing;

/// Band sequence the wood batten steps through between 900 and 1800mm.
const WOOD_ROPE_STEPS: [i64; 9] = [900, 1000, 1100, 1200, 1300, 1400, 1500, 1600, 1800];

/// Above 1800mm the wood batten grows one step per started 100mm.
const WOOD_ROPE_LONG_STEP_MM: i64 = 100;

/// Wood batten + rope price for one item (one set = two battens).
///
/// ## Example
/// ```rust
/// use signquote_core::post_process::wood_rope_cost;
/// use signquote_core::PriceBook;
///
/// let book = PriceBook::default();
/// assert_eq!(wood_rope_cost(&book, 900).amount(), 2000);
/// assert_eq!(wood_rope_cost(&book, 901).amount(), 3000);
/// assert_eq!(wood_rope_cost(&book, 1800).amount(), 10000);
/// assert_eq!(wood_rope_cost(&book, 1801).amount(), 11000);
/// ```
pub fn wood_rope_cost(book: &PriceBook, height: i64) -> Won {
    let rates = &book.post;

    if height <= BAND_SPLIT_MM {
        return rates.wood_rope_base;
    }

    if height <= ROLL_MAX_MM {
        let band = book.band_for_height(height);
        let step = WOOD_ROPE_STEPS.iter().position(|&b| b == band).unwrap_or(0) as i64;
        return rates.wood_rope_base + rates.wood_rope_step * step;
    }

    let extra_steps = ceil_div(height - ROLL_MAX_MM, WOOD_ROPE_LONG_STEP_MM);
    rates.wood_rope_long_base + rates.wood_rope_step * extra_steps
}

/// Height the wood batten is billed at: the matched pricing band when the
/// pricing used one, else the raw measurement.
pub fn wood_rope_height(pricing: Option<&Pricing>, raw_height: i64) -> i64 {
    pricing.and_then(|p| p.matched_band).unwrap_or(raw_height)
}

/// Rope sewing / double-sided tape price for one item.
///
/// One unit per started square metre, each side rounded up on its own, with
/// a minimum charge. Missing sides cost nothing.
pub fn sew_tape_cost(book: &PriceBook, width: i64, height: i64) -> Won {
    if width <= 0 || height <= 0 {
        return Won::zero();
    }
    let squares = ceil_div(width, 1000) * ceil_div(height, 1000);
    (book.post.sew_tape_per_m2 * squares).max(book.post.sew_tape_minimum)
}

/// Cost of units beyond the free allowance (eyelets, hooks, suction cups).
///
/// `extra` already excludes the free units; negative counts cost nothing.
pub fn extra_unit_cost(book: &PriceBook, extra: i64) -> Won {
    book.post.extra_unit * extra.max(0)
}

/// Widest printable sticker width on a roll when dombo cutting.
///
/// Returns `None` (no limit) for a non-positive roll width.
pub fn dombo_max_width(book: &PriceBook, roll_width: i64) -> Option<i64> {
    (roll_width > 0).then(|| roll_width - 2 * book.limits.dombo_side_margin)
}

// =============================================================================
// Post-Process Options
// =============================================================================

/// A finishing option chosen for every item of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PostProcess {
    /// 아일렛 - grommets; `extra` beyond the four free per item.
    Eyelet { extra: i64 },
    /// 끈고리 - string hooks; same pricing as eyelets.
    StringHook { extra: i64 },
    /// 각목+로프 - wood batten and rope.
    WoodRope,
    /// 열재단&재봉 - hot cut and hem, included.
    HotCut,
    /// 로프미싱 - rope sewn into the hem.
    RopeSewing,
    /// 양면테이프 - double-sided tape.
    DoubleTape,
}

impl PostProcess {
    /// Korean label printed on the quote.
    pub fn label(&self) -> &'static str {
        match self {
            PostProcess::Eyelet { .. } => "아일렛",
            PostProcess::StringHook { .. } => "끈고리",
            PostProcess::WoodRope => "각목+로프",
            PostProcess::HotCut => "열재단&재봉",
            PostProcess::RopeSewing => "로프미싱",
            PostProcess::DoubleTape => "양면테이프",
        }
    }

    /// Per-item surcharge.
    ///
    /// `pricing` supplies the billed band for the wood batten; `width` and
    /// `height` are the raw measurements.
    pub fn unit_cost(&self, book: &PriceBook, pricing: Option<&Pricing>, width: i64, height: i64) -> Won {
        match self {
            PostProcess::Eyelet { extra } | PostProcess::StringHook { extra } => extra_unit_cost(book, *extra),
            PostProcess::WoodRope => wood_rope_cost(book, wood_rope_height(pricing, height)),
            PostProcess::HotCut => Won::zero(),
            PostProcess::RopeSewing | PostProcess::DoubleTape => sew_tape_cost(book, width, height),
        }
    }

    /// Total units fitted per item, free allowance included (counted options only).
    pub fn units_per_item(&self, book: &PriceBook) -> Option<i64> {
        match self {
            PostProcess::Eyelet { extra } | PostProcess::StringHook { extra } => {
                Some(book.post.free_units + (*extra).max(0))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::compute_pricing;
    use crate::types::{Material, RollHint};

    #[test]
    fn test_wood_rope_reference_cases() {
        let book = PriceBook::default();
        let cases = [
            (900, 2000),
            (901, 3000),
            (999, 3000),
            (1000, 3000),
            (1100, 4000),
            (1200, 5000),
            (1300, 6000),
            (1600, 9000),
            (1700, 10000),
            (1800, 10000),
            (1801, 11000),
            (1899, 11000),
            (1900, 11000),
            (1901, 12000),
            (2000, 12000),
            (2345, 16000),
        ];
        for (h, want) in cases {
            assert_eq!(wood_rope_cost(&book, h).amount(), want, "wood_rope_cost({h})");
        }
    }

    #[test]
    fn test_wood_rope_without_height() {
        let book = PriceBook::default();
        assert_eq!(wood_rope_cost(&book, 0).amount(), 2000);
        assert_eq!(wood_rope_cost(&book, -10).amount(), 2000);
    }

    #[test]
    fn test_wood_rope_tracks_billed_band() {
        let book = PriceBook::default();
        let pricing = compute_pricing(&book, Material::WaterBanner, 900, 7000, 1, RollHint::Auto).unwrap();
        assert_eq!(wood_rope_height(Some(&pricing), 7000), 900);
        assert_eq!(PostProcess::WoodRope.unit_cost(&book, Some(&pricing), 900, 7000).amount(), 2000);

        // Area pricing has no band; the raw height is billed.
        let pricing = compute_pricing(&book, Material::WaterBanner, 1000, 2000, 1, RollHint::Auto).unwrap();
        assert_eq!(wood_rope_height(Some(&pricing), 2000), 2000);
        assert_eq!(wood_rope_height(None, 1234), 1234);
    }

    #[test]
    fn test_sew_tape() {
        let book = PriceBook::default();
        assert_eq!(sew_tape_cost(&book, 50, 50).amount(), 2000);
        assert_eq!(sew_tape_cost(&book, 1000, 900).amount(), 2000);
        assert_eq!(sew_tape_cost(&book, 2000, 3000).amount(), 6000);
        assert_eq!(sew_tape_cost(&book, 1999, 1001).amount(), 4000);
        assert!(sew_tape_cost(&book, 0, 1000).is_zero());
    }

    #[test]
    fn test_extra_unit_cost() {
        let book = PriceBook::default();
        assert!(extra_unit_cost(&book, 0).is_zero());
        assert!(extra_unit_cost(&book, -3).is_zero());
        assert_eq!(extra_unit_cost(&book, 6).amount(), 3000);
    }

    #[test]
    fn test_dombo_max_width() {
        let book = PriceBook::default();
        assert_eq!(dombo_max_width(&book, 1270), Some(1170));
        assert_eq!(dombo_max_width(&book, 635), Some(535));
        assert_eq!(dombo_max_width(&book, 0), None);
    }

    #[test]
    fn test_post_process_unit_costs() {
        let book = PriceBook::default();
        assert_eq!(PostProcess::Eyelet { extra: 2 }.unit_cost(&book, None, 1000, 1000).amount(), 1000);
        assert_eq!(PostProcess::StringHook { extra: 0 }.unit_cost(&book, None, 1000, 1000).amount(), 0);
        assert!(PostProcess::HotCut.unit_cost(&book, None, 5000, 5000).is_zero());
        assert_eq!(PostProcess::DoubleTape.unit_cost(&book, None, 2000, 3000).amount(), 6000);
        assert_eq!(PostProcess::Eyelet { extra: 3 }.units_per_item(&book), Some(7));
        assert_eq!(PostProcess::WoodRope.units_per_item(&book), None);
    }

    #[test]
    fn test_post_process_serialization() {
        let json = serde_json::to_value(PostProcess::Eyelet { extra: 2 }).unwrap();
        assert_eq!(json["kind"], "eyelet");
        assert_eq!(json["extra"], 2);

        let parsed: PostProcess = serde_json::from_str(r#"{"kind":"wood-rope"}"#).unwrap();
        assert_eq!(parsed, PostProcess::WoodRope);
    }
}
