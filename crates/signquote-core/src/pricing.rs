//! # Pricing Engine
//!
//! Maps (material, width, height, quantity, roll hint) to a priced line item.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compute_pricing(book, material, w, h, qty, hint)                       │
//! │       │                                                                 │
//! │       ├── quantity ≤ 0 / safety limit ──► NotComputable                 │
//! │       │                                                                 │
//! │       ├── Fixed        bulletin banner, flat per item                   │
//! │       ├── Pet          600×1800 flat, else per started metre            │
//! │       ├── Solvent      single 900mm band, height ignored                │
//! │       ├── StickerArea  w × h × sticker rate                             │
//! │       └── Water                                                         │
//! │            1. short side ≤ 900 & long side > 1800 → ceil band (roll)    │
//! │            2. height > 1800                        → area               │
//! │            3. exact-preferred candidate search     → smallest band      │
//! │            4. roll on W / H / cheaper of both                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every path rounds once, on the per-item price, and multiplies by quantity
//! afterwards. All arithmetic is exact integer math with half-up rounding.

use tracing::{debug, trace};

use crate::band::{ceil_band_within, BAND_SPLIT_MM, ROLL_MAX_MM};
use crate::error::{NotComputable, PricingOutcome};
use crate::money::{ceil_div, round_div, Won};
use crate::tables::{Band, BandTable, PriceBook};
use crate::types::{Axis, Material, Pricing, PricingMode, PricingRule, RollHint};
use crate::validation::clamp_quantity;

/// Square millimetres in a square metre.
const MM2_PER_M2: i128 = 1_000_000;

/// Millimetres in a metre.
const MM_PER_M: i64 = 1000;

/// Prices one line item.
///
/// ## Returns
/// - `Ok(Pricing)` with `total == per_item × qty`
/// - `Err(NotComputable)` when a required input is missing, non-positive or
///   out of bounds; the caller shows an input prompt instead of a price
///
/// ## Example
/// ```rust
/// use signquote_core::{compute_pricing, Material, PriceBook, PricingMode, RollHint};
///
/// let book = PriceBook::default();
/// let pricing = compute_pricing(&book, Material::WaterBanner, 1000, 901, 1, RollHint::Height).unwrap();
/// assert_eq!(pricing.mode, PricingMode::Roll);
/// assert_eq!(pricing.matched_band, Some(1000));
/// assert_eq!(pricing.total.amount(), 8000);
/// ```
pub fn compute_pricing(
    book: &PriceBook,
    material: Material,
    width: i64,
    height: i64,
    qty: i64,
    hint: RollHint,
) -> PricingOutcome<Pricing> {
    let outcome = price_line(book, material, width, height, qty, hint);

    match &outcome {
        Ok(pricing) => debug!(
            material = material.id(),
            width,
            height,
            qty,
            mode = ?pricing.mode,
            band = ?pricing.matched_band,
            per_item = pricing.per_item.amount(),
            "Priced line item"
        ),
        Err(reason) => debug!(material = material.id(), width, height, qty, %reason, "Line item not computable"),
    }

    outcome
}

fn price_line(
    book: &PriceBook,
    material: Material,
    width: i64,
    height: i64,
    qty: i64,
    hint: RollHint,
) -> PricingOutcome<Pricing> {
    let qty = check_quantity(book, qty)?;
    check_safety_limit(book, Axis::Width, width)?;
    check_safety_limit(book, Axis::Height, height)?;

    match material.pricing_rule() {
        PricingRule::Fixed => {
            let per_item = book.bulletin.per_item;
            Ok(Pricing::new(PricingMode::Fixed, None, None, per_item, per_item, qty))
        }
        PricingRule::Pet => price_pet(book, width, height, qty),
        PricingRule::Solvent => price_solvent(book, width, qty),
        PricingRule::StickerArea => {
            require_positive(Axis::Width, width)?;
            require_positive(Axis::Height, height)?;
            let rate = book.area.sticker;
            Ok(Pricing::new(
                PricingMode::StickerArea,
                None,
                None,
                rate,
                area_price(width, height, rate),
                qty,
            ))
        }
        PricingRule::Water { exact_preferred } => price_water(book, exact_preferred, width, height, qty, hint),
    }
}

// =============================================================================
// Input Checks
// =============================================================================

/// Rejects a missing quantity and clamps anything above the order limit.
fn check_quantity(book: &PriceBook, qty: i64) -> PricingOutcome<i64> {
    if qty <= 0 {
        return Err(NotComputable::MissingQuantity);
    }
    Ok(clamp_quantity(book, qty))
}

fn check_safety_limit(book: &PriceBook, axis: Axis, value: i64) -> PricingOutcome<()> {
    if value > book.limits.max_mm {
        return Err(NotComputable::DimensionTooLarge {
            axis,
            value,
            max: book.limits.max_mm,
        });
    }
    Ok(())
}

fn require_positive(axis: Axis, value: i64) -> PricingOutcome<()> {
    if value <= 0 {
        return Err(NotComputable::MissingDimension { axis });
    }
    Ok(())
}

// =============================================================================
// Fixed-Rule Materials
// =============================================================================

fn price_pet(book: &PriceBook, width: i64, height: i64, qty: i64) -> PricingOutcome<Pricing> {
    let pet = &book.pet;

    if width == pet.standard_width && height == pet.standard_height {
        return Ok(Pricing::new(
            PricingMode::PetStandard,
            None,
            None,
            pet.standard_price,
            pet.standard_price,
            qty,
        ));
    }

    require_positive(Axis::Width, width)?;
    require_positive(Axis::Height, height)?;
    if width > pet.max_width || height > pet.max_height {
        return Err(NotComputable::PetSizeNotProducible { width, height });
    }

    let meters = ceil_div(height, MM_PER_M).max(1);
    Ok(Pricing::new(
        PricingMode::PetCustom,
        None,
        None,
        pet.per_meter,
        pet.per_meter * meters,
        qty,
    ))
}

fn price_solvent(book: &PriceBook, width: i64, qty: i64) -> PricingOutcome<Pricing> {
    require_positive(Axis::Width, width)?;

    // Solvent rolls are always printed at the table's single band height.
    let band = *book.bands.solvent.smallest();
    let per_item = band_price(width, band.width, band);

    Ok(Pricing::new(
        PricingMode::Solvent,
        None,
        Some(band.width),
        band.price,
        per_item,
        qty,
    ))
}

// =============================================================================
// Water-Table Materials
// =============================================================================

/// A roll pricing for one side matched against one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RollCandidate {
    axis: Axis,
    band: Band,
    per_item: Won,
}

impl RollCandidate {
    fn into_pricing(self, qty: i64) -> Pricing {
        Pricing::new(
            PricingMode::Roll,
            Some(self.axis),
            Some(self.band.width),
            self.band.price,
            self.per_item,
            qty,
        )
    }
}

fn price_water(
    book: &PriceBook,
    exact_preferred: bool,
    width: i64,
    height: i64,
    qty: i64,
    hint: RollHint,
) -> PricingOutcome<Pricing> {
    require_positive(Axis::Width, width)?;
    require_positive(Axis::Height, height)?;

    let water = &book.bands.water;

    // Precedence matters at the boundaries: short side first, then area,
    // then the candidate search, then the plain roll.
    if exact_preferred {
        if let Some(candidate) = short_side_roll(water, width, height) {
            trace!(?candidate, "Short side rounded up to band");
            return Ok(candidate.into_pricing(qty));
        }
    }

    if height > ROLL_MAX_MM {
        let rate = book.area.tarp;
        return Ok(Pricing::new(
            PricingMode::Area,
            None,
            None,
            rate,
            area_price(width, height, rate),
            qty,
        ));
    }

    if exact_preferred {
        let candidates = exact_candidates(water, width, height, hint);
        trace!(count = candidates.len(), "Exact band candidates");
        if let Some(best) = select_candidate(candidates) {
            return Ok(best.into_pricing(qty));
        }
    }

    roll_fallback(water, width, height, hint).map(|c| c.into_pricing(qty))
}

/// One side ≤ 900 while the other is longer than any roll.
///
/// The short side must then be covered by the roll width, so it rounds UP to
/// the nearest band at most 900 instead of down.
fn short_side_roll(water: &BandTable, width: i64, height: i64) -> Option<RollCandidate> {
    let (short, long, axis) = if height <= width {
        (height, width, Axis::Height)
    } else {
        (width, height, Axis::Width)
    };

    if short <= 0 || short > BAND_SPLIT_MM || long <= ROLL_MAX_MM {
        return None;
    }

    let band = ceil_band_within(short, BAND_SPLIT_MM, water)?;
    Some(RollCandidate {
        axis,
        band,
        per_item: raw_band_price(long, short, band),
    })
}

/// Builds the candidate list for exact-preferred materials.
///
/// Order: matched width, matched height, exact width band, exact height band.
/// A W or H hint keeps only that side's candidates.
fn exact_candidates(water: &BandTable, width: i64, height: i64, hint: RollHint) -> Vec<RollCandidate> {
    let sides = [(Axis::Width, width, height), (Axis::Height, height, width)];
    let allowed = |axis: Axis| hint.axis().map_or(true, |forced| forced == axis);

    let matched = sides.iter().filter(|(axis, ..)| allowed(*axis)).filter_map(|&(axis, side, other)| {
        let band_width = water.pick(side);
        if side > band_width || band_width > ROLL_MAX_MM {
            return None;
        }
        let price = water.unit_price(band_width)?;
        let band = Band {
            width: band_width,
            price,
        };
        Some(RollCandidate {
            axis,
            band,
            per_item: band_price(other, side, band),
        })
    });

    let exact = sides.iter().filter(|(axis, ..)| allowed(*axis)).filter_map(|&(axis, side, other)| {
        if side > ROLL_MAX_MM {
            return None;
        }
        let price = water.unit_price(side)?;
        let band = Band { width: side, price };
        Some(RollCandidate {
            axis,
            band,
            per_item: band_price(other, side, band),
        })
    });

    matched.chain(exact).collect()
}

/// Picks the candidate with the narrowest band.
///
/// `min_by_key` returns the first of equal minima, so ties keep list order.
fn select_candidate(candidates: Vec<RollCandidate>) -> Option<RollCandidate> {
    candidates.into_iter().min_by_key(|c| c.band.width)
}

/// Band-matches a single side, or `None` when the matched band has no price.
fn roll_on(water: &BandTable, axis: Axis, side: i64, other: i64) -> Option<RollCandidate> {
    let band_width = water.pick(side);
    let price = water.unit_price(band_width)?;
    let band = Band {
        width: band_width,
        price,
    };
    Some(RollCandidate {
        axis,
        band,
        per_item: band_price(other, side, band),
    })
}

fn roll_fallback(water: &BandTable, width: i64, height: i64, hint: RollHint) -> PricingOutcome<RollCandidate> {
    let by_width = roll_on(water, Axis::Width, width, height);
    let by_height = roll_on(water, Axis::Height, height, width);

    match hint {
        RollHint::Width => by_width.ok_or(NotComputable::NoBand { axis: Axis::Width }),
        RollHint::Height => by_height.ok_or(NotComputable::NoBand { axis: Axis::Height }),
        RollHint::Auto => match (by_width, by_height) {
            (Some(w), Some(h)) => Ok(if w.per_item <= h.per_item { w } else { h }),
            (Some(only), None) | (None, Some(only)) => Ok(only),
            (None, None) => Err(NotComputable::NoBand { axis: Axis::Width }),
        },
    }
}

// =============================================================================
// Price Formulas
// =============================================================================

/// Roll price with the effective-side rule.
///
/// A side ≤ 900 is billed at its raw length; a longer side is billed at the
/// full matched band. Either way the cost is scaled by `price / band`.
fn band_price(other: i64, side: i64, band: Band) -> Won {
    let effective = if side <= BAND_SPLIT_MM { side } else { band.width };
    raw_band_price(other, effective, band)
}

/// `round(other × side × price / (band × 1000))`
fn raw_band_price(other: i64, side: i64, band: Band) -> Won {
    let numerator = other as i128 * side as i128 * band.price.amount() as i128;
    let denominator = band.width as i128 * MM_PER_M as i128;
    Won::new(round_div(numerator, denominator))
}

/// `round(w × h / 1e6 × rate)`
fn area_price(width: i64, height: i64, rate: Won) -> Won {
    let numerator = width as i128 * height as i128 * rate.amount() as i128;
    Won::new(round_div(numerator, MM2_PER_M2))
}

// =============================================================================
// Unit Tests
// =============================================================================
