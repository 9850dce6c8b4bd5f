//! # Quote Aggregation
//!
//! Combines the priced line item with add-ons into the final quote.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QuoteRequest                                                           │
//! │       │  clamp quantity & extra counts                                  │
//! │       ▼                                                                 │
//! │  compute_pricing ──► base_raw = pricing.total                           │
//! │       │                   │                                             │
//! │       │                   ▼                                             │
//! │       │        base = raw > 0 ? max(raw, 25,000) : 0                    │
//! │       │                                                                 │
//! │  per-item add-ons × qty:                                                │
//! │    post-process   (not for bulletin / sticker)                          │
//! │    accessory      (suction cup, banner group only)                      │
//! │    delivery       (not for bulletin)                                    │
//! │    installation   (not for bulletin)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  supply = base + Σ add-ons ──► vat = round(supply × 10%) ──► total     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! VAT is always computed on the post-floor supply.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::PricingOutcome;
use crate::money::Won;
use crate::post_process::{extra_unit_cost, PostProcess};
use crate::pricing::compute_pricing;
use crate::tables::{PriceBook, SupplyRules};
use crate::types::{Material, Pricing, ProductGroup, RollHint, VatRate};
use crate::validation::{clamp_extra_count, clamp_quantity};

// =============================================================================
// Add-On Selections
// =============================================================================

/// An accessory shipped with every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Accessory {
    /// 큐방 - suction cups; `extra` beyond the four free per item.
    SuctionCup { extra: i64 },
    /// 로프
    Rope,
    /// 배너거치대(실내용)
    IndoorStand,
    /// 배너거치대(실외용)
    OutdoorStand,
}

impl Accessory {
    pub fn label(&self) -> &'static str {
        match self {
            Accessory::SuctionCup { .. } => "큐방",
            Accessory::Rope => "로프",
            Accessory::IndoorStand => "배너거치대(실내용)",
            Accessory::OutdoorStand => "배너거치대(실외용)",
        }
    }

    /// Per-item surcharge. Suction cups follow the eyelet rule and are only
    /// charged within the banner group; other accessories are quoted separately.
    pub fn unit_cost(&self, book: &PriceBook, material: Material) -> Won {
        match self {
            Accessory::SuctionCup { extra } if material.group() == ProductGroup::Banner => {
                extra_unit_cost(book, *extra)
            }
            _ => Won::zero(),
        }
    }
}

/// How the order is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Delivery {
    /// 시내
    InCity,
    /// 시외
    OutOfCity,
    /// 기타 - amount per item typed by the customer.
    Other { amount: Won },
}

impl Delivery {
    pub fn label(&self) -> &'static str {
        match self {
            Delivery::InCity => "시내",
            Delivery::OutOfCity => "시외",
            Delivery::Other { .. } => "기타",
        }
    }

    pub fn unit_cost(&self, book: &PriceBook) -> Won {
        match self {
            Delivery::InCity => book.delivery.in_city,
            Delivery::OutOfCity => book.delivery.out_of_city,
            Delivery::Other { amount } => (*amount).max(Won::zero()),
        }
    }
}

/// Installation work, quoted per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Install {
    /// 기타 - amount per item typed by the customer.
    Other { amount: Won },
}

impl Install {
    pub fn label(&self) -> &'static str {
        match self {
            Install::Other { .. } => "기타",
        }
    }

    pub fn unit_cost(&self) -> Won {
        match self {
            Install::Other { amount } => (*amount).max(Won::zero()),
        }
    }
}

// =============================================================================
// Request
// =============================================================================

/// Everything the quote form sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub material: Material,
    pub width: i64,
    pub height: i64,
    pub quantity: i64,
    #[serde(default)]
    pub roll_hint: RollHint,
    #[serde(default)]
    pub post_process: Option<PostProcess>,
    #[serde(default)]
    pub accessory: Option<Accessory>,
    #[serde(default)]
    pub delivery: Option<Delivery>,
    #[serde(default)]
    pub install: Option<Install>,
}

impl QuoteRequest {
    /// A request with no add-ons.
    pub fn new(material: Material, width: i64, height: i64, quantity: i64) -> Self {
        QuoteRequest {
            material,
            width,
            height,
            quantity,
            roll_hint: RollHint::Auto,
            post_process: None,
            accessory: None,
            delivery: None,
            install: None,
        }
    }

    /// Clamps the quantity and extra unit counts, and drops add-ons the
    /// material does not offer.
    pub fn normalized(&self, book: &PriceBook) -> Self {
        let post_process = self
            .post_process
            .filter(|_| self.material.offers_post_process())
            .map(|p| match p {
                PostProcess::Eyelet { extra } => PostProcess::Eyelet {
                    extra: clamp_extra_count(book, extra),
                },
                PostProcess::StringHook { extra } => PostProcess::StringHook {
                    extra: clamp_extra_count(book, extra),
                },
                other => other,
            });

        let accessory = self.accessory.map(|a| match a {
            Accessory::SuctionCup { extra } => Accessory::SuctionCup {
                extra: clamp_extra_count(book, extra),
            },
            other => other,
        });

        let bundled = self.material.includes_installation();

        QuoteRequest {
            quantity: clamp_quantity(book, self.quantity),
            post_process,
            accessory,
            delivery: self.delivery.filter(|_| !bundled),
            install: self.install.filter(|_| !bundled),
            ..self.clone()
        }
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Add-on totals (already multiplied by quantity).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Surcharges {
    pub post_process: Won,
    pub accessory: Won,
    pub delivery: Won,
    pub install: Won,
}

impl Surcharges {
    pub fn sum(&self) -> Won {
        self.post_process + self.accessory + self.delivery + self.install
    }
}

/// The priced quote, ready to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBreakdown {
    /// Line item total before the floor.
    pub base_raw: Won,
    /// Line item total after the floor.
    pub base: Won,
    /// True when the floor raised the base. Display only.
    pub minimum_applied: bool,
    pub surcharges: Surcharges,
    /// Supply subtotal (공급가 합계).
    pub supply: Won,
    /// Rate the VAT line was charged at.
    pub vat_rate: VatRate,
    pub vat: Won,
    /// Grand total (supply + VAT).
    pub total: Won,
}

impl QuoteBreakdown {
    /// Applies the supply floor, sums the add-ons and adds VAT.
    ///
    /// ## Example
    /// ```rust
    /// use signquote_core::quote::{QuoteBreakdown, Surcharges};
    /// use signquote_core::{PriceBook, Won};
    ///
    /// let rules = PriceBook::default().supply;
    /// let b = QuoteBreakdown::aggregate(&rules, Won::new(7_208), Surcharges::default());
    /// assert_eq!(b.base.amount(), 25_000);
    /// assert!(b.minimum_applied);
    /// assert_eq!(b.vat.amount(), 2_500);
    /// assert_eq!(b.total.amount(), 27_500);
    /// ```
    pub fn aggregate(rules: &SupplyRules, base_raw: Won, surcharges: Surcharges) -> Self {
        let base = apply_supply_floor(base_raw, rules.minimum);
        let supply = base + surcharges.sum();
        let vat = supply.calculate_vat(rules.vat);

        QuoteBreakdown {
            base_raw,
            base,
            minimum_applied: base != base_raw,
            surcharges,
            supply,
            vat_rate: rules.vat,
            vat,
            total: supply + vat,
        }
    }
}

/// Raises a nonzero base to the minimum supply amount.
///
/// A zero base means nothing was priced and stays zero.
pub fn apply_supply_floor(base_raw: Won, minimum: Won) -> Won {
    if base_raw.is_positive() {
        base_raw.max(minimum)
    } else {
        Won::zero()
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A complete quote: the normalized request, its pricing and the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub request: QuoteRequest,
    pub pricing: Pricing,
    pub breakdown: QuoteBreakdown,
}

/// Prices a request end to end.
///
/// ## Returns
/// - `Ok(Quote)` when the line item can be priced
/// - `Err(NotComputable)` otherwise; add-ons are never quoted without a base
pub fn build_quote(book: &PriceBook, request: &QuoteRequest) -> PricingOutcome<Quote> {
    let request = request.normalized(book);
    let qty = request.quantity;

    let pricing = compute_pricing(
        book,
        request.material,
        request.width,
        request.height,
        qty,
        request.roll_hint,
    )?;

    let post_per_item = request
        .post_process
        .map(|p| p.unit_cost(book, Some(&pricing), request.width, request.height))
        .unwrap_or_default();
    let accessory_per_item = request
        .accessory
        .map(|a| a.unit_cost(book, request.material))
        .unwrap_or_default();
    let delivery_per_item = request.delivery.map(|d| d.unit_cost(book)).unwrap_or_default();
    let install_per_item = request.install.map(|i| i.unit_cost()).unwrap_or_default();

    let surcharges = Surcharges {
        post_process: post_per_item * qty,
        accessory: accessory_per_item * qty,
        delivery: delivery_per_item * qty,
        install: install_per_item * qty,
    };

    let breakdown = QuoteBreakdown::aggregate(&book.supply, pricing.total, surcharges);

    debug!(
        material = request.material.id(),
        qty,
        base = breakdown.base.amount(),
        minimum_applied = breakdown.minimum_applied,
        supply = breakdown.supply.amount(),
        total = breakdown.total.amount(),
        "Quote built"
    );

    Ok(Quote {
        request,
        pricing,
        breakdown,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotComputable;
    use crate::types::PricingMode;
    use proptest::prelude::*;

    fn rules() -> SupplyRules {
        PriceBook::default().supply
    }

    proptest! {
        #[test]
        fn test_floor_raises_small_nonzero_base(raw in 1i64..25_000) {
            let b = QuoteBreakdown::aggregate(&rules(), Won::new(raw), Surcharges::default());
            prop_assert_eq!(b.base.amount(), 25_000);
            prop_assert!(b.minimum_applied);
        }

        #[test]
        fn test_floor_keeps_base_at_or_above_minimum(raw in 25_000i64..=100_000_000) {
            let b = QuoteBreakdown::aggregate(&rules(), Won::new(raw), Surcharges::default());
            prop_assert_eq!(b.base.amount(), raw);
            prop_assert!(!b.minimum_applied);
        }
    }

    #[test]
    fn test_floor_leaves_zero_and_large_bases() {
        let b = QuoteBreakdown::aggregate(&rules(), Won::zero(), Surcharges::default());
        assert!(b.base.is_zero());
        assert!(!b.minimum_applied);
        assert!(b.total.is_zero());

        let b = QuoteBreakdown::aggregate(&rules(), Won::new(25_000), Surcharges::default());
        assert!(!b.minimum_applied);

        let b = QuoteBreakdown::aggregate(&rules(), Won::new(120_000), Surcharges::default());
        assert_eq!(b.base.amount(), 120_000);
        assert!(!b.minimum_applied);
    }

    #[test]
    fn test_vat_on_post_floor_supply() {
        let surcharges = Surcharges {
            post_process: Won::new(3_000),
            accessory: Won::zero(),
            delivery: Won::new(10_000),
            install: Won::new(5),
        };
        let b = QuoteBreakdown::aggregate(&rules(), Won::new(7_208), surcharges);
        assert_eq!(b.supply.amount(), 25_000 + 13_005);
        assert_eq!(b.vat.amount(), 3_801);
        assert_eq!(b.total.amount(), 38_005 + 3_801);
    }

    #[test]
    fn test_build_quote_roll_with_floor() {
        let book = PriceBook::default();
        let quote = build_quote(&book, &QuoteRequest::new(Material::WaterBanner, 1000, 901, 1)).unwrap();
        assert_eq!(quote.pricing.mode, PricingMode::Roll);
        assert_eq!(quote.breakdown.base_raw.amount(), 7_208);
        assert_eq!(quote.breakdown.base.amount(), 25_000);
        assert!(quote.breakdown.minimum_applied);
        assert_eq!(quote.breakdown.total.amount(), 27_500);
    }

    #[test]
    fn test_build_quote_with_add_ons() {
        let book = PriceBook::default();
        let request = QuoteRequest {
            post_process: Some(PostProcess::WoodRope),
            delivery: Some(Delivery::InCity),
            install: Some(Install::Other {
                amount: Won::new(5_000),
            }),
            ..QuoteRequest::new(Material::WaterBanner, 5000, 1200, 2)
        };
        let quote = build_quote(&book, &request).unwrap();

        // 5000×1200: height matches the 1200 band → 5000 × 1200 × 10000 / 1.2e6
        assert_eq!(quote.pricing.matched_band, Some(1200));
        assert_eq!(quote.pricing.per_item.amount(), 50_000);
        assert_eq!(quote.breakdown.base.amount(), 100_000);
        // Wood batten billed at the 1200 band: 2000 + 3 × 1000
        assert_eq!(quote.breakdown.surcharges.post_process.amount(), 10_000);
        assert_eq!(quote.breakdown.surcharges.delivery.amount(), 20_000);
        assert_eq!(quote.breakdown.surcharges.install.amount(), 10_000);
        assert_eq!(quote.breakdown.supply.amount(), 140_000);
        assert_eq!(quote.breakdown.vat.amount(), 14_000);
        assert_eq!(quote.breakdown.total.amount(), 154_000);
    }

    #[test]
    fn test_suction_cup_only_in_banner_group() {
        let book = PriceBook::default();
        let cups = Some(Accessory::SuctionCup { extra: 2 });

        let banner = QuoteRequest {
            accessory: cups,
            ..QuoteRequest::new(Material::PetBanner, 600, 1800, 3)
        };
        let quote = build_quote(&book, &banner).unwrap();
        assert_eq!(quote.breakdown.surcharges.accessory.amount(), 3_000);

        let tarp = QuoteRequest {
            accessory: cups,
            ..QuoteRequest::new(Material::WaterBanner, 1000, 1000, 3)
        };
        let quote = build_quote(&book, &tarp).unwrap();
        assert!(quote.breakdown.surcharges.accessory.is_zero());
    }

    #[test]
    fn test_bulletin_drops_post_delivery_and_install() {
        let book = PriceBook::default();
        let request = QuoteRequest {
            post_process: Some(PostProcess::Eyelet { extra: 10 }),
            delivery: Some(Delivery::OutOfCity),
            install: Some(Install::Other {
                amount: Won::new(9_000),
            }),
            ..QuoteRequest::new(Material::BulletinBanner, 7000, 900, 2)
        };
        let quote = build_quote(&book, &request).unwrap();
        assert_eq!(quote.request.post_process, None);
        assert_eq!(quote.request.delivery, None);
        assert_eq!(quote.breakdown.surcharges, Surcharges::default());
        assert_eq!(quote.breakdown.supply.amount(), 100_000);
        assert_eq!(quote.breakdown.total.amount(), 110_000);
    }

    #[test]
    fn test_sticker_has_no_post_process() {
        let book = PriceBook::default();
        let request = QuoteRequest {
            post_process: Some(PostProcess::DoubleTape),
            ..QuoteRequest::new(Material::SolventSheet, 1000, 1000, 1)
        };
        let quote = build_quote(&book, &request).unwrap();
        assert!(quote.breakdown.surcharges.post_process.is_zero());
        assert_eq!(quote.breakdown.base.amount(), 40_000);
    }

    #[test]
    fn test_normalization_clamps_counts_and_quantity() {
        let book = PriceBook::default();
        let request = QuoteRequest {
            post_process: Some(PostProcess::Eyelet { extra: 5_000 }),
            accessory: Some(Accessory::SuctionCup { extra: -4 }),
            ..QuoteRequest::new(Material::ClothBanner, 600, 1800, 0)
        };
        let normalized = request.normalized(&book);
        assert_eq!(normalized.quantity, 1);
        assert_eq!(normalized.post_process, Some(PostProcess::Eyelet { extra: 1000 }));
        assert_eq!(normalized.accessory, Some(Accessory::SuctionCup { extra: 0 }));
    }

    #[test]
    fn test_not_computable_propagates() {
        let book = PriceBook::default();
        let request = QuoteRequest::new(Material::WaterBanner, 0, 900, 1);
        assert!(matches!(
            build_quote(&book, &request),
            Err(NotComputable::MissingDimension { .. })
        ));
    }

    #[test]
    fn test_request_from_ui_json() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{
                "material": "water-banner",
                "width": 1000,
                "height": 901,
                "quantity": 1,
                "rollHint": "H",
                "delivery": { "kind": "other", "amount": 15000 }
            }"#,
        )
        .unwrap();
        assert_eq!(request.roll_hint, RollHint::Height);
        assert_eq!(request.delivery, Some(Delivery::Other { amount: Won::new(15_000) }));
        assert_eq!(request.post_process, None);
    }
}
