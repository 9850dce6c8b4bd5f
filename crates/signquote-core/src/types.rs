//! # Domain Types
//!
//! Core domain types used throughout the quotation engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductGroup   │   │    Material     │   │    Pricing      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Banner         │◄──│  group()        │   │  mode           │       │
//! │  │  Tarp           │   │  label()        │   │  matched_band   │       │
//! │  │  Sticker        │   │  locks()        │   │  per_item       │       │
//! │  └─────────────────┘   └─────────────────┘   │  total          │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    VatRate      │   │    RollHint     │   │  PricingMode    │       │
//! │  │  bps (u32)      │   │  Auto / W / H   │   │  fixed … roll   │       │
//! │  │  1000 = 10%     │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type here is an immutable value; nothing outlives a single pricing call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Won;

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so the Korean standard rate of 10% is 1000 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatRate(u32);

impl VatRate {
    /// Korean standard VAT (10%).
    pub const STANDARD: VatRate = VatRate(1000);

    /// Creates a VAT rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::STANDARD
    }
}

/// Percent form: `1000` bps prints as `10%`, `1050` as `10.5%`.
impl fmt::Display for VatRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{whole}%")
        } else {
            let frac = format!("{frac:02}");
            write!(f, "{whole}.{}%", frac.trim_end_matches('0'))
        }
    }
}

// =============================================================================
// Product Group
// =============================================================================

/// The product family a material is sold under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductGroup {
    /// Stand banners (PET, non-woven, cloth).
    Banner,
    /// Tarpaulin banners hung on walls and bulletin frames.
    Tarp,
    /// Sticker and sheet film.
    Sticker,
}

impl ProductGroup {
    /// Every group, in the order the quote form shows them.
    pub const ALL: [ProductGroup; 3] = [ProductGroup::Tarp, ProductGroup::Banner, ProductGroup::Sticker];

    /// Korean label shown on the group selector.
    pub fn label(&self) -> &'static str {
        match self {
            ProductGroup::Banner => "배너",
            ProductGroup::Tarp => "현수막",
            ProductGroup::Sticker => "스티커/시트지",
        }
    }

    /// Materials belonging to this group; the first one is the group default.
    pub fn materials(&self) -> &'static [Material] {
        match self {
            ProductGroup::Banner => &[Material::PetBanner, Material::NonWovenBanner, Material::ClothBanner],
            ProductGroup::Tarp => &[Material::WaterBanner, Material::SolventBanner, Material::BulletinBanner],
            ProductGroup::Sticker => &[Material::SolventSheet, Material::VehicleSheet, Material::PvcCal],
        }
    }
}

// =============================================================================
// Material
// =============================================================================

/// A printable material.
///
/// The serialized form is the kebab-case identifier the UI sends
/// (`"water-banner"`, `"pet-banner"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Material {
    /// 수성현수막 - water-based ink on tarpaulin.
    WaterBanner,
    /// 솔벤현수막 - solvent ink, always 900mm tall.
    SolventBanner,
    /// 게시대현수막 - fixed 7000×900 bulletin frame banner, installation included.
    BulletinBanner,
    /// PET배너 - PET film stand banner.
    PetBanner,
    /// 부직포배너 - non-woven stand banner.
    NonWovenBanner,
    /// 현수막배너 - stand banner printed on tarpaulin cloth.
    ClothBanner,
    /// 솔벤시트 - solvent printable sheet.
    SolventSheet,
    /// 차량용시트 - vehicle wrap sheet.
    VehicleSheet,
    /// PVC캘 - calendered PVC film.
    PvcCal,
}

/// How a material is priced. Static per material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingRule {
    /// Flat per-item price, size locked.
    Fixed,
    /// Standard size flat price, otherwise per started metre of height.
    Pet,
    /// Single 900mm band.
    Solvent,
    /// Pure area price.
    StickerArea,
    /// Water-table bands; `exact_preferred` enables the candidate search.
    Water { exact_preferred: bool },
}

impl Material {
    /// Every material, grouped in display order.
    pub const ALL: [Material; 9] = [
        Material::WaterBanner,
        Material::SolventBanner,
        Material::BulletinBanner,
        Material::PetBanner,
        Material::NonWovenBanner,
        Material::ClothBanner,
        Material::SolventSheet,
        Material::VehicleSheet,
        Material::PvcCal,
    ];

    /// Returns the product group this material belongs to.
    pub fn group(&self) -> ProductGroup {
        match self {
            Material::WaterBanner | Material::SolventBanner | Material::BulletinBanner => ProductGroup::Tarp,
            Material::PetBanner | Material::NonWovenBanner | Material::ClothBanner => ProductGroup::Banner,
            Material::SolventSheet | Material::VehicleSheet | Material::PvcCal => ProductGroup::Sticker,
        }
    }

    /// Returns the pricing rule the engine dispatches on.
    pub fn pricing_rule(&self) -> PricingRule {
        match self {
            Material::BulletinBanner => PricingRule::Fixed,
            Material::PetBanner => PricingRule::Pet,
            Material::SolventBanner => PricingRule::Solvent,
            Material::SolventSheet | Material::VehicleSheet | Material::PvcCal => PricingRule::StickerArea,
            Material::WaterBanner | Material::ClothBanner => PricingRule::Water { exact_preferred: true },
            Material::NonWovenBanner => PricingRule::Water { exact_preferred: false },
        }
    }

    /// Returns true for sticker/sheet materials.
    #[inline]
    pub fn is_sticker(&self) -> bool {
        self.group() == ProductGroup::Sticker
    }

    /// Post-processing is not offered for bulletin banners or stickers.
    #[inline]
    pub fn offers_post_process(&self) -> bool {
        !(self.is_sticker() || *self == Material::BulletinBanner)
    }

    /// Delivery and installation are bundled into the bulletin banner price.
    #[inline]
    pub fn includes_installation(&self) -> bool {
        *self == Material::BulletinBanner
    }

    /// Kebab-case identifier, identical to the serialized form.
    pub fn id(&self) -> &'static str {
        match self {
            Material::WaterBanner => "water-banner",
            Material::SolventBanner => "solvent-banner",
            Material::BulletinBanner => "bulletin-banner",
            Material::PetBanner => "pet-banner",
            Material::NonWovenBanner => "non-woven-banner",
            Material::ClothBanner => "cloth-banner",
            Material::SolventSheet => "solvent-sheet",
            Material::VehicleSheet => "vehicle-sheet",
            Material::PvcCal => "pvc-cal",
        }
    }

    /// Korean label printed on the quote.
    pub fn label(&self) -> &'static str {
        match self {
            Material::WaterBanner => "수성현수막",
            Material::SolventBanner => "솔벤현수막",
            Material::BulletinBanner => "게시대현수막",
            Material::PetBanner => "PET배너",
            Material::NonWovenBanner => "부직포배너",
            Material::ClothBanner => "현수막배너",
            Material::SolventSheet => "솔벤시트",
            Material::VehicleSheet => "차량용시트",
            Material::PvcCal => "PVC캘",
        }
    }

    /// Which size inputs the form locks for this material.
    ///
    /// `custom_size` only matters for the banner group, where the standard
    /// 600×1800 size is locked unless the customer asks for a custom size.
    pub fn locks(&self, custom_size: bool) -> DimensionLocks {
        match self {
            Material::BulletinBanner => DimensionLocks::both(7000, 900),
            Material::SolventBanner => DimensionLocks {
                width: None,
                height: Some(900),
            },
            m if m.group() == ProductGroup::Banner && !custom_size => DimensionLocks::both(600, 1800),
            _ => DimensionLocks::default(),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Material {
    type Err = ValidationError;

    /// Accepts the kebab-case identifier or the Korean label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Material::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(needle) || m.label() == needle)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "material".to_string(),
                allowed: Material::ALL.iter().map(|m| m.id().to_string()).collect(),
            })
    }
}

/// Size inputs fixed by the material. `Some(mm)` means locked to that value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DimensionLocks {
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl DimensionLocks {
    const fn both(width: i64, height: i64) -> Self {
        DimensionLocks {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Replaces locked axes with their fixed values.
    pub fn apply(&self, width: i64, height: i64) -> (i64, i64) {
        (self.width.unwrap_or(width), self.height.unwrap_or(height))
    }
}

// =============================================================================
// Axis & Roll Hint
// =============================================================================

/// A side of the printed piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Axis {
    #[serde(rename = "W")]
    Width,
    #[serde(rename = "H")]
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Which side the roll width is matched against in roll pricing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RollHint {
    /// Try both sides and bill the cheaper one.
    #[default]
    #[serde(rename = "AUTO")]
    Auto,
    /// Match the width against the roll.
    #[serde(rename = "W")]
    Width,
    /// Match the height against the roll.
    #[serde(rename = "H")]
    Height,
}

impl RollHint {
    /// Returns the forced axis, or `None` for AUTO.
    pub fn axis(&self) -> Option<Axis> {
        match self {
            RollHint::Auto => None,
            RollHint::Width => Some(Axis::Width),
            RollHint::Height => Some(Axis::Height),
        }
    }
}

impl FromStr for RollHint {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "AUTO" => Ok(RollHint::Auto),
            "W" | "WIDTH" => Ok(RollHint::Width),
            "H" | "HEIGHT" => Ok(RollHint::Height),
            _ => Err(ValidationError::NotAllowed {
                field: "roll".to_string(),
                allowed: vec!["AUTO".to_string(), "W".to_string(), "H".to_string()],
            }),
        }
    }
}

// =============================================================================
// Pricing Result
// =============================================================================

/// Which pricing path produced a [`Pricing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PricingMode {
    Fixed,
    PetStandard,
    PetCustom,
    Solvent,
    StickerArea,
    Area,
    Roll,
}

/// A priced line item.
///
/// ## Invariant
/// `total == per_item × quantity`. Rounding happens once, on `per_item`,
/// before the multiplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub mode: PricingMode,
    /// Side matched against the roll (roll mode only).
    pub orientation: Option<Axis>,
    /// Standard band actually billed, when the mode uses one.
    pub matched_band: Option<i64>,
    /// Unit price applied: per metre for bands, per m² for area, per item for fixed.
    pub unit_price: Won,
    pub per_item: Won,
    pub quantity: i64,
    pub total: Won,
}

impl Pricing {
    /// Builds a pricing whose total is derived from `per_item`.
    pub(crate) fn new(
        mode: PricingMode,
        orientation: Option<Axis>,
        matched_band: Option<i64>,
        unit_price: Won,
        per_item: Won,
        quantity: i64,
    ) -> Self {
        Pricing {
            mode,
            orientation,
            matched_band,
            unit_price,
            per_item,
            quantity,
            total: per_item.multiply_quantity(quantity),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
