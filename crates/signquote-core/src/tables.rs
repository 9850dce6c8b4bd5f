//! # Price Book
//!
//! Every unit price, band list, flat rate and limit the engine reads.
//!
//! The price book is built once at start (defaults, or a TOML document) and
//! passed by reference into the pure pricing functions. Nothing mutates it
//! afterwards.
//!
//! ## Document Format
//! ```toml
//! [bands]
//! water = [
//!   { width = 300, price = 7000 },
//!   { width = 1000, price = 8000 },
//! ]
//! solvent = [{ width = 900, price = 15000 }]
//! sticker_rolls = [635, 1050, 1270, 1500]
//!
//! [supply]
//! minimum = 25000
//! vat = 1000      # basis points
//! ```
//! Sections and fields left out keep their defaults.

use serde::{Deserialize, Serialize};

use crate::band::pick_band;
use crate::error::{ConfigError, ValidationError, ValidationResult};
use crate::money::Won;
use crate::types::VatRate;

// =============================================================================
// Bands
// =============================================================================

/// A standard roll width and its unit price per linear metre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// Roll width in mm.
    pub width: i64,
    /// Price per linear metre at this width.
    pub price: Won,
}

impl Band {
    pub const fn new(width: i64, price: i64) -> Self {
        Band {
            width,
            price: Won::new(price),
        }
    }
}

/// A non-empty set of bands with unique widths, kept sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Band>", into = "Vec<Band>")]
pub struct BandTable {
    ascending: Vec<Band>,
}

impl BandTable {
    /// Builds a table from bands in any order.
    ///
    /// ## Rules
    /// - At least one band
    /// - Widths positive and unique
    /// - Prices positive
    pub fn new(mut bands: Vec<Band>) -> ValidationResult<Self> {
        if bands.is_empty() {
            return Err(ValidationError::Required {
                field: "bands".to_string(),
            });
        }

        bands.sort_by_key(|b| b.width);

        for band in &bands {
            if band.width <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: "band width".to_string(),
                });
            }
            if !band.price.is_positive() {
                return Err(ValidationError::MustBePositive {
                    field: format!("price of band {}", band.width),
                });
            }
        }

        if let Some(pair) = bands.windows(2).find(|pair| pair[0].width == pair[1].width) {
            return Err(ValidationError::Duplicate {
                field: "band".to_string(),
                value: pair[0].width.to_string(),
            });
        }

        Ok(BandTable { ascending: bands })
    }

    /// Bands from narrowest to widest.
    pub fn ascending(&self) -> impl DoubleEndedIterator<Item = &Band> + '_ {
        self.ascending.iter()
    }

    /// Bands from widest to narrowest.
    pub fn descending(&self) -> impl Iterator<Item = &Band> + '_ {
        self.ascending.iter().rev()
    }

    /// Narrowest band.
    pub fn smallest(&self) -> &Band {
        &self.ascending[0]
    }

    /// Widest band.
    pub fn largest(&self) -> &Band {
        &self.ascending[self.ascending.len() - 1]
    }

    /// Unit price of the band with exactly this width.
    pub fn unit_price(&self, width: i64) -> Option<Won> {
        self.ascending.iter().find(|b| b.width == width).map(|b| b.price)
    }

    /// Matches a measured side to a band; see [`pick_band`].
    pub fn pick(&self, h: i64) -> i64 {
        pick_band(h, self)
    }
}

impl TryFrom<Vec<Band>> for BandTable {
    type Error = ValidationError;

    fn try_from(bands: Vec<Band>) -> Result<Self, Self::Error> {
        BandTable::new(bands)
    }
}

impl From<BandTable> for Vec<Band> {
    fn from(table: BandTable) -> Self {
        table.ascending
    }
}

/// Band tables by ink type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandBook {
    /// Water-based and cloth banner bands, 300..1800mm.
    pub water: BandTable,
    /// Solvent banner: a single 900mm band.
    pub solvent: BandTable,
    /// Sticker roll widths. Guidance for dombo cutting only, never priced.
    pub sticker_rolls: Vec<i64>,
}

impl Default for BandBook {
    fn default() -> Self {
        BandBook {
            water: BandTable {
                ascending: vec![
                    Band::new(300, 7000),
                    Band::new(400, 7000),
                    Band::new(500, 7000),
                    Band::new(600, 7000),
                    Band::new(700, 7000),
                    Band::new(800, 7000),
                    Band::new(900, 7000),
                    Band::new(1000, 8000),
                    Band::new(1100, 10000),
                    Band::new(1200, 10000),
                    Band::new(1300, 15000),
                    Band::new(1400, 15000),
                    Band::new(1500, 15000),
                    Band::new(1600, 16000),
                    Band::new(1800, 17000),
                ],
            },
            solvent: BandTable {
                ascending: vec![Band::new(900, 15000)],
            },
            sticker_rolls: vec![635, 1050, 1270, 1500],
        }
    }
}

// =============================================================================
// Rates
// =============================================================================

/// Area unit prices, per square metre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaRates {
    /// Tarpaulin taller than the widest roll.
    pub tarp: Won,
    /// Sticker and sheet film.
    pub sticker: Won,
}

impl Default for AreaRates {
    fn default() -> Self {
        AreaRates {
            tarp: Won::new(11_000),
            sticker: Won::new(40_000),
        }
    }
}

/// PET banner pricing and manufacturing limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetRates {
    pub standard_width: i64,
    pub standard_height: i64,
    /// Flat price of the standard size.
    pub standard_price: Won,
    /// Price per started metre of height for custom sizes.
    pub per_meter: Won,
    pub max_width: i64,
    pub max_height: i64,
}

impl Default for PetRates {
    fn default() -> Self {
        PetRates {
            standard_width: 600,
            standard_height: 1800,
            standard_price: Won::new(40_000),
            per_meter: Won::new(20_000),
            max_width: 1800,
            max_height: 10_000,
        }
    }
}

/// Bulletin frame banner: flat price including installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletinRates {
    pub per_item: Won,
}

impl Default for BulletinRates {
    fn default() -> Self {
        BulletinRates {
            per_item: Won::new(50_000),
        }
    }
}

/// Post-processing and accessory surcharges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProcessRates {
    /// Eyelets / hooks / suction cups included per item.
    pub free_units: i64,
    /// Price of each unit beyond the free allowance.
    pub extra_unit: Won,
    /// Upper bound on extra units per item.
    pub max_extra: i64,
    /// Wood batten + rope up to 900mm.
    pub wood_rope_base: Won,
    /// Added per band step between 900 and 1800mm, and per 100mm above 1800mm.
    pub wood_rope_step: Won,
    /// Wood batten + rope price at 1800mm, before the per-100mm steps.
    pub wood_rope_long_base: Won,
    /// Sewing / tape price per started square metre.
    pub sew_tape_per_m2: Won,
    /// Sewing / tape minimum charge.
    pub sew_tape_minimum: Won,
}

impl Default for PostProcessRates {
    fn default() -> Self {
        PostProcessRates {
            free_units: 4,
            extra_unit: Won::new(500),
            max_extra: 1000,
            wood_rope_base: Won::new(2_000),
            wood_rope_step: Won::new(1_000),
            wood_rope_long_base: Won::new(10_000),
            sew_tape_per_m2: Won::new(1_000),
            sew_tape_minimum: Won::new(2_000),
        }
    }
}

/// Delivery flat rates, per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryRates {
    pub in_city: Won,
    pub out_of_city: Won,
}

impl Default for DeliveryRates {
    fn default() -> Self {
        DeliveryRates {
            in_city: Won::new(10_000),
            out_of_city: Won::new(20_000),
        }
    }
}

/// Supply floor and VAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyRules {
    /// Minimum billable base supply once a price exists.
    pub minimum: Won,
    pub vat: VatRate,
}

impl Default for SupplyRules {
    fn default() -> Self {
        SupplyRules {
            minimum: Won::new(25_000),
            vat: VatRate::STANDARD,
        }
    }
}

/// Input limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Global safety limit on either side, mm.
    pub max_mm: i64,
    pub max_quantity: i64,
    /// Margin kept on each side of a sticker roll for dombo cutting, mm.
    pub dombo_side_margin: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_mm: 100_000,
            max_quantity: 10_000,
            dombo_side_margin: 50,
        }
    }
}

// =============================================================================
// Price Book
// =============================================================================

/// All static pricing data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceBook {
    pub bands: BandBook,
    pub area: AreaRates,
    pub pet: PetRates,
    pub bulletin: BulletinRates,
    pub post: PostProcessRates,
    pub delivery: DeliveryRates,
    pub supply: SupplyRules,
    pub limits: Limits,
}

impl PriceBook {
    /// Parses and validates a TOML price book. Missing entries keep defaults.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let book: PriceBook = toml::from_str(document)?;
        book.validate()?;
        Ok(book)
    }

    /// Renders the price book as TOML (for `--print-pricebook`).
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Checks the cross-field rules serde cannot express.
    ///
    /// Band tables validate themselves on construction.
    pub fn validate(&self) -> ValidationResult<()> {
        let positive = [
            ("area.tarp", self.area.tarp),
            ("area.sticker", self.area.sticker),
            ("pet.standard_price", self.pet.standard_price),
            ("pet.per_meter", self.pet.per_meter),
            ("bulletin.per_item", self.bulletin.per_item),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, won)| !won.is_positive()) {
            return Err(ValidationError::MustBePositive {
                field: field.to_string(),
            });
        }

        if self.pet.max_width <= 0 || self.pet.max_height <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "pet limits".to_string(),
            });
        }

        if self.limits.max_mm <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "limits.max_mm".to_string(),
            });
        }

        if self.limits.max_quantity < 1 {
            return Err(ValidationError::OutOfRange {
                field: "limits.max_quantity".to_string(),
                min: 1,
                max: i64::MAX,
            });
        }

        if self.supply.vat.bps() > 10_000 {
            return Err(ValidationError::OutOfRange {
                field: "supply.vat".to_string(),
                min: 0,
                max: 10_000,
            });
        }

        if self.bands.sticker_rolls.iter().any(|&roll| roll <= 2 * self.limits.dombo_side_margin) {
            return Err(ValidationError::OutOfRange {
                field: "bands.sticker_rolls".to_string(),
                min: 2 * self.limits.dombo_side_margin + 1,
                max: self.limits.max_mm,
            });
        }

        Ok(())
    }

    /// Water-table band for a measured side (the matcher the UI and the
    /// wood+rope surcharge share).
    pub fn band_for_height(&self, h: i64) -> i64 {
        self.bands.water.pick(h)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_book_is_valid() {
        let book = PriceBook::default();
        assert!(book.validate().is_ok());
        assert_eq!(book.bands.water.ascending().count(), 15);
        assert_eq!(book.bands.water.smallest().width, 300);
        assert_eq!(book.bands.water.largest().width, 1800);
        assert_eq!(book.bands.solvent.smallest().price, Won::new(15_000));
    }

    #[test]
    fn test_band_table_sorts_and_rejects_bad_input() {
        let table = BandTable::new(vec![Band::new(1000, 8000), Band::new(300, 7000)]).unwrap();
        let widths: Vec<i64> = table.ascending().map(|b| b.width).collect();
        assert_eq!(widths, vec![300, 1000]);
        let widths: Vec<i64> = table.descending().map(|b| b.width).collect();
        assert_eq!(widths, vec![1000, 300]);

        assert!(BandTable::new(vec![]).is_err());
        assert!(BandTable::new(vec![Band::new(0, 7000)]).is_err());
        assert!(BandTable::new(vec![Band::new(900, 0)]).is_err());
        assert!(matches!(
            BandTable::new(vec![Band::new(900, 7000), Band::new(900, 8000)]),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_unit_price_lookup() {
        let water = PriceBook::default().bands.water;
        assert_eq!(water.unit_price(1000), Some(Won::new(8000)));
        assert_eq!(water.unit_price(1700), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let book = PriceBook::from_toml_str(
            r#"
            [supply]
            minimum = 30000

            [delivery]
            in_city = 12000
            "#,
        )
        .unwrap();

        assert_eq!(book.supply.minimum, Won::new(30_000));
        assert_eq!(book.supply.vat, VatRate::STANDARD);
        assert_eq!(book.delivery.in_city, Won::new(12_000));
        assert_eq!(book.delivery.out_of_city, Won::new(20_000));
        assert_eq!(book.bands, BandBook::default());
    }

    #[test]
    fn test_toml_band_table() {
        let book = PriceBook::from_toml_str(
            r#"
            [bands]
            solvent = [{ width = 900, price = 16000 }]
            water = [
              { width = 1000, price = 9000 },
              { width = 500, price = 7500 },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(book.bands.solvent.smallest().price, Won::new(16_000));
        assert_eq!(book.bands.water.smallest().width, 500);
        assert_eq!(book.bands.sticker_rolls, vec![635, 1050, 1270, 1500]);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(matches!(
            PriceBook::from_toml_str("[bands]\nwater = []\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            PriceBook::from_toml_str("[area]\ntarp = 0\n"),
            Err(ConfigError::Invalid(ValidationError::MustBePositive { .. }))
        ));
        assert!(matches!(
            PriceBook::from_toml_str("[supply]\nvat = 20000\n"),
            Err(ConfigError::Invalid(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let book = PriceBook::default();
        let rendered = book.to_toml_string().unwrap();
        assert!(rendered.contains("[supply]"));
        assert_eq!(PriceBook::from_toml_str(&rendered).unwrap(), book);
    }
}
