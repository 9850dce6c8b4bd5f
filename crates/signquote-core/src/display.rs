//! # Display Strings
//!
//! Korean text the quote sheet prints next to the numbers. Everything here
//! is derived from a [`Pricing`] or [`Quote`]; no rates are duplicated.

use serde::Serialize;
use ts_rs::TS;

use crate::money::{group_thousands, Won};
use crate::quote::Quote;
use crate::tables::PriceBook;
use crate::types::{Material, Pricing, PricingMode, ProductGroup};

/// Formats an amount with ko-KR thousands grouping, without the currency suffix.
///
/// ```rust
/// use signquote_core::display::format_won;
/// use signquote_core::Won;
///
/// assert_eq!(format_won(Won::new(25_000)), "25,000");
/// ```
pub fn format_won(amount: Won) -> String {
    group_thousands(amount.amount())
}

/// Metres billed by a PET custom pricing.
fn pet_meters(pricing: &Pricing) -> i64 {
    if pricing.unit_price.is_positive() {
        pricing.per_item.amount() / pricing.unit_price.amount()
    } else {
        0
    }
}

/// Short note on which rule priced the line item.
pub fn pricing_note(material: Material, pricing: &Pricing) -> String {
    let unit = format_won(pricing.unit_price);
    match pricing.mode {
        PricingMode::Fixed => format!("{}: 장당 {unit}원 (설치비 포함)", material.label()),
        PricingMode::PetStandard => format!("{}: 규격 600×1800 {unit}원/장", material.label()),
        PricingMode::PetCustom => format!("{}: 비규격 세로 1m당 {unit}원", material.label()),
        PricingMode::Solvent => format!(
            "{}: {}폭 단일, 단가 {unit}원/ｍ",
            material.label(),
            pricing.matched_band.unwrap_or_default()
        ),
        PricingMode::StickerArea => format!("{}: 면적단가({unit}원/㎡) 적용", material.label()),
        PricingMode::Area => format!("1800폭 초과: 면적단가({unit}원/㎡) 적용"),
        PricingMode::Roll => format!("{}폭 단가({unit}원/ｍ) 적용", pricing.matched_band.unwrap_or_default()),
    }
}

/// The "단가기준" row: the unit basis the price was computed on.
pub fn basis_text(material: Material, pricing: &Pricing) -> String {
    let unit = format_won(pricing.unit_price);
    let band = pricing.matched_band.unwrap_or_default();
    match pricing.mode {
        PricingMode::Fixed => format!("{} 장당 고정가 {unit}원", material.label()),
        PricingMode::PetStandard => format!("PET 규격 600×1800 · {unit}원/장"),
        PricingMode::PetCustom => format!("PET 비규격 세로 {}m × {unit}원", pet_meters(pricing)),
        PricingMode::Solvent => format!("솔벤 {band}폭 · {unit}원/ｍ"),
        PricingMode::StickerArea => format!("{} 면적단가 {unit}원/㎡", material.label()),
        PricingMode::Area => format!("면적단가 {unit}원/㎡"),
        PricingMode::Roll => format!("적용 폭 {band}폭 · {unit}원/ｍ"),
    }
}

/// Guidance shown above the size inputs.
pub fn guide_text(book: &PriceBook, material: Material) -> String {
    match material {
        Material::BulletinBanner => format!(
            "게시대현수막은 가로 7000 × 세로 900mm 고정, 장당 {}원(설치비 포함)입니다.",
            format_won(book.bulletin.per_item)
        ),
        m if m.group() == ProductGroup::Sticker => format!(
            "솔벤시트/차량용시트/PVC캘: 면적단가 {}원/㎡ 적용. 납품/설치 비용은 장당 부과되며 총 결제금액에 포함됩니다.",
            format_won(book.area.sticker)
        ),
        _ => "900 초과~1800 이하는 한 폭 위 단가가 적용되며, 과금 기준 세로는 매칭된 폭으로 간주됩니다. \
              예: 5000×901mm → 1000폭 단가 적용. 납품/설치 비용은 장당 부과되며 총 결제금액에 포함됩니다."
            .to_string(),
    }
}

// =============================================================================
// Summary Rows
// =============================================================================

/// One labelled amount on the quote summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SummaryRow {
    pub label: String,
    pub amount: Won,
}

impl SummaryRow {
    fn new(label: impl Into<String>, amount: Won) -> Self {
        SummaryRow {
            label: label.into(),
            amount,
        }
    }
}

/// Money rows of the quote summary, top to bottom.
///
/// Zero surcharges are left out. The base row shows the floored amount and
/// says so when the minimum supply applied.
pub fn summary_rows(quote: &Quote) -> Vec<SummaryRow> {
    let b = &quote.breakdown;
    let s = &b.surcharges;

    let base = if b.minimum_applied {
        SummaryRow::new("공급가(최저 적용)", b.base)
    } else {
        SummaryRow::new("공급가", b.base_raw)
    };

    let surcharges = [
        ("후가공", s.post_process),
        ("부속품", s.accessory),
        ("납품", s.delivery),
        ("설치·시공", s.install),
    ]
    .into_iter()
    .filter(|(_, amount)| amount.is_positive())
    .map(|(label, amount)| SummaryRow::new(label, amount));

    std::iter::once(base)
        .chain(surcharges)
        .chain([
            SummaryRow::new("공급가 합계", b.supply),
            SummaryRow::new(format!("부가세({})", b.vat_rate), b.vat),
        ])
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
