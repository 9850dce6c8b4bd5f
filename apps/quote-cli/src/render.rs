//! # Quote Rendering
//!
//! Turns a [`Quote`] into the printed quote sheet or its JSON form.
//!
//! ```text
//! 견적서  2026-10-19 14:03
//! ────────────────────────────────────────
//! 제품         수성현수막
//! 사이즈       1000 × 901 mm
//! 총수량       1장
//! 단가기준     적용 폭 1000폭 · 8,000원/ｍ
//! ────────────────────────────────────────
//! 공급가(최저 적용)            25,000원
//! 공급가 합계                  25,000원
//! 부가세(10%)                   2,500원
//! ────────────────────────────────────────
//! 총 결제금액                  27,500원
//! ```

use chrono::{DateTime, Local};
use serde::Serialize;
use signquote_core::display::{basis_text, guide_text, pricing_note, summary_rows, SummaryRow};
use signquote_core::money::group_thousands;
use signquote_core::{PriceBook, ProductGroup, Quote};

use crate::error::CliResult;

const RULE: &str = "────────────────────────────────────────";
const LABEL_WIDTH: usize = 12;
const AMOUNT_WIDTH: usize = 16;

/// Everything printed for one quote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSheet<'a> {
    pub issued_at: DateTime<Local>,
    pub quote: &'a Quote,
    pub note: String,
    pub basis: String,
    pub guide: String,
    pub rows: Vec<SummaryRow>,
    /// Eyelets or hooks fitted per item, free ones included.
    pub units_per_item: Option<i64>,
    pub notices: &'a [String],
}

impl<'a> QuoteSheet<'a> {
    pub fn new(book: &PriceBook, quote: &'a Quote, notices: &'a [String], issued_at: DateTime<Local>) -> Self {
        let material = quote.request.material;
        QuoteSheet {
            issued_at,
            quote,
            note: pricing_note(material, &quote.pricing),
            basis: basis_text(material, &quote.pricing),
            guide: guide_text(book, material),
            rows: summary_rows(quote),
            units_per_item: quote.request.post_process.and_then(|p| p.units_per_item(book)),
            notices,
        }
    }

    pub fn to_json(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let request = &self.quote.request;
        let breakdown = &self.quote.breakdown;
        let mut lines = Vec::new();

        lines.push(format!("견적서  {}", self.issued_at.format("%Y-%m-%d %H:%M")));
        lines.push(RULE.to_string());
        lines.push(field("제품", request.material.label()));
        lines.push(field("사이즈", &format!("{} × {} mm", request.width, request.height)));
        lines.push(field("총수량", &format!("{}장", group_thousands(request.quantity))));
        if let Some(post) = request.post_process {
            lines.push(field("후가공", &describe_units(post.label(), self.units_per_item)));
        }
        if let Some(accessory) = request.accessory {
            lines.push(field("부속품", accessory.label()));
        }
        if let Some(delivery) = request.delivery {
            lines.push(field("납품", delivery.label()));
        }
        if let Some(install) = request.install {
            lines.push(field("설치·시공", install.label()));
        }
        lines.push(field("단가기준", &self.basis));
        lines.push(RULE.to_string());

        for row in &self.rows {
            lines.push(amount_row(&row.label, &row.amount.to_string()));
        }
        lines.push(RULE.to_string());
        lines.push(amount_row("총 결제금액", &breakdown.total.to_string()));

        if breakdown.minimum_applied {
            lines.push(format!("※ 최저 공급가액 {} 적용", breakdown.base));
        }
        lines.push(format!("적용 기준: {}", self.note));
        lines.push(format!("안내: {}", self.guide));
        for notice in self.notices {
            lines.push(format!("! {notice}"));
        }

        lines.join("\n")
    }
}

/// Materials grouped the way the quote form's tabs show them.
///
/// ```text
/// 현수막
///   water-banner        수성현수막
///   ...
/// ```
pub fn material_list() -> String {
    let mut lines = Vec::new();
    for group in ProductGroup::ALL {
        lines.push(group.label().to_string());
        for material in group.materials() {
            lines.push(format!("  {:<20}{}", material.id(), material.label()));
        }
    }
    lines.join("\n")
}

/// Adds "(n개)" to counted post-process options.
fn describe_units(label: &str, units: Option<i64>) -> String {
    match units {
        Some(n) => format!("{label} ({n}개)"),
        None => label.to_string(),
    }
}

fn field(label: &str, value: &str) -> String {
    format!("{}{value}", pad(label, LABEL_WIDTH))
}

fn amount_row(label: &str, amount: &str) -> String {
    let left = pad(label, LABEL_WIDTH * 2);
    let width = AMOUNT_WIDTH.saturating_sub(display_width(amount));
    format!("{left}{}{amount}", " ".repeat(width))
}

/// Right-pads to a column, counting Hangul as two cells.
fn pad(text: &str, width: usize) -> String {
    let used = display_width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(used).max(1)))
}

fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| if ('\u{AC00}'..='\u{D7A3}').contains(&c) { 2 } else { 1 })
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use signquote_core::{build_quote, Delivery, Material, PostProcess, QuoteRequest};

    fn issued() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 14, 3, 0).unwrap()
    }

    #[test]
    fn test_text_sheet_with_floor() {
        let book = PriceBook::default();
        let request = QuoteRequest {
            roll_hint: signquote_core::RollHint::Height,
            ..QuoteRequest::new(Material::WaterBanner, 1000, 901, 1)
        };
        let quote = build_quote(&book, &request).unwrap();
        let text = QuoteSheet::new(&book, &quote, &[], issued()).to_text();

        assert!(text.starts_with("견적서  2026-10-19 14:03"));
        assert!(text.contains("적용 폭 1000폭 · 8,000원/ｍ"));
        assert!(text.contains("공급가(최저 적용)"));
        assert!(text.contains("27,500원"));
        assert!(text.contains("※ 최저 공급가액 25,000원 적용"));
    }

    #[test]
    fn test_text_sheet_lists_add_ons_and_notices() {
        let book = PriceBook::default();
        let request = QuoteRequest {
            post_process: Some(PostProcess::Eyelet { extra: 2 }),
            delivery: Some(Delivery::InCity),
            ..QuoteRequest::new(Material::WaterBanner, 5000, 900, 1)
        };
        let quote = build_quote(&book, &request).unwrap();
        let notices = vec!["가로는 최대 1800mm 입니다.".to_string()];
        let text = QuoteSheet::new(&book, &quote, &notices, issued()).to_text();

        assert!(text.contains("아일렛 (6개)"));
        assert!(text.contains("납품"));
        assert!(!text.contains("※ 최저"));
        assert!(text.ends_with("! 가로는 최대 1800mm 입니다."));
    }

    #[test]
    fn test_json_sheet_shape() {
        let book = PriceBook::default();
        let quote = build_quote(&book, &QuoteRequest::new(Material::PetBanner, 600, 1800, 2)).unwrap();
        let json = QuoteSheet::new(&book, &quote, &[], issued()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["quote"]["pricing"]["mode"], "pet-standard");
        assert_eq!(value["quote"]["breakdown"]["total"], 88_000);
        assert_eq!(value["rows"][0]["label"], "공급가");
        assert_eq!(value["basis"], "PET 규격 600×1800 · 40,000원/장");
        assert!(value["issuedAt"].as_str().unwrap().starts_with("2026-10-19T14:03:00"));
    }

    #[test]
    fn test_text_sheet_shows_guide() {
        let book = PriceBook::default();
        let quote = build_quote(&book, &QuoteRequest::new(Material::BulletinBanner, 7000, 900, 1)).unwrap();
        let text = QuoteSheet::new(&book, &quote, &[], issued()).to_text();
        assert!(text.contains("안내: 게시대현수막은 가로 7000 × 세로 900mm 고정, 장당 50,000원"));
    }

    #[test]
    fn test_material_list_groups_every_material() {
        let list = material_list();
        let first: Vec<&str> = list.lines().take(2).collect();
        assert_eq!(first, vec!["현수막", "  water-banner        수성현수막"]);
        for material in Material::ALL {
            assert!(list.contains(material.id()), "{material:?}");
        }
        assert!(list.contains("스티커/시트지"));
    }

    #[test]
    fn test_display_width_counts_hangul_double() {
        assert_eq!(display_width("공급가"), 6);
        assert_eq!(display_width("abc"), 3);
        assert_eq!(pad("제품", 6), "제품  ");
    }
}
