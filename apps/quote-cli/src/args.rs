//! # Command-Line Arguments
//!
//! ## Usage
//! ```bash
//! signquote --material water-banner --width 1000 --height 901 --qty 1 --roll h
//! signquote --material pet-banner --custom --width 600 --height 2500 --qty 2 --post eyelet:2
//! signquote --material vehicle-sheet --width 1300 --height 800 --dombo 1270 --json
//! signquote --print-pricebook > pricebook.toml
//! signquote --list-materials
//! ```
//!
//! Parsing is strict (clap rejects unknown flags and unreadable numbers).
//! Turning the parsed flags into a [`QuoteRequest`] is lenient the same way
//! the quote form is: locked sides are overwritten, oversize PET and dombo
//! widths are clamped with a notice, a missing or unreadable quantity is 1.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use signquote_core::validation::{clamp_dombo_width, clamp_pet_size, parse_quantity, parse_won};
use signquote_core::{Accessory, Delivery, Install, Material, PostProcess, PriceBook, QuoteRequest, RollHint};

use crate::error::{CliError, CliResult};

/// Quote calculator for banners, tarpaulins and stickers
// `-h` is the height, so help is `--help` only.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "signquote", version, about, disable_help_flag = true)]
pub struct CliArgs {
    /// water-banner | solvent-banner | bulletin-banner | pet-banner |
    /// non-woven-banner | cloth-banner | solvent-sheet | vehicle-sheet | pvc-cal
    #[arg(short, long, value_name = "ID")]
    pub material: Option<Material>,

    /// Width in millimetres
    #[arg(short, long, value_name = "MM", allow_negative_numbers = true)]
    pub width: Option<i64>,

    /// Height in millimetres
    #[arg(short = 'h', long, value_name = "MM", allow_negative_numbers = true)]
    pub height: Option<i64>,

    /// Quantity (1-10000); anything unreadable counts as 1
    #[arg(short, long = "qty", value_name = "N", allow_hyphen_values = true)]
    pub quantity: Option<String>,

    /// Side matched against the roll: auto | w | h
    #[arg(long, default_value = "auto")]
    pub roll: RollHint,

    /// Custom banner size instead of 600x1800
    #[arg(long)]
    pub custom: bool,

    /// eyelet[:extra] | string-hook[:extra] | wood-rope | hot-cut | rope-sewing | double-tape
    #[arg(long = "post", value_name = "OPTION", value_parser = parse_post_process)]
    pub post_process: Option<PostProcess>,

    /// suction-cup[:extra] | rope | stand-indoor | stand-outdoor
    #[arg(long, value_name = "OPTION", value_parser = parse_accessory)]
    pub accessory: Option<Accessory>,

    /// in-city | out-of-city | <won per item>
    #[arg(long, value_name = "OPTION", value_parser = parse_delivery)]
    pub delivery: Option<Delivery>,

    /// Installation per item, in won
    #[arg(long, value_name = "WON", value_parser = parse_install)]
    pub install: Option<Install>,

    /// Sticker roll width for dombo cutting
    #[arg(long = "dombo", value_name = "ROLL")]
    pub dombo_roll: Option<i64>,

    /// Print the quote as JSON
    #[arg(long)]
    pub json: bool,

    /// Price book TOML (default: config dir pricebook.toml, else built-in)
    #[arg(long, value_name = "PATH", env = "SIGNQUOTE_PRICEBOOK")]
    pub pricebook: Option<PathBuf>,

    /// Print the active price book and exit
    #[arg(long)]
    pub print_pricebook: bool,

    /// List material ids by product group and exit
    #[arg(long)]
    pub list_materials: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

/// Splits `name[:extra]` and parses the extra unit count.
fn split_extra(raw: &str) -> Result<(String, i64), String> {
    let raw = raw.trim();
    match raw.split_once(':') {
        Some((name, extra)) => {
            let extra = extra
                .trim()
                .parse()
                .map_err(|_| format!("extra count must be a number, got '{extra}'"))?;
            Ok((name.to_ascii_lowercase(), extra))
        }
        None => Ok((raw.to_ascii_lowercase(), 0)),
    }
}

fn parse_post_process(raw: &str) -> Result<PostProcess, String> {
    let (name, extra) = split_extra(raw)?;
    match name.as_str() {
        "eyelet" => Ok(PostProcess::Eyelet { extra }),
        "string-hook" => Ok(PostProcess::StringHook { extra }),
        "wood-rope" => Ok(PostProcess::WoodRope),
        "hot-cut" => Ok(PostProcess::HotCut),
        "rope-sewing" => Ok(PostProcess::RopeSewing),
        "double-tape" => Ok(PostProcess::DoubleTape),
        _ => Err(format!("unknown post-process '{raw}'")),
    }
}

fn parse_accessory(raw: &str) -> Result<Accessory, String> {
    let (name, extra) = split_extra(raw)?;
    match name.as_str() {
        "suction-cup" => Ok(Accessory::SuctionCup { extra }),
        "rope" => Ok(Accessory::Rope),
        "stand-indoor" => Ok(Accessory::IndoorStand),
        "stand-outdoor" => Ok(Accessory::OutdoorStand),
        _ => Err(format!("unknown accessory '{raw}'")),
    }
}

/// `in-city`, `out-of-city`, or a free-text amount per item.
fn parse_delivery(raw: &str) -> Result<Delivery, String> {
    Ok(match raw.trim().to_ascii_lowercase().as_str() {
        "in-city" => Delivery::InCity,
        "out-of-city" => Delivery::OutOfCity,
        other => Delivery::Other {
            amount: parse_won(other),
        },
    })
}

fn parse_install(raw: &str) -> Result<Install, String> {
    Ok(Install::Other { amount: parse_won(raw) })
}

// =============================================================================
// Request Building
// =============================================================================

/// A request ready for the engine, plus notices about corrected inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub request: QuoteRequest,
    pub notices: Vec<String>,
}

impl CliArgs {
    /// Builds the engine request the way the quote form does.
    pub fn to_request(&self, book: &PriceBook) -> CliResult<PreparedRequest> {
        let material = self
            .material
            .ok_or_else(|| CliError::usage("--material is required"))?;

        let mut notices = Vec::new();
        let (mut width, mut height) = material
            .locks(self.custom)
            .apply(self.width.unwrap_or(0), self.height.unwrap_or(0));

        if material == Material::PetBanner && self.custom {
            let clamped = clamp_pet_size(book, width, height);
            if clamped.any_clamped() {
                notices.push(pet_clamp_notice(book, clamped.width_clamped, clamped.height_clamped));
            }
            width = clamped.width;
            height = clamped.height;
        }

        if let Some(roll) = self.dombo_roll {
            if !material.is_sticker() {
                return Err(CliError::usage("--dombo only applies to sticker materials"));
            }
            if !book.bands.sticker_rolls.contains(&roll) {
                let rolls: Vec<String> = book.bands.sticker_rolls.iter().map(i64::to_string).collect();
                return Err(CliError::usage(format!("--dombo must be one of {}", rolls.join("/"))));
            }
            let (clamped, exceeded) = clamp_dombo_width(book, width, roll);
            if exceeded {
                notices.push(format!(
                    "가로는 선택한 원단폭 {roll}mm 기준 좌우 {}mm 여유를 두어 최대 {clamped}mm까지만 가능합니다.",
                    book.limits.dombo_side_margin
                ));
            }
            width = clamped;
        }

        let quantity = parse_quantity(book, self.quantity.as_deref().unwrap_or_default());
        if self.post_process.is_some() && !material.offers_post_process() {
            notices.push(format!("{}에는 후가공을 선택할 수 없습니다.", material.label()));
        }

        Ok(PreparedRequest {
            request: QuoteRequest {
                roll_hint: self.roll,
                post_process: self.post_process,
                accessory: self.accessory,
                delivery: self.delivery,
                install: self.install,
                ..QuoteRequest::new(material, width, height, quantity)
            },
            notices,
        })
    }
}

fn pet_clamp_notice(book: &PriceBook, width_clamped: bool, height_clamped: bool) -> String {
    let max_w = book.pet.max_width;
    let max_h = signquote_core::money::group_thousands(book.pet.max_height);
    match (width_clamped, height_clamped) {
        (true, true) => format!("가로는 최대 {max_w}mm, 세로는 최대 {max_h}mm 입니다. 입력값을 상한으로 보정했습니다."),
        (true, false) => format!("가로는 최대 {max_w}mm 입니다. 입력값을 상한으로 보정했습니다."),
        _ => format!("세로는 최대 {max_h}mm 입니다. 입력값을 상한으로 보정했습니다."),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use signquote_core::Won;

    fn args(list: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("signquote").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_basic_flags() {
        let parsed = args(&["--material", "water-banner", "-w", "1000", "-h", "901", "-q", "1", "--roll", "h"]).unwrap();
        assert_eq!(parsed.material, Some(Material::WaterBanner));
        assert_eq!(parsed.width, Some(1000));
        assert_eq!(parsed.height, Some(901));
        assert_eq!(parsed.quantity.as_deref(), Some("1"));
        assert_eq!(parsed.roll, RollHint::Height);
        assert!(!parsed.json);
    }

    #[test]
    fn test_parse_add_ons() {
        let parsed = args(&[
            "--post",
            "eyelet:3",
            "--accessory",
            "suction-cup",
            "--delivery",
            "15,000",
            "--install",
            "5000",
            "--json",
        ])
        .unwrap();
        assert_eq!(parsed.post_process, Some(PostProcess::Eyelet { extra: 3 }));
        assert_eq!(parsed.accessory, Some(Accessory::SuctionCup { extra: 0 }));
        assert_eq!(parsed.delivery, Some(Delivery::Other { amount: Won::new(15_000) }));
        assert_eq!(parsed.install, Some(Install::Other { amount: Won::new(5_000) }));
        assert!(parsed.json);

        let parsed = args(&["--delivery", "out-of-city", "--post", "wood-rope"]).unwrap();
        assert_eq!(parsed.delivery, Some(Delivery::OutOfCity));
        assert_eq!(parsed.post_process, Some(PostProcess::WoodRope));
    }

    #[test]
    fn test_usage_errors() {
        assert!(args(&["--width"]).is_err());
        assert!(args(&["--width", "wide"]).is_err());
        assert!(args(&["--material", "canvas"]).is_err());
        assert!(args(&["--post", "glitter"]).is_err());
        assert!(args(&["--post", "eyelet:many"]).is_err());
        assert!(args(&["--frobnicate"]).is_err());
    }

    #[test]
    fn test_help_is_long_only() {
        let err = args(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let parsed = args(&["-h", "900"]).unwrap();
        assert_eq!(parsed.height, Some(900));
        assert_eq!(parsed.roll, RollHint::Auto);
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_request_applies_locks() {
        let book = PriceBook::default();
        let parsed = args(&["-m", "bulletin-banner", "-w", "100", "-h", "100", "-q", "2"]).unwrap();
        let prepared = parsed.to_request(&book).unwrap();
        assert_eq!((prepared.request.width, prepared.request.height), (7000, 900));

        let parsed = args(&["-m", "pet-banner", "-q", "1"]).unwrap();
        let prepared = parsed.to_request(&book).unwrap();
        assert_eq!((prepared.request.width, prepared.request.height), (600, 1800));

        let parsed = args(&["-m", "solvent-banner", "-w", "2000", "-q", "1"]).unwrap();
        let prepared = parsed.to_request(&book).unwrap();
        assert_eq!(prepared.request.height, 900);
    }

    #[test]
    fn test_request_clamps_pet_and_dombo() {
        let book = PriceBook::default();

        let parsed = args(&["-m", "pet-banner", "--custom", "-w", "2000", "-h", "900", "-q", "1"]).unwrap();
        let prepared = parsed.to_request(&book).unwrap();
        assert_eq!(prepared.request.width, 1800);
        assert_eq!(prepared.notices, vec!["가로는 최대 1800mm 입니다. 입력값을 상한으로 보정했습니다.".to_string()]);

        let parsed = args(&["-m", "vehicle-sheet", "-w", "1300", "-h", "800", "-q", "1", "--dombo", "1270"]).unwrap();
        let prepared = parsed.to_request(&book).unwrap();
        assert_eq!(prepared.request.width, 1170);
        assert_eq!(prepared.notices.len(), 1);

        let parsed = args(&["-m", "vehicle-sheet", "-w", "500", "-h", "800", "-q", "1", "--dombo", "1000"]).unwrap();
        assert!(matches!(parsed.to_request(&book), Err(CliError::Usage(_))));

        let parsed = args(&["-m", "water-banner", "-w", "500", "-h", "800", "-q", "1", "--dombo", "1270"]).unwrap();
        assert!(matches!(parsed.to_request(&book), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_request_quantity_handling() {
        let book = PriceBook::default();
        let parsed = args(&["-m", "water-banner", "-w", "1000", "-h", "1000", "-q", "abc"]).unwrap();
        assert_eq!(parsed.to_request(&book).unwrap().request.quantity, 1);

        let parsed = args(&["-m", "water-banner", "-w", "1000", "-h", "1000", "-q", "50000"]).unwrap();
        assert_eq!(parsed.to_request(&book).unwrap().request.quantity, 10_000);

        let parsed = args(&["-m", "water-banner", "-w", "1000", "-h", "1000"]).unwrap();
        assert_eq!(parsed.to_request(&book).unwrap().request.quantity, 1);
    }

    #[test]
    fn test_request_requires_material() {
        let book = PriceBook::default();
        let parsed = args(&["-w", "1000"]).unwrap();
        assert!(matches!(parsed.to_request(&book), Err(CliError::Usage(_))));
    }
}
