//! # signquote-core: Pricing Engine for Sign-Shop Quotes
//!
//! This crate holds every pricing rule of the quotation calculator as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sign Quote Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Quote form (web UI) / signquote CLI                 │   │
//! │  │    material ──► size ──► quantity ──► add-ons ──► summary       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ QuoteRequest                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ signquote-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  tables   │  │   band    │  │  pricing  │  │   quote   │  │   │
//! │  │   │ PriceBook │─►│ pick_band │─►│ Pricing   │─►│ Breakdown │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Materials, product groups, roll hints, pricing results
//! - [`money`] - `Won` with integer arithmetic and half-up rounding
//! - [`tables`] - The price book: band tables and every rate
//! - [`band`] - Band matcher
//! - [`pricing`] - Line item pricing engine
//! - [`post_process`] - Finishing surcharges and the dombo width helper
//! - [`quote`] - Add-ons, supply floor, VAT, totals
//! - [`validation`] - Lenient coercion of form input
//! - [`display`] - Korean notes and summary rows
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use signquote_core::{build_quote, Material, PriceBook, QuoteRequest};
//!
//! let book = PriceBook::default();
//! let quote = build_quote(&book, &QuoteRequest::new(Material::WaterBanner, 5000, 900, 2)).unwrap();
//!
//! // 900 band at 7,000원/m over 5m, two pieces
//! assert_eq!(quote.breakdown.base.amount(), 70_000);
//! assert_eq!(quote.breakdown.vat.amount(), 7_000);
//! assert_eq!(quote.breakdown.total.amount(), 77_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod band;
pub mod display;
pub mod error;
pub mod money;
pub mod post_process;
pub mod pricing;
pub mod quote;
pub mod tables;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ConfigError, NotComputable, PricingOutcome, ValidationError};
pub use money::Won;
pub use post_process::PostProcess;
pub use pricing::compute_pricing;
pub use quote::{build_quote, Accessory, Delivery, Install, Quote, QuoteBreakdown, QuoteRequest};
pub use tables::PriceBook;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency suffix printed after every amount.
pub const CURRENCY_SUFFIX: &str = "원";
