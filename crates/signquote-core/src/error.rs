//! # Error Types
//!
//! Domain-specific error types for signquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  signquote-core errors (this file)                                     │
//! │  ├── NotComputable    - the pricing engine's only failure channel      │
//! │  ├── ValidationError  - bad identifiers and price-book entries         │
//! │  └── ConfigError      - price book failed to parse or validate         │
//! │                                                                         │
//! │  quote-cli errors (app)                                                │
//! │  └── CliError         - what the terminal user sees                    │
//! │                                                                         │
//! │  Flow: NotComputable → UI prompt ("enter width/height/quantity")       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending value in the message
//! 3. A missing price is never represented as zero won

use serde::Serialize;
use thiserror::Error;

use crate::types::Axis;

// =============================================================================
// Not Computable
// =============================================================================

/// The engine could not price the request.
///
/// The UI renders this as an input prompt, not as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NotComputable {
    /// A required side is missing, zero or negative.
    #[error("{axis} is required")]
    MissingDimension { axis: Axis },

    /// Quantity is missing, zero or negative.
    #[error("quantity is required")]
    MissingQuantity,

    /// A side is above the global safety limit.
    #[error("{axis} {value}mm exceeds the {max}mm limit")]
    DimensionTooLarge { axis: Axis, value: i64, max: i64 },

    /// PET film cannot be produced at this size.
    ///
    /// ## When This Occurs
    /// - width above the PET roll width (1800mm)
    /// - height above the PET length limit (10000mm)
    #[error("PET size {width}x{height}mm cannot be produced")]
    PetSizeNotProducible { width: i64, height: i64 },

    /// No band with a unit price matched the forced roll side.
    #[error("no priced band for {axis}")]
    NoBand { axis: Axis },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input and configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., the same band listed twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Config Error
// =============================================================================

/// Price book loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("price book parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but describes an unusable price book.
    #[error("invalid price book: {0}")]
    Invalid(#[from] ValidationError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Outcome of a pricing call.
pub type PricingOutcome<T> = Result<T, NotComputable>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
