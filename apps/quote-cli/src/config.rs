//! # Price Book Loading
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Price Book Lookup Order                              │
//! │                                                                         │
//! │  1. --pricebook <path>                    (highest priority)           │
//! │                                                                         │
//! │  2. Environment Variable                                               │
//! │     SIGNQUOTE_PRICEBOOK=/srv/shop/pricebook.toml                       │
//! │                                                                         │
//! │  3. TOML file in the platform config directory                         │
//! │     ~/.config/signquote/pricebook.toml (Linux)                         │
//! │     ~/Library/Application Support/com.signquote.signquote/... (macOS)  │
//! │                                                                         │
//! │  4. Built-in price book (lowest priority)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Flag and environment variable are merged by clap into one explicit path,
//! which must exist. The config directory
//! file is optional; when it is missing the built-in prices apply.

use std::path::{Path, PathBuf};

use signquote_core::PriceBook;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

const PRICEBOOK_FILE: &str = "pricebook.toml";

/// Where the active price book came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceBookSource {
    File(PathBuf),
    BuiltIn,
}

/// Loads the price book following the lookup order above.
pub fn load_price_book(explicit: Option<PathBuf>) -> CliResult<(PriceBook, PriceBookSource)> {
    load_from(explicit, default_config_path())
}

/// Resolves and loads with the lookups already done.
fn load_from(explicit: Option<PathBuf>, fallback: Option<PathBuf>) -> CliResult<(PriceBook, PriceBookSource)> {
    if let Some(path) = explicit {
        info!(?path, "Loading price book");
        let book = read_price_book(&path)?;
        return Ok((book, PriceBookSource::File(path)));
    }

    if let Some(path) = fallback {
        if path.exists() {
            info!(?path, "Loading price book from config directory");
            let book = read_price_book(&path)?;
            return Ok((book, PriceBookSource::File(path)));
        }
        debug!(?path, "Price book not found, using built-in prices");
    }

    Ok((PriceBook::default(), PriceBookSource::BuiltIn))
}

fn read_price_book(path: &Path) -> CliResult<PriceBook> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    PriceBook::from_toml_str(&contents).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns the default price book path in the platform config directory.
fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "signquote", "signquote").map(|dirs| dirs.config_dir().join(PRICEBOOK_FILE))
}

// =============================================================================
// Unit Tests
// =============================================================================
