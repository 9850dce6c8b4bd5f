//! # signquote: Command-Line Quote Calculator
//!
//! ## Module Organization
//! ```text
//! quote-cli/
//! ├── main.rs     ◄─── You are here (logging, startup, exit codes)
//! ├── args.rs     ◄─── Flag parsing and request building
//! ├── config.rs   ◄─── Price book lookup and loading
//! ├── render.rs   ◄─── Text and JSON quote sheets
//! └── error.rs    ◄─── CliError
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Parse arguments (clap exits on `--help` or a malformed flag)
//! 3. Load the price book (flag or env → config dir → built-in)
//! 4. Build the request, price it, print the sheet
//!
//! All pricing happens in `signquote-core`; this binary only does I/O.

mod args;
mod config;
mod error;
mod render;

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use signquote_core::build_quote;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::CliArgs;
use crate::config::load_price_book;
use crate::error::{CliError, CliResult};
use crate::render::{material_list, QuoteSheet};

fn main() -> ExitCode {
    init_tracing();

    match run(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            if matches!(err, CliError::Usage(_)) {
                eprintln!("\nFor more information, try '--help'.");
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(args: CliArgs) -> CliResult<()> {
    if args.list_materials {
        println!("{}", material_list());
        return Ok(());
    }

    let (book, source) = load_price_book(args.pricebook.clone())?;
    debug!(?source, "Price book ready");

    if args.print_pricebook {
        print!("{}", book.to_toml_string()?);
        return Ok(());
    }

    let prepared = args.to_request(&book)?;
    let quote = build_quote(&book, &prepared.request)?;
    let sheet = QuoteSheet::new(&book, &quote, &prepared.notices, Local::now());

    if args.json {
        println!("{}", sheet.to_json()?);
    } else {
        println!("{}", sheet.to_text());
    }

    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `error!` - Critical failures
/// - `warn!` - Recoverable issues
/// - `info!` - Price book loading
/// - `debug!` - Pricing decisions
/// - `trace!` - Candidate searches
///
/// ## Configuration
/// Set `RUST_LOG` environment variable to control logging:
/// ```bash
/// RUST_LOG=debug signquote ...            # Everything at debug level
/// RUST_LOG=signquote_core=trace ...       # Trace the pricing engine only
/// ```
/// Logs go to stderr so `--json` output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,signquote=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
