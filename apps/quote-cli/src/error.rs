//! # CLI Error Type
//!
//! Everything that can stop `signquote` before a quote is printed.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  malformed flag        ──► clap error               exit 2             │
//! │  unusable flag combo   ──► CliError::Usage          exit 2             │
//! │  price book invalid    ──► CliError::Config         exit 1             │
//! │  file unreadable       ──► CliError::Io             exit 1             │
//! │  cannot price request  ──► CliError::NotComputable  exit 1             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use signquote_core::{ConfigError, NotComputable};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Flags that parse but cannot form a request (no material, bad dombo roll).
    #[error("{0}")]
    Usage(String),

    #[error("price book {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request is incomplete; the message tells the user what to enter.
    #[error("필수 항목을 입력해 주세요: {0}")]
    NotComputable(#[from] NotComputable),

    #[error("output error: {0}")]
    Output(String),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
