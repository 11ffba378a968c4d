//! CLI error types.

use std::path::PathBuf;

use cva_xva::CvaError;
use thiserror::Error;

/// Errors surfaced by the `cva` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The calculation itself failed.
    #[error(transparent)]
    Calculation(#[from] CvaError),

    /// A request or output file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A TOML request could not be parsed.
    #[error("Failed to parse TOML request: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON request could not be parsed, or the report not written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request file extension is neither `.toml` nor `.json`.
    #[error("Unsupported request format: {0}. Supported: toml, json")]
    UnsupportedFormat(String),

    /// The run was stopped before it finished.
    #[error("Calculation cancelled after {paths_completed} paths")]
    Cancelled {
        /// Paths finished before the stop.
        paths_completed: usize,
    },
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
