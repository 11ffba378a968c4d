//! Request loading and configuration layering.
//!
//! Priority (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables (`CVA_NUM_PATHS`, `CVA_SEED`, `CVA_THREADS`,
//!    `CVA_BATCH_SIZE`)
//! 3. Request file
//! 4. Default values
//!
//! clap resolves 1 and 2 into [`RunOverrides`]; this module applies them on
//! top of the parsed request file.

use std::path::Path;

use cva_pricing::mc::ParallelConfig;
use cva_xva::CvaRequest;

use crate::error::{CliError, Result};

/// Request file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl RequestFormat {
    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(RequestFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(RequestFormat::Json),
            other => Err(CliError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Settings supplied by flag or environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOverrides {
    /// Number of Monte Carlo paths.
    pub num_paths: Option<usize>,
    /// RNG seed.
    pub seed: Option<u64>,
    /// Dedicated worker threads.
    pub threads: Option<usize>,
    /// Paths per batch.
    pub batch_size: Option<usize>,
    /// Leading paths kept in the report.
    pub retained_paths: Option<usize>,
}

impl RunOverrides {
    /// Applies every set field to `request`.
    pub fn apply(&self, request: &mut CvaRequest) {
        if let Some(n) = self.num_paths {
            request.simulation.num_paths = Some(n);
        }
        if let Some(seed) = self.seed {
            request.simulation.seed = Some(seed);
        }
        if let Some(k) = self.retained_paths {
            request.simulation.retained_paths = Some(k);
        }
        if self.threads.is_some() || self.batch_size.is_some() {
            request.parallel = ParallelConfig::new(
                self.batch_size.unwrap_or(request.parallel.batch_size),
                self.threads.or(request.parallel.num_threads),
            );
        }
    }
}

/// Parses a request document.
pub fn parse_request(content: &str, format: RequestFormat) -> Result<CvaRequest> {
    match format {
        RequestFormat::Toml => Ok(toml::from_str(content)?),
        RequestFormat::Json => Ok(serde_json::from_str(content)?),
    }
}

/// Reads a request file and applies the overrides.
pub fn load_request(path: &Path, overrides: &RunOverrides) -> Result<CvaRequest> {
    let format = RequestFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut request = parse_request(&content, format)?;
    overrides.apply(&mut request);
    Ok(request)
}
