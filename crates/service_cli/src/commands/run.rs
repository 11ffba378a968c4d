//! Run command implementation
//!
//! Executes one CVA request and writes the report as JSON.

use std::path::Path;

use chrono::{DateTime, Utc};
use cva_pricing::mc::CancellationToken;
use cva_xva::{CalculationOutcome, CvaEngine, CvaReport};
use serde::Serialize;
use tracing::info;

use crate::config::{load_request, RunOverrides};
use crate::error::{CliError, Result};

/// Report envelope with the calculation timestamp.
#[derive(Serialize)]
struct RunOutput<'a> {
    calculated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a CvaReport,
}

/// Run the CVA calculation for the request at `request_path`.
pub fn run(
    request_path: &Path,
    overrides: &RunOverrides,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let request = load_request(request_path, overrides)?;
    info!(
        request = %request_path.display(),
        counterparty = request.counterparty.as_deref().unwrap_or("-"),
        "Starting CVA calculation"
    );

    let report = match CvaEngine::run(&request, &CancellationToken::new())? {
        CalculationOutcome::Completed(report) => report,
        CalculationOutcome::Cancelled { paths_completed } => {
            return Err(CliError::Cancelled { paths_completed });
        }
    };

    info!(
        cva = report.result.cva,
        cva_bps = report.result.cva_bps,
        seed = report.effective_seed,
        num_paths = report.num_paths,
        "CVA calculation complete"
    );

    let envelope = RunOutput {
        calculated_at: Utc::now(),
        report: &report,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, json).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            info!(output = %path.display(), "Report written");
        }
        None => println!("{}", json),
    }
    Ok(())
}
