//! Check command implementation
//!
//! Validates a request without simulating and prints the resolved settings.

use std::path::Path;

use tracing::info;

use crate::config::{load_request, RunOverrides};
use crate::error::Result;

/// Validate the request at `request_path`.
pub fn run(request_path: &Path, overrides: &RunOverrides) -> Result<()> {
    let request = load_request(request_path, overrides)?;
    let config = request.validate().map_err(cva_xva::CvaError::from)?;
    let grid = request.swap.time_grid().map_err(cva_xva::CvaError::from)?;

    info!(request = %request_path.display(), "Request is valid");

    println!("Counterparty:      {}", request.counterparty.as_deref().unwrap_or("-"));
    println!("Position:          {}", request.swap.position);
    println!("Notional:          {:.2}", request.swap.notional);
    println!("Fixed rate:        {:.4}%", request.swap.fixed_rate * 100.0);
    println!(
        "Maturity:          {} years ({} monthly steps)",
        grid.maturity(),
        grid.n_steps()
    );
    println!("Spread:            {:.1} bps", request.credit.counterparty_spread_bps);
    println!("Recovery:          {:.1}%", request.credit.recovery_rate * 100.0);
    println!("Hazard rate:       {:.6}", request.credit.hazard_rate());
    println!("Paths:             {}", config.num_paths());
    println!(
        "Hull-White:        a={}, sigma={}, r0={}, target={:?}",
        config.mean_reversion(),
        config.volatility(),
        config.initial_short_rate(),
        config.target()
    );
    match config.seed() {
        Some(seed) => println!("Seed:              {}", seed),
        None => println!("Seed:              (drawn at run time)"),
    }
    println!(
        "Parallelism:       batch {} / {}",
        request.parallel.batch_size,
        request
            .parallel
            .num_threads
            .map(|n| format!("{} threads", n))
            .unwrap_or_else(|| "global pool".to_string())
    );
    Ok(())
}
