//! Monte Carlo simulation of short-rate ensembles.
//!
//! # Architecture
//!
//! ```text
//! RateSimulator
//! ├── SimulationConfig  (paths, Hull-White parameters, seed)
//! ├── TimeGrid          (monthly monitoring dates)
//! ├── PricerRng         (one stream per path)
//! └── run_in_batches    (rayon batches, cancellation, panic capture)
//! ```
//!
//! The batch runner is generic over the per-path work, so callers can fuse
//! simulation with downstream per-path computation in a single pass.

mod config;
mod error;
mod parallel;
mod paths;

pub use config::{
    SimulationConfig, SimulationConfigBuilder, DEFAULT_INITIAL_SHORT_RATE, DEFAULT_MEAN_REVERSION,
    DEFAULT_NUM_PATHS, DEFAULT_VOLATILITY, MAX_PATHS,
};
pub use error::SimulationError;
pub use parallel::{run_in_batches, BatchRun, CancellationToken, ParallelConfig, DEFAULT_BATCH_SIZE};
pub use paths::{RatePath, RateSimulator};
