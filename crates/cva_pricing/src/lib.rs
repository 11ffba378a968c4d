//! # cva_pricing: Monte Carlo Engine (Layer 3)
//!
//! ## Layer 3 Role
//!
//! cva_pricing turns a validated [`mc::SimulationConfig`] into an ensemble of
//! Hull-White short-rate paths:
//! - Per-path seeded random streams ([`rng::PricerRng`])
//! - Euler-Maruyama path generation ([`mc::RateSimulator`])
//! - Batched rayon execution with cooperative cancellation
//!   ([`mc::run_in_batches`], [`mc::CancellationToken`])
//!
//! ## Reproducibility
//!
//! A path's shocks depend only on the base seed and the path index. The
//! ensemble is therefore bit-identical for any batch size or thread count.
//!
//! ## Usage Example
//!
//! ```rust
//! use cva_core::types::TimeGrid;
//! use cva_pricing::mc::{BatchRun, CancellationToken, ParallelConfig, RateSimulator, SimulationConfig};
//!
//! let config = SimulationConfig::builder().num_paths(64).seed(42).build().unwrap();
//! let simulator = RateSimulator::new(&config, TimeGrid::monthly(1.0).unwrap()).unwrap();
//!
//! let run = simulator
//!     .simulate(&ParallelConfig::default(), &CancellationToken::new())
//!     .unwrap();
//! if let BatchRun::Completed(paths) = run {
//!     assert_eq!(paths.len(), 64);
//! }
//! ```

#![warn(missing_docs)]

pub mod mc;
pub mod rng;
