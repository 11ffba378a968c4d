//! # Random Number Generation Infrastructure
//!
//! Seeded pseudo-random streams for the short-rate simulation.
//!
//! - **Reproducibility**: every path owns a stream derived from the base
//!   seed and its index, so an ensemble is identical for any thread count
//! - **Efficiency**: zero-allocation batch fills via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use cva_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::for_path(12345, 0);
//! let mut shocks = vec![0.0; 60];
//! rng.fill_normal(&mut shocks);
//! ```

mod prng;

pub use prng::PricerRng;
