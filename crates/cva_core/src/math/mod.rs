//! Mathematical utilities for exposure statistics.
//!
//! - `statistics`: Sample mean and linearly interpolated percentiles

pub mod statistics;

pub use statistics::{mean, percentile_sorted};
