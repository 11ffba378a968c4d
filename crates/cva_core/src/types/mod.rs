//! Core time and error types.
//!
//! This module provides:
//! - `time`: The monthly monitoring grid ([`TimeGrid`]) shared by rate and value paths
//! - `error`: Structured error types for input validation and numerical failures
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`TimeGrid`], [`STEPS_PER_YEAR`], [`MAX_MATURITY_YEARS`] from `time`
//! - [`ValidationError`], [`NumericalError`] from `error`

pub mod error;
pub mod time;

pub use error::{NumericalError, ValidationError};
pub use time::{TimeGrid, MAX_MATURITY_YEARS, STEPS_PER_YEAR};
