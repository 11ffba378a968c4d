//! Curve abstractions for discounting and credit risk calculations.
//!
//! This module provides:
//! - [`YieldCurve`]: Risk-free discount factors
//! - [`FlatCurve`]: Constant rate yield curve implementation
//! - [`CreditCurve`]: Survival and interval default probabilities
//! - [`FlatHazardCurve`]: Constant hazard rate curve, optionally implied from a spread

mod credit;
mod flat;
mod traits;

pub use credit::{CreditCurve, FlatHazardCurve};
pub use flat::FlatCurve;
pub use traits::YieldCurve;
