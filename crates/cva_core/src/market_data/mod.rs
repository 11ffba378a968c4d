//! Market data structures for discounting and default probabilities.
//!
//! # Architecture
//!
//! Curves are generic over `T: Float` so the same code serves `f64` and
//! `f32` callers.
//!
//! # Components
//!
//! - [`curves`]: Yield curve and credit curve traits with flat implementations
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use cva_core::market_data::curves::{CreditCurve, FlatCurve, FlatHazardCurve, YieldCurve};
//!
//! let curve = FlatCurve::new(0.05_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//!
//! let credit = FlatHazardCurve::new(0.02_f64);
//! let q = credit.survival_probability(1.0).unwrap();
//! assert!((q - (-0.02_f64).exp()).abs() < 1e-12);
//! ```

pub mod curves;
pub mod error;

pub use curves::{CreditCurve, FlatCurve, FlatHazardCurve, YieldCurve};
pub use error::MarketDataError;
