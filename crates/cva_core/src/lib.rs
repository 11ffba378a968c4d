//! # cva_core: Numerical Foundation for Swap CVA
//!
//! ## Layer 1 (Foundation) Role
//!
//! cva_core is the bottom layer of the workspace, providing:
//! - Validation and numerical error types (`types::error`)
//! - The monthly monitoring grid shared by every path (`types::time`)
//! - Discount and credit curves (`market_data::curves`)
//! - Percentile and mean helpers for exposure statistics (`math::statistics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other cva_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation on curves
//! - thiserror: Error derives
//! - serde: Serialisation of the time grid
//!
//! ## Usage Examples
//!
//! ```rust
//! use cva_core::market_data::curves::{CreditCurve, FlatCurve, FlatHazardCurve, YieldCurve};
//! use cva_core::types::TimeGrid;
//!
//! // Five years of monthly monitoring dates
//! let grid = TimeGrid::monthly(5.0).unwrap();
//! assert_eq!(grid.n_steps(), 60);
//!
//! // Risk-free discounting at the initial short rate
//! let discount = FlatCurve::new(0.03_f64);
//! let df = discount.discount_factor(1.0).unwrap();
//! assert!((df - (-0.03_f64).exp()).abs() < 1e-12);
//!
//! // 150bp spread with 40% recovery
//! let credit = FlatHazardCurve::from_spread(0.015_f64, 0.4);
//! assert!((credit.rate() - 0.025).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
