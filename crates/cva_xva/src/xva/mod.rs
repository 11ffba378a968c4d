//! Credit valuation adjustment.
//!
//! Integrates an [`ExposureProfile`](crate::exposure::ExposureProfile)
//! against a flat-hazard counterparty curve and a flat risk-free curve.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  CvaCalculator                      │
//! ├─────────────────────────────────────────────────────┤
//! │  Inputs:                                            │
//! │    - ExposureProfile (EPE on the monitoring grid)   │
//! │    - CreditSpec (spread, recovery)                  │
//! │    - YieldCurve (risk-free discounting)             │
//! ├─────────────────────────────────────────────────────┤
//! │  Outputs:                                           │
//! │    - CvaResult (CVA, bps, per-interval breakdown)   │
//! └─────────────────────────────────────────────────────┘
//! ```

mod cva;
mod error;
mod params;
mod result;

pub use cva::{compute_cva, CvaCalculator};
pub use error::CvaError;
pub use params::CreditSpec;
pub use result::{CvaContribution, CvaResult};
