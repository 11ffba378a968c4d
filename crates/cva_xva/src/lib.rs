//! # cva_xva (L4: Application)
//!
//! Exposure aggregation and credit valuation adjustment for a single
//! interest-rate swap.
//!
//! This crate provides:
//! - Exposure aggregation (EPE, ENE, PFE) over value-path ensembles
//! - Counterparty credit terms and unilateral CVA with a per-interval
//!   breakdown
//! - The end-to-end engine: request validation, parallel simulate-and-value,
//!   aggregation and adjustment
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              cva_xva (L4)               │
//! ├─────────────────────────────────────────┤
//! │  exposure/  - EPE, ENE, PFE profiles    │
//! │  xva/       - CreditSpec, CVA           │
//! │  engine     - CvaRequest, CvaEngine     │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            cva_pricing (L3)             │
//! │  Hull-White paths, batched execution    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use cva_models::instruments::{SwapPosition, SwapSpec};
//! use cva_pricing::mc::CancellationToken;
//! use cva_xva::engine::SimulationSettings;
//! use cva_xva::{CalculationOutcome, CreditSpec, CvaEngine, CvaRequest};
//!
//! let swap = SwapSpec::new(100_000_000.0, 0.025, 5.0, SwapPosition::ReceiveFixed).unwrap();
//! let credit = CreditSpec::new(150.0, 0.4).unwrap();
//! let request = CvaRequest::new(swap, credit)
//!     .with_counterparty("ACME Corp")
//!     .with_simulation(SimulationSettings {
//!         num_paths: Some(256),
//!         seed: Some(42),
//!         ..Default::default()
//!     });
//!
//! match CvaEngine::run(&request, &CancellationToken::new()).unwrap() {
//!     CalculationOutcome::Completed(report) => {
//!         assert!(report.result.cva >= 0.0);
//!         assert_eq!(report.result.exposure.len(), 61);
//!     }
//!     CalculationOutcome::Cancelled { .. } => unreachable!(),
//! }
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod exposure;
pub mod xva;

// Re-export commonly used types
pub use engine::{
    CalculationOutcome, CvaEngine, CvaReport, CvaRequest, SamplePath, SimulationSettings,
};
pub use exposure::{ExposureAggregator, ExposureProfile};
pub use xva::{compute_cva, CreditSpec, CvaCalculator, CvaContribution, CvaError, CvaResult};
