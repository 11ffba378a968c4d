//! Instrument definitions and pathwise valuation.
//!
//! - [`SwapSpec`]: Terms of the vanilla fixed-for-floating swap
//! - [`SwapValuer`]: Maps a short-rate path to a [`ValuePath`]
//!
//! # Examples
//!
//! ```
//! use cva_models::instruments::{SwapPosition, SwapSpec, SwapValuer};
//!
//! let swap = SwapSpec::new(100_000_000.0, 0.025, 5.0, SwapPosition::ReceiveFixed).unwrap();
//! let valuer = SwapValuer::new(&swap).unwrap();
//!
//! // Rates rising above the fixed coupon make the receiver swap a liability
//! let rates: Vec<f64> = (0..=60).map(|i| 0.03 + 0.0002 * i as f64).collect();
//! let path = valuer.value_path(0, &rates).unwrap();
//! assert!(path.value(0) < 0.0);
//! ```

mod error;
mod swap;
mod valuation;

pub use error::ValuationError;
pub use swap::{SwapPosition, SwapSpec};
pub use valuation::{SwapValuer, ValuePath};
