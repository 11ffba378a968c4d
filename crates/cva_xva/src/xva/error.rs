//! XVA error types.

use cva_core::market_data::MarketDataError;
use cva_core::types::{NumericalError, ValidationError};
use cva_models::instruments::ValuationError;
use cva_pricing::mc::SimulationError;
use thiserror::Error;

/// Errors that can occur during a CVA calculation.
///
/// Every failure is returned to the caller; no degraded result is produced.
///
/// # Examples
/// ```
/// use cva_core::types::ValidationError;
/// use cva_xva::xva::CvaError;
///
/// let err: CvaError = ValidationError::RecoveryRateOutOfRange(1.2).into();
/// assert!(err.to_string().contains("1.2"));
/// assert!(err.is_validation());
/// ```
#[derive(Error, Debug)]
pub enum CvaError {
    /// Malformed request, rejected before any simulation.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Non-finite rate, value or aggregate.
    #[error("Numerical failure: {0}")]
    Numerical(#[from] NumericalError),

    /// Parallel execution failure.
    #[error("Simulation failure: {0}")]
    Simulation(#[from] SimulationError),

    /// Curve queried outside its domain.
    #[error("Curve error: {0}")]
    Curve(#[from] MarketDataError),
}

impl CvaError {
    /// True for input validation failures.
    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(self, CvaError::Validation(_))
    }
}

impl From<ValuationError> for CvaError {
    fn from(err: ValuationError) -> Self {
        match err {
            ValuationError::Validation(e) => CvaError::Validation(e),
            ValuationError::Numerical(e) => CvaError::Numerical(e),
        }
    }
}
