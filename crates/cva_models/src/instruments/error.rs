//! Instrument error types.

use cva_core::types::{NumericalError, ValidationError};
use thiserror::Error;

/// Failure while valuing one path.
///
/// # Examples
/// ```
/// use cva_core::types::ValidationError;
/// use cva_models::instruments::ValuationError;
///
/// let err: ValuationError = ValidationError::GridMismatch { expected: 13, actual: 5 }.into();
/// assert!(format!("{}", err).contains("13"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    /// Rate path does not fit the grid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-finite value produced.
    #[error(transparent)]
    Numerical(#[from] NumericalError),
}
