//! Error types for the Monte Carlo simulation engine.

use cva_core::types::{NumericalError, ValidationError};
use cva_models::instruments::ValuationError;
use thiserror::Error;

/// Failure of the parallel simulation machinery.
///
/// No retry is attempted; the originating cause is attached.
///
/// # Examples
/// ```
/// use cva_pricing::mc::SimulationError;
///
/// let err = SimulationError::WorkerPanicked { batch: 3, message: "boom".to_string() };
/// assert_eq!(err.to_string(), "Worker panicked in batch 3: boom");
/// ```
#[derive(Error, Debug)]
pub enum SimulationError {
    /// The dedicated worker pool could not be created.
    #[error("Failed to build worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A worker panicked while processing a batch of paths.
    #[error("Worker panicked in batch {batch}: {message}")]
    WorkerPanicked {
        /// Index of the batch being processed.
        batch: usize,
        /// Panic payload, when it was a string.
        message: String,
    },

    /// A worker produced a non-finite rate or value.
    #[error(transparent)]
    Numerical(#[from] NumericalError),

    /// A worker received inputs inconsistent with its grid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<ValuationError> for SimulationError {
    fn from(err: ValuationError) -> Self {
        match err {
            ValuationError::Validation(e) => SimulationError::Validation(e),
            ValuationError::Numerical(e) => SimulationError::Numerical(e),
        }
    }
}
