//! Error types for structured error handling.
//!
//! This module provides:
//! - `ValidationError`: Malformed input rejected before any simulation work
//! - `NumericalError`: Non-finite values produced during simulation or valuation

use thiserror::Error;

/// Input validation errors.
///
/// Raised before any sampling occurs, so a rejected request never leaves
/// partial computation behind.
///
/// # Examples
/// ```
/// use cva_core::types::ValidationError;
///
/// let err = ValidationError::NonPositiveNotional(-1.0);
/// assert_eq!(format!("{}", err), "Notional must be positive, got -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Notional is zero or negative.
    #[error("Notional must be positive, got {0}")]
    NonPositiveNotional(f64),

    /// Maturity is zero or negative.
    #[error("Maturity must be positive, got {0} years")]
    NonPositiveMaturity(f64),

    /// Maturity rounds to zero monthly steps.
    #[error("Maturity of {0} years is shorter than half a monitoring step")]
    MaturityBelowMonitoringStep(f64),

    /// Maturity beyond the longest supported monitoring grid.
    #[error("Maturity of {maturity} years exceeds the maximum of {max} years")]
    MaturityTooLong {
        /// Requested maturity in years.
        maturity: f64,
        /// Longest supported maturity in years.
        max: f64,
    },

    /// Path count outside the supported range.
    #[error("Invalid path count {count}: must be in range [1, {max}]")]
    InvalidPathCount {
        /// Requested number of paths.
        count: usize,
        /// Largest supported number of paths.
        max: usize,
    },

    /// No value paths were supplied for aggregation.
    #[error("Exposure requires at least one value path")]
    EmptyEnsemble,

    /// Recovery rate outside [0, 1].
    #[error("Recovery rate must be in [0, 1], got {0}")]
    RecoveryRateOutOfRange(f64),

    /// Counterparty spread below zero.
    #[error("Counterparty spread must be non-negative, got {0} bps")]
    NegativeSpread(f64),

    /// Mean reversion speed is zero or negative.
    #[error("Mean reversion speed must be positive, got {0}")]
    NonPositiveMeanReversion(f64),

    /// Volatility below zero.
    #[error("Volatility must be non-negative, got {0}")]
    NegativeVolatility(f64),

    /// A path does not cover the monitoring grid it is valued on.
    #[error("Path length {actual} does not match grid of {expected} dates")]
    GridMismatch {
        /// Number of grid dates.
        expected: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// A parameter is NaN or infinite.
    #[error("Parameter '{name}' must be finite, got {value}")]
    NonFiniteParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

impl ValidationError {
    /// Rejects NaN and infinite inputs for the named parameter.
    ///
    /// # Examples
    /// ```
    /// use cva_core::types::ValidationError;
    ///
    /// assert!(ValidationError::ensure_finite("fixed_rate", 0.025).is_ok());
    /// assert!(ValidationError::ensure_finite("fixed_rate", f64::NAN).is_err());
    /// ```
    #[inline]
    pub fn ensure_finite(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFiniteParameter { name, value })
        }
    }
}

/// Numerical failures detected during the calculation.
///
/// Non-finite values are reported with their location and never clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericalError {
    /// Simulated short rate overflowed or became NaN.
    #[error("Non-finite short rate {value} on path {path} at step {step}")]
    NonFiniteRate {
        /// Path index within the ensemble.
        path: usize,
        /// Step index on the monitoring grid.
        step: usize,
        /// Offending value.
        value: f64,
    },

    /// Swap valuation produced a non-finite mark-to-market.
    #[error("Non-finite swap value {value} on path {path} at step {step}")]
    NonFiniteValue {
        /// Path index within the ensemble.
        path: usize,
        /// Step index on the monitoring grid.
        step: usize,
        /// Offending value.
        value: f64,
    },

    /// An aggregate (exposure statistic or CVA) is not finite.
    #[error("Non-finite {quantity}: {value}")]
    NonFiniteResult {
        /// Name of the aggregate.
        quantity: &'static str,
        /// Offending value.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidPathCount { count: 0, max: 10 };
        assert_eq!(
            format!("{}", err),
            "Invalid path count 0: must be in range [1, 10]"
        );

        let err = ValidationError::RecoveryRateOutOfRange(1.5);
        assert!(err.to_string().contains("1.5"));

        let err = ValidationError::MaturityTooLong {
            maturity: 250.0,
            max: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "Maturity of 250 years exceeds the maximum of 100 years"
        );
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ValidationError::ensure_finite("r0", -0.01).is_ok());
        assert_eq!(
            ValidationError::ensure_finite("r0", f64::INFINITY),
            Err(ValidationError::NonFiniteParameter {
                name: "r0",
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn test_numerical_error_display() {
        let err = NumericalError::NonFiniteRate {
            path: 3,
            step: 17,
            value: f64::NAN,
        };
        let msg = err.to_string();
        assert!(msg.contains("path 3"));
        assert!(msg.contains("step 17"));
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(ValidationError::NegativeSpread(-5.0));
        assert!(err.to_string().contains("spread"));
    }
}
