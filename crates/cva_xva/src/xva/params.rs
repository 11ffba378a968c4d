//! Counterparty credit parameters.

use cva_core::market_data::FlatHazardCurve;
use cva_core::types::ValidationError;
use serde::{Deserialize, Serialize};

/// Counterparty credit terms.
///
/// The spread is quoted in basis points and converted to a constant hazard
/// rate with the credit-triangle approximation `λ = s / (1 - R)`.
///
/// # Examples
///
/// ```
/// use cva_xva::xva::CreditSpec;
///
/// let credit = CreditSpec::new(150.0, 0.4).unwrap();
/// assert!((credit.lgd() - 0.6).abs() < 1e-15);
/// assert!((credit.hazard_rate() - 0.025).abs() < 1e-15);
///
/// assert!(CreditSpec::new(-1.0, 0.4).is_err());
/// assert!(CreditSpec::new(100.0, 1.5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreditSpec {
    /// Running credit spread in basis points (non-negative).
    pub counterparty_spread_bps: f64,
    /// Recovery rate as a fraction in [0, 1].
    pub recovery_rate: f64,
}

impl CreditSpec {
    /// Creates validated credit terms.
    pub fn new(counterparty_spread_bps: f64, recovery_rate: f64) -> Result<Self, ValidationError> {
        let spec = Self {
            counterparty_spread_bps,
            recovery_rate,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Validates the credit terms.
    ///
    /// # Errors
    ///
    /// - `NonFiniteParameter` for NaN or infinite fields
    /// - `NegativeSpread` if the spread is below zero
    /// - `RecoveryRateOutOfRange` if recovery is outside [0, 1]
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::ensure_finite("counterparty_spread_bps", self.counterparty_spread_bps)?;
        ValidationError::ensure_finite("recovery_rate", self.recovery_rate)?;
        if self.counterparty_spread_bps < 0.0 {
            return Err(ValidationError::NegativeSpread(self.counterparty_spread_bps));
        }
        if !(0.0..=1.0).contains(&self.recovery_rate) {
            return Err(ValidationError::RecoveryRateOutOfRange(self.recovery_rate));
        }
        Ok(())
    }

    /// Returns the Loss Given Default, `1 - R`.
    #[inline]
    pub fn lgd(&self) -> f64 {
        1.0 - self.recovery_rate
    }

    /// Returns the spread as a decimal.
    #[inline]
    pub fn spread(&self) -> f64 {
        self.counterparty_spread_bps / 10_000.0
    }

    /// Flat hazard curve implied by the spread.
    ///
    /// Full recovery with a positive spread implies an infinite hazard
    /// rate; CVA is still zero because the LGD is zero.
    #[inline]
    pub fn credit_curve(&self) -> FlatHazardCurve<f64> {
        FlatHazardCurve::from_spread(self.spread(), self.recovery_rate)
    }

    /// Returns the implied constant hazard rate.
    #[inline]
    pub fn hazard_rate(&self) -> f64 {
        self.credit_curve().rate()
    }
}
