//! Credit curve abstractions for counterparty default probabilities.
//!
//! This module provides:
//! - [`CreditCurve`]: Survival and interval default probabilities
//! - [`FlatHazardCurve`]: Constant hazard rate curve, with the credit-triangle
//!   approximation `λ = s / (1 - R)` for spread-implied construction

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Counterparty survival curve.
///
/// # Invariants
///
/// - Q(0) = 1
/// - Q(t) is non-increasing in t
pub trait CreditCurve<T: Float> {
    /// Return the survival probability Q(t) = P(τ > t).
    fn survival_probability(&self, t: T) -> Result<T, MarketDataError>;

    /// Return the marginal default probability over `(t1, t2]`.
    ///
    /// ```text
    /// PD(t1, t2) = Q(t1) - Q(t2)
    /// ```
    fn marginal_default_probability(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: (t2 - t1).to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.survival_probability(t1)? - self.survival_probability(t2)?)
    }
}

/// Flat hazard rate curve: `Q(t) = exp(-λt)`.
///
/// The hazard rate may be `+∞` when a positive spread is paired with full
/// recovery. In that case `Q(0) = 1` and `Q(t) = 0` for `t > 0`, which keeps
/// every default probability finite.
///
/// # Example
///
/// ```
/// use cva_core::market_data::curves::{CreditCurve, FlatHazardCurve};
///
/// // 150bp spread, 40% recovery: λ = 0.015 / 0.6 = 0.025
/// let curve = FlatHazardCurve::from_spread(0.015_f64, 0.4);
/// assert!((curve.rate() - 0.025).abs() < 1e-12);
///
/// let pd = curve.marginal_default_probability(0.0, 1.0).unwrap();
/// assert!((pd - (1.0 - (-0.025_f64).exp())).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatHazardCurve<T: Float> {
    hazard_rate: T,
}

impl<T: Float> FlatHazardCurve<T> {
    /// Construct a flat hazard rate curve.
    #[inline]
    pub fn new(hazard_rate: T) -> Self {
        Self { hazard_rate }
    }

    /// Imply the hazard rate from a running spread and a recovery rate.
    ///
    /// # Arguments
    ///
    /// * `spread` - Credit spread as a decimal (150bp = 0.015)
    /// * `recovery_rate` - Recovery rate in [0, 1]
    ///
    /// A zero spread gives a zero hazard rate regardless of recovery.
    pub fn from_spread(spread: T, recovery_rate: T) -> Self {
        let lgd = T::one() - recovery_rate;
        let hazard_rate = if spread == T::zero() {
            T::zero()
        } else if lgd <= T::zero() {
            T::infinity()
        } else {
            spread / lgd
        };
        Self { hazard_rate }
    }

    /// Return the constant hazard rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.hazard_rate
    }
}

impl<T: Float> CreditCurve<T> for FlatHazardCurve<T> {
    fn survival_probability(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        // Avoids ∞ × 0 when the hazard rate is infinite.
        if t == T::zero() {
            return Ok(T::one());
        }
        Ok((-self.hazard_rate * t).exp())
    }
}
