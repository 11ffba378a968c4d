//! Flat yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Flat yield curve with constant continuously compounded rate.
///
/// Used as the risk-free discount curve for expected exposure, pinned at the
/// initial short rate of the simulation.
///
/// # Example
///
/// ```
/// use cva_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.03_f64);
/// let df = curve.discount_factor(2.0).unwrap();
/// assert!((df - (-0.06_f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Construct a flat curve with the given constant rate.
    ///
    /// Negative rates are accepted.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Return the constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    /// `D(t) = exp(-r * t)`.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok((-self.rate * t).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_factor_at_zero() {
        let curve = FlatCurve::new(0.05_f64);
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_discount_factor_at_multiple_years() {
        let curve = FlatCurve::new(0.03_f64);

        for t in [1.0 / 12.0, 0.5, 1.0, 2.0, 5.0] {
            let df = curve.discount_factor(t).unwrap();
            let expected = (-0.03 * t).exp();
            assert!(
                (df - expected).abs() < 1e-12,
                "Failed at t={}: got {}, expected {}",
                t,
                df,
                expected
            );
        }
    }

    #[test]
    fn test_discount_factor_with_negative_rate() {
        let curve = FlatCurve::new(-0.01_f64);
        let df = curve.discount_factor(1.0).unwrap();
        assert!(df > 1.0);
    }

    #[test]
    fn test_discount_factor_negative_maturity() {
        let curve = FlatCurve::new(0.05_f64);
        match curve.discount_factor(-1.0) {
            Err(MarketDataError::InvalidMaturity { t }) => assert_eq!(t, -1.0),
            other => panic!("Expected InvalidMaturity error, got {:?}", other),
        }
    }

    #[test]
    fn test_with_f32() {
        let curve = FlatCurve::new(0.05_f32);
        let df = curve.discount_factor(1.0_f32).unwrap();
        assert!((df - (-0.05_f32).exp()).abs() < 1e-6);
    }
}
