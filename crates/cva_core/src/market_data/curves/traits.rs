//! Discount curve trait.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Risk-free discounting as seen from `t = 0`.
///
/// Implementations must return `D(0) = 1` and `D(t) > 0`, and reject
/// negative maturities with [`MarketDataError::InvalidMaturity`].
///
/// # Example
///
/// ```
/// use cva_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// ```
pub trait YieldCurve<T: Float> {
    /// Discount factor for a cash flow at `t` years.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;
}
