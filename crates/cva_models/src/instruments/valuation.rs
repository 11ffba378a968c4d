//! Pathwise swap valuation.
//!
//! Along one realised short-rate path, the value of the swap at monitoring
//! date `t_i` is
//!
//! ```text
//! P(t_i, T)  = exp(-∫_{t_i}^{T} r ds)                  (trapezoidal rule)
//! A(t_i)     = Σ_{j>i} Δt · P(t_i, t_j)                (fixed-leg annuity)
//! V(t_i)     = ± N · (K · A(t_i) - (1 - P(t_i, T)))
//! ```
//!
//! with the floating leg replaced by its par value. Both `P` and `A` are
//! built in a single backward sweep from maturity.

use cva_core::types::{NumericalError, TimeGrid, ValidationError};
use serde::{Deserialize, Serialize};

use super::error::ValuationError;
use super::swap::SwapSpec;

/// Swap mark-to-market values on the monitoring grid of one path.
///
/// `values()[i]` is the value at `grid.time(i)`; the grid itself is shared by
/// the whole ensemble and not stored per path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuePath {
    values: Vec<f64>,
}

impl ValuePath {
    /// Wraps precomputed values.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Values at each monitoring date.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at monitoring date `i`.
    #[inline]
    pub fn value(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// Number of monitoring dates.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for a path with no dates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(time, value)` pairs against the shared grid.
    pub fn points<'a>(&'a self, grid: &'a TimeGrid) -> impl Iterator<Item = (f64, f64)> + 'a {
        grid.times().iter().copied().zip(self.values.iter().copied())
    }
}

/// Values a fixed swap along simulated short-rate paths.
///
/// # Examples
/// ```
/// use cva_models::instruments::{SwapPosition, SwapSpec, SwapValuer};
///
/// let swap = SwapSpec::new(1_000_000.0, 0.03, 1.0, SwapPosition::ReceiveFixed).unwrap();
/// let valuer = SwapValuer::new(&swap).unwrap();
///
/// // Flat 3% path: the swap is close to par at inception and worth zero at maturity
/// let rates = vec![0.03; valuer.grid().len()];
/// let path = valuer.value_path(0, &rates).unwrap();
/// assert!(path.value(0).abs() < 1_000.0);
/// assert_eq!(path.value(12), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct SwapValuer {
    swap: SwapSpec,
    grid: TimeGrid,
}

impl SwapValuer {
    /// Validates the swap and builds its monitoring grid.
    pub fn new(swap: &SwapSpec) -> Result<Self, ValidationError> {
        swap.validate()?;
        Ok(Self {
            swap: *swap,
            grid: swap.time_grid()?,
        })
    }

    /// Swap terms being valued.
    #[inline]
    pub fn swap(&self) -> &SwapSpec {
        &self.swap
    }

    /// Monitoring grid the valuer expects rate paths on.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Values one short-rate path.
    ///
    /// `path` is only used to locate failures. The value at maturity is
    /// exactly zero.
    ///
    /// # Errors
    /// - `ValidationError::GridMismatch` (as the outer error) if `short_rates`
    ///   does not have one rate per grid date
    /// - `NumericalError::NonFiniteValue` if any value overflows or is NaN
    pub fn value_path(
        &self,
        path: usize,
        short_rates: &[f64],
    ) -> Result<ValuePath, ValuationError> {
        if short_rates.len() != self.grid.len() {
            return Err(ValidationError::GridMismatch {
                expected: self.grid.len(),
                actual: short_rates.len(),
            }
            .into());
        }

        let n = self.grid.n_steps();
        let dt = self.grid.dt();
        let scale = self.swap.position.sign() * self.swap.notional;
        let fixed_rate = self.swap.fixed_rate;

        let mut values = vec![0.0; n + 1];
        let mut zero_bond = 1.0;
        let mut annuity = 0.0;

        for i in (0..n).rev() {
            let step_discount = (-0.5 * dt * (short_rates[i] + short_rates[i + 1])).exp();
            zero_bond *= step_discount;
            annuity = step_discount * (dt + annuity);

            let value = scale * (fixed_rate * annuity - (1.0 - zero_bond));
            if !value.is_finite() {
                return Err(NumericalError::NonFiniteValue {
                    path,
                    step: i,
                    value,
                }
                .into());
            }
            values[i] = value;
        }

        Ok(ValuePath { values })
    }
}
