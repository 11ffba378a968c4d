//! Monitoring time grid.
//!
//! Exposure is monitored monthly. Every rate path and value path of an
//! ensemble lives on the same [`TimeGrid`], so per-date statistics can be
//! reduced index by index.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Number of monitoring dates per year.
pub const STEPS_PER_YEAR: usize = 12;

/// Longest maturity a monitoring grid is built for.
pub const MAX_MATURITY_YEARS: f64 = 100.0;

/// Uniform monthly grid `t_i = i / 12`, `i = 0..=n_steps`.
///
/// Fractional-year maturities are rounded to the nearest whole month, so the
/// final grid point is the swap maturity used by valuation.
///
/// # Examples
///
/// ```
/// use cva_core::types::TimeGrid;
///
/// let grid = TimeGrid::monthly(2.5).unwrap();
/// assert_eq!(grid.n_steps(), 30);
/// assert_eq!(grid.len(), 31);
/// assert_eq!(grid.time(0), 0.0);
/// assert!((grid.maturity() - 2.5).abs() < 1e-12);
///
/// // 1.04 years rounds to 12 monthly steps
/// let grid = TimeGrid::monthly(1.04).unwrap();
/// assert_eq!(grid.n_steps(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    n_steps: usize,
    times: Vec<f64>,
}

impl TimeGrid {
    /// Builds the monthly grid for a swap of the given maturity.
    ///
    /// # Errors
    ///
    /// See [`TimeGrid::monthly_steps`].
    pub fn monthly(maturity_years: f64) -> Result<Self, ValidationError> {
        let n_steps = Self::monthly_steps(maturity_years)?;
        let times = (0..=n_steps)
            .map(|i| i as f64 / STEPS_PER_YEAR as f64)
            .collect();

        Ok(Self { n_steps, times })
    }

    /// Number of monthly steps for `maturity_years`, without building the grid.
    ///
    /// # Errors
    ///
    /// - `NonFiniteParameter` if `maturity_years` is NaN or infinite
    /// - `NonPositiveMaturity` if `maturity_years <= 0`
    /// - `MaturityTooLong` if `maturity_years` exceeds [`MAX_MATURITY_YEARS`]
    /// - `MaturityBelowMonitoringStep` if the maturity rounds to zero steps
    pub fn monthly_steps(maturity_years: f64) -> Result<usize, ValidationError> {
        ValidationError::ensure_finite("maturity_years", maturity_years)?;
        if maturity_years <= 0.0 {
            return Err(ValidationError::NonPositiveMaturity(maturity_years));
        }
        if maturity_years > MAX_MATURITY_YEARS {
            return Err(ValidationError::MaturityTooLong {
                maturity: maturity_years,
                max: MAX_MATURITY_YEARS,
            });
        }

        let n_steps = (maturity_years * STEPS_PER_YEAR as f64).round() as usize;
        if n_steps == 0 {
            return Err(ValidationError::MaturityBelowMonitoringStep(maturity_years));
        }
        Ok(n_steps)
    }

    /// Returns the number of steps (grid length minus one).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the number of monitoring dates, including `t_0`.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: a grid holds at least `t_0` and maturity.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the step size in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        1.0 / STEPS_PER_YEAR as f64
    }

    /// Returns the monitoring date at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i > n_steps`.
    #[inline]
    pub fn time(&self, i: usize) -> f64 {
        self.times[i]
    }

    /// Returns all monitoring dates.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the final grid point, i.e. the effective swap maturity.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.times[self.n_steps]
    }
}
