//! Exposure aggregation calculations.
//!
//! Reduces an ensemble of swap value paths to per-date exposure statistics:
//!
//! - Expected Positive Exposure, `EPE(t) = E[max(V(t), 0)]`
//! - Expected Negative Exposure, `ENE(t) = E[min(V(t), 0)]`
//! - Potential Future Exposure, 95th percentile of `max(V(t), 0)`
//! - 5th percentile of `min(V(t), 0)`
//!
//! Each date's sample is sorted before it is summed, so the profile does
//! not depend on the order in which paths are supplied.

use cva_core::math::{mean, percentile_sorted};
use cva_core::types::{NumericalError, TimeGrid, ValidationError};
use cva_models::instruments::ValuePath;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::xva::CvaError;

/// Percentile reported for positive exposure.
pub const PFE_PERCENTILE: f64 = 95.0;

/// Percentile reported for negative exposure.
pub const NEGATIVE_TAIL_PERCENTILE: f64 = 5.0;

/// Exposure statistics on the monitoring grid.
///
/// All per-date vectors have one entry per grid date, including `t_0` and
/// maturity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExposureProfile {
    /// Monitoring dates in years.
    pub times: Vec<f64>,
    /// Expected positive exposure (non-negative).
    pub epe: Vec<f64>,
    /// Expected negative exposure (non-positive).
    pub ene: Vec<f64>,
    /// 95th percentile of positive exposure.
    pub pfe_95: Vec<f64>,
    /// 5th percentile of negative exposure.
    pub ene_5: Vec<f64>,
    /// Peak EPE over all dates.
    pub max_epe: f64,
    /// Unweighted mean of EPE over all dates.
    pub avg_epe: f64,
    /// Most negative ENE over all dates.
    pub max_ene: f64,
    /// Unweighted mean of ENE over all dates.
    pub avg_ene: f64,
    /// Number of paths aggregated.
    pub num_paths: usize,
}

impl ExposureProfile {
    /// Number of monitoring dates.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True for an empty profile.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

struct DateStats {
    epe: f64,
    ene: f64,
    pfe_95: f64,
    ene_5: f64,
}

/// Exposure aggregation over a value-path ensemble.
pub struct ExposureAggregator;

impl ExposureAggregator {
    /// Aggregates value paths into an [`ExposureProfile`].
    ///
    /// # Errors
    ///
    /// - `ValidationError::EmptyEnsemble` for an empty ensemble
    /// - `ValidationError::GridMismatch` if a path does not span the grid
    /// - `NumericalError::NonFiniteResult` if a statistic overflows
    ///
    /// # Examples
    ///
    /// ```
    /// use cva_core::types::TimeGrid;
    /// use cva_models::instruments::ValuePath;
    /// use cva_xva::exposure::ExposureAggregator;
    ///
    /// let grid = TimeGrid::monthly(2.0 / 12.0).unwrap();
    /// let paths = vec![
    ///     ValuePath::new(vec![10.0, 20.0, 0.0]),
    ///     ValuePath::new(vec![-10.0, 4.0, 0.0]),
    /// ];
    ///
    /// let profile = ExposureAggregator::aggregate(&grid, &paths).unwrap();
    /// assert_eq!(profile.epe, vec![5.0, 12.0, 0.0]);
    /// assert_eq!(profile.ene, vec![-5.0, 0.0, 0.0]);
    /// assert_eq!(profile.max_epe, 12.0);
    /// ```
    pub fn aggregate(grid: &TimeGrid, paths: &[ValuePath]) -> Result<ExposureProfile, CvaError> {
        if paths.is_empty() {
            return Err(ValidationError::EmptyEnsemble.into());
        }
        if let Some(bad) = paths.iter().find(|p| p.len() != grid.len()) {
            return Err(ValidationError::GridMismatch {
                expected: grid.len(),
                actual: bad.len(),
            }
            .into());
        }

        let stats: Vec<DateStats> = (0..grid.len())
            .into_par_iter()
            .map(|t| Self::date_stats(paths, t))
            .collect();

        let epe: Vec<f64> = stats.iter().map(|s| s.epe).collect();
        let ene: Vec<f64> = stats.iter().map(|s| s.ene).collect();
        let pfe_95: Vec<f64> = stats.iter().map(|s| s.pfe_95).collect();
        let ene_5: Vec<f64> = stats.iter().map(|s| s.ene_5).collect();

        let max_epe = epe.iter().copied().fold(0.0_f64, f64::max);
        let max_ene = ene.iter().copied().fold(0.0_f64, f64::min);
        let avg_epe = mean(&epe).unwrap_or(0.0);
        let avg_ene = mean(&ene).unwrap_or(0.0);

        for (quantity, series) in [
            ("epe", &epe),
            ("ene", &ene),
            ("pfe_95", &pfe_95),
            ("ene_5", &ene_5),
        ] {
            if let Some(&value) = series.iter().find(|v| !v.is_finite()) {
                return Err(NumericalError::NonFiniteResult { quantity, value }.into());
            }
        }

        Ok(ExposureProfile {
            times: grid.times().to_vec(),
            epe,
            ene,
            pfe_95,
            ene_5,
            max_epe,
            avg_epe,
            max_ene,
            avg_ene,
            num_paths: paths.len(),
        })
    }

    fn date_stats(paths: &[ValuePath], t: usize) -> DateStats {
        let mut positive: Vec<f64> = paths.iter().map(|p| p.value(t).max(0.0)).collect();
        let mut negative: Vec<f64> = paths.iter().map(|p| p.value(t).min(0.0)).collect();
        positive.sort_unstable_by(f64::total_cmp);
        negative.sort_unstable_by(f64::total_cmp);

        DateStats {
            epe: mean(&positive).unwrap_or(0.0),
            ene: mean(&negative).unwrap_or(0.0),
            pfe_95: percentile_sorted(&positive, PFE_PERCENTILE).unwrap_or(0.0),
            ene_5: percentile_sorted(&negative, NEGATIVE_TAIL_PERCENTILE).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn grid(n_steps: usize) -> TimeGrid {
        TimeGrid::monthly(n_steps as f64 / 12.0).unwrap()
    }

    #[test]
    fn test_expected_exposures() {
        let paths = vec![
            ValuePath::new(vec![10.0, 20.0, 15.0]),
            ValuePath::new(vec![5.0, -10.0, 25.0]),
            ValuePath::new(vec![-5.0, 15.0, -10.0]),
        ];
        let profile = ExposureAggregator::aggregate(&grid(2), &paths).unwrap();

        assert_relative_eq!(profile.epe[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(profile.epe[1], 35.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(profile.epe[2], 40.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(profile.ene[0], -5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(profile.ene[1], -10.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(profile.ene[2], -10.0 / 3.0, epsilon = 1e-12);
        assert_eq!(profile.num_paths, 3);
        assert_eq!(profile.len(), 3);
    }

    #[test]
    fn test_scalar_summaries() {
        let paths = vec![
            ValuePath::new(vec![2.0, 8.0, -6.0]),
            ValuePath::new(vec![4.0, -2.0, -3.0]),
        ];
        let profile = ExposureAggregator::aggregate(&grid(2), &paths).unwrap();

        // EPE = [3, 4, 0], ENE = [0, -1, -4.5]
        assert_eq!(profile.max_epe, 4.0);
        assert_relative_eq!(profile.avg_epe, 7.0 / 3.0, epsilon = 1e-12);
        assert_eq!(profile.max_ene, -4.5);
        assert_relative_eq!(profile.avg_ene, -5.5 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_percentiles_interpolate() {
        // Positive parts at t0: [0, 10, 20, 30, 40]
        let paths: Vec<ValuePath> = [-5.0, 10.0, 20.0, 30.0, 40.0]
            .iter()
            .map(|&v| ValuePath::new(vec![v, 0.0]))
            .collect();
        let profile = ExposureAggregator::aggregate(&grid(1), &paths).unwrap();
        // rank = 0.95 * 4 = 3.8 -> 30 + 0.8 * 10
        assert_relative_eq!(profile.pfe_95[0], 38.0, epsilon = 1e-12);
        // Negative parts [-5, 0, 0, 0, 0], rank = 0.05 * 4 = 0.2 -> -5 + 0.2 * 5
        assert_relative_eq!(profile.ene_5[0], -4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_path_percentiles_equal_value() {
        let paths = vec![ValuePath::new(vec![7.0, -3.0, 0.0])];
        let profile = ExposureAggregator::aggregate(&grid(2), &paths).unwrap();
        assert_eq!(profile.pfe_95, vec![7.0, 0.0, 0.0]);
        assert_eq!(profile.ene_5, vec![0.0, -3.0, 0.0]);
        assert_eq!(profile.epe, vec![7.0, 0.0, 0.0]);
        assert_eq!(profile.ene, vec![0.0, -3.0, 0.0]);
    }

    #[test]
    fn test_rejects_empty_and_mismatched() {
        assert!(matches!(
            ExposureAggregator::aggregate(&grid(2), &[]),
            Err(CvaError::Validation(ValidationError::EmptyEnsemble))
        ));
        let paths = vec![ValuePath::new(vec![1.0, 0.0])];
        assert!(matches!(
            ExposureAggregator::aggregate(&grid(2), &paths),
            Err(CvaError::Validation(ValidationError::GridMismatch {
                expected: 3,
                actual: 2
            }))
        ));
    }

    #[test]
    fn test_overflow_reported() {
        let paths = vec![
            ValuePath::new(vec![f64::MAX, 0.0]),
            ValuePath::new(vec![f64::MAX, 0.0]),
        ];
        assert!(matches!(
            ExposureAggregator::aggregate(&grid(1), &paths),
            Err(CvaError::Numerical(NumericalError::NonFiniteResult {
                quantity: "epe",
                ..
            }))
        ));
    }

    fn ensemble() -> impl Strategy<Value = Vec<Vec<f64>>> {
        (1usize..40).prop_flat_map(|n_paths| {
            prop::collection::vec(prop::collection::vec(-1e6..1e6_f64, 4), n_paths)
        })
    }

    proptest! {
        #[test]
        fn prop_exposure_signs(values in ensemble()) {
            let paths: Vec<ValuePath> = values.into_iter().map(ValuePath::new).collect();
            let profile = ExposureAggregator::aggregate(&grid(3), &paths).unwrap();
            for t in 0..profile.len() {
                prop_assert!(profile.epe[t] >= 0.0);
                prop_assert!(profile.ene[t] <= 0.0);
                prop_assert!(profile.pfe_95[t] >= 0.0);
                prop_assert!(profile.ene_5[t] <= 0.0);
            }
            prop_assert!(profile.max_epe + 1e-6 >= profile.avg_epe);
            prop_assert!(profile.max_ene <= profile.avg_ene + 1e-6);
        }

        #[test]
        fn prop_order_invariant(values in ensemble(), rotation in 0usize..40) {
            let paths: Vec<ValuePath> = values.into_iter().map(ValuePath::new).collect();
            let mut shuffled = paths.clone();
            shuffled.reverse();
            let k = rotation % shuffled.len();
            shuffled.rotate_left(k);

            let a = ExposureAggregator::aggregate(&grid(3), &paths).unwrap();
            let b = ExposureAggregator::aggregate(&grid(3), &shuffled).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
