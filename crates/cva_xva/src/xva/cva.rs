//! Credit Valuation Adjustment (CVA) calculation.
//!
//! CVA represents the expected loss due to counterparty default.
//!
//! # Formula
//!
//! ```text
//! CVA = Σ_{i=1}^{n} LGD × EPE(t_i) × PD(t_{i-1}, t_i) × DF(t_i)
//! ```
//!
//! Where:
//! - LGD = Loss Given Default
//! - EPE(t) = Expected Positive Exposure at time t
//! - PD(t1, t2) = Marginal default probability `Q(t1) - Q(t2)`
//! - DF(t) = Risk-free discount factor
//!
//! The sum runs over the monitoring grid in date order. EPE is taken at the
//! right end of each interval, so the `t_0` exposure never contributes.

use cva_core::market_data::{CreditCurve, FlatCurve, FlatHazardCurve, YieldCurve};
use cva_core::types::{NumericalError, ValidationError};
use tracing::debug;

use super::error::CvaError;
use super::params::CreditSpec;
use super::result::{CvaContribution, CvaResult};
use crate::exposure::ExposureProfile;

/// Integrates an exposure profile against a credit curve.
///
/// # Examples
///
/// ```
/// use cva_core::market_data::FlatCurve;
/// use cva_core::types::TimeGrid;
/// use cva_models::instruments::ValuePath;
/// use cva_xva::exposure::ExposureAggregator;
/// use cva_xva::xva::{CreditSpec, CvaCalculator};
///
/// let grid = TimeGrid::monthly(0.25).unwrap();
/// let paths = vec![ValuePath::new(vec![0.0, 100.0, 100.0, 0.0])];
/// let profile = ExposureAggregator::aggregate(&grid, &paths).unwrap();
///
/// let calculator = CvaCalculator::new(CreditSpec::new(100.0, 0.4).unwrap(), FlatCurve::new(0.03));
/// let result = calculator.compute(&profile, 1_000.0).unwrap();
///
/// assert!(result.cva > 0.0);
/// assert_eq!(result.contributions.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct CvaCalculator<D: YieldCurve<f64>> {
    credit: CreditSpec,
    hazard_curve: FlatHazardCurve<f64>,
    discount: D,
}

impl<D: YieldCurve<f64>> CvaCalculator<D> {
    /// Creates a calculator for the given counterparty and discount curve.
    pub fn new(credit: CreditSpec, discount: D) -> Self {
        Self {
            hazard_curve: credit.credit_curve(),
            credit,
            discount,
        }
    }

    /// Counterparty credit terms.
    #[inline]
    pub fn credit(&self) -> &CreditSpec {
        &self.credit
    }

    /// Computes CVA over `profile` for a trade of the given notional.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the credit terms or notional are invalid
    /// - `CvaError::Curve` if a curve is queried outside its domain
    /// - `NumericalError::NonFiniteResult` if the sum is not finite
    pub fn compute(&self, profile: &ExposureProfile, notional: f64) -> Result<CvaResult, CvaError> {
        self.credit.validate()?;
        ValidationError::ensure_finite("notional", notional)?;
        if notional <= 0.0 {
            return Err(ValidationError::NonPositiveNotional(notional).into());
        }
        if profile.epe.len() != profile.times.len() {
            return Err(ValidationError::GridMismatch {
                expected: profile.times.len(),
                actual: profile.epe.len(),
            }
            .into());
        }

        let lgd = self.credit.lgd();
        let mut contributions = Vec::with_capacity(profile.times.len().saturating_sub(1));
        for (window, &epe) in profile.times.windows(2).zip(profile.epe.iter().skip(1)) {
            let (t_prev, t) = (window[0], window[1]);
            let default_probability = self
                .hazard_curve
                .marginal_default_probability(t_prev, t)?;
            let discount_factor = self.discount.discount_factor(t)?;
            contributions.push(CvaContribution {
                time: t,
                epe,
                default_probability,
                discount_factor,
                contribution: lgd * epe * default_probability * discount_factor,
            });
        }

        let cva: f64 = contributions.iter().map(|c| c.contribution).sum();
        if !cva.is_finite() {
            return Err(NumericalError::NonFiniteResult {
                quantity: "cva",
                value: cva,
            }
            .into());
        }
        let cva_bps = cva / notional * 1e4;

        debug!(
            cva,
            cva_bps,
            hazard_rate = self.hazard_curve.rate(),
            lgd,
            intervals = contributions.len(),
            "cva computed"
        );

        Ok(CvaResult {
            cva,
            cva_bps,
            hazard_rate: self.hazard_curve.rate(),
            lgd,
            contributions,
            exposure: profile.clone(),
        })
    }
}

/// Computes unilateral CVA, discounting on a flat curve at `discount_rate`.
///
/// # Examples
///
/// ```
/// use cva_core::types::TimeGrid;
/// use cva_models::instruments::ValuePath;
/// use cva_xva::exposure::ExposureAggregator;
/// use cva_xva::xva::{compute_cva, CreditSpec};
///
/// let grid = TimeGrid::monthly(0.25).unwrap();
/// let paths = vec![ValuePath::new(vec![0.0, -50.0, -20.0, 0.0])];
/// let profile = ExposureAggregator::aggregate(&grid, &paths).unwrap();
///
/// // No positive exposure, no CVA
/// let result = compute_cva(&profile, &CreditSpec::new(200.0, 0.4).unwrap(), 0.03, 1_000.0).unwrap();
/// assert_eq!(result.cva, 0.0);
/// ```
pub fn compute_cva(
    profile: &ExposureProfile,
    credit: &CreditSpec,
    discount_rate: f64,
    notional: f64,
) -> Result<CvaResult, CvaError> {
    ValidationError::ensure_finite("discount_rate", discount_rate)?;
    CvaCalculator::new(*credit, FlatCurve::new(discount_rate)).compute(profile, notional)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposure::ExposureAggregator;
    use approx::assert_relative_eq;
    use cva_core::types::TimeGrid;
    use cva_models::instruments::ValuePath;

    fn flat_profile(level: f64, n_steps: usize) -> ExposureProfile {
        let grid = TimeGrid::monthly(n_steps as f64 / 12.0).unwrap();
        let values = (0..=n_steps).map(|_| level).collect();
        ExposureAggregator::aggregate(&grid, &[ValuePath::new(values)]).unwrap()
    }

    #[test]
    fn test_cva_matches_closed_form_for_flat_exposure() {
        let profile = flat_profile(100.0, 12);
        let credit = CreditSpec::new(120.0, 0.4).unwrap();
        let result = compute_cva(&profile, &credit, 0.0, 1_000.0).unwrap();

        // Zero discounting: CVA = LGD × EPE × PD(0, 1)
        let lambda: f64 = 0.012 / 0.6;
        let expected = 0.6 * 100.0 * (1.0 - (-lambda).exp());
        assert_relative_eq!(result.cva, expected, max_relative = 1e-12);
        assert_relative_eq!(result.cva_bps, expected / 1_000.0 * 1e4, max_relative = 1e-12);
        assert_relative_eq!(result.hazard_rate, lambda, max_relative = 1e-12);
        assert_relative_eq!(result.total_default_probability(), 1.0 - (-lambda).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_contributions_breakdown() {
        let profile = flat_profile(50.0, 6);
        let credit = CreditSpec::new(100.0, 0.4).unwrap();
        let result = compute_cva(&profile, &credit, 0.03, 1_000.0).unwrap();

        assert_eq!(result.contributions.len(), 6);
        let sum: f64 = result.contributions.iter().map(|c| c.contribution).sum();
        assert_eq!(result.cva, sum);
        for (i, c) in result.contributions.iter().enumerate() {
            assert_eq!(c.time, profile.times[i + 1]);
            assert_relative_eq!(c.discount_factor, (-0.03 * c.time).exp(), max_relative = 1e-12);
        }
        // Later intervals are discounted and survival-weighted more heavily
        assert!(result.contributions[0].contribution > result.contributions[5].contribution);
    }

    #[test]
    fn test_initial_exposure_does_not_contribute() {
        let grid = TimeGrid::monthly(3.0 / 12.0).unwrap();
        let profile =
            ExposureAggregator::aggregate(&grid, &[ValuePath::new(vec![1e9, 0.0, 0.0, 0.0])])
                .unwrap();
        let result = compute_cva(&profile, &CreditSpec::new(300.0, 0.4).unwrap(), 0.03, 1.0).unwrap();
        assert_eq!(result.cva, 0.0);
    }

    #[test]
    fn test_full_recovery_zero_cva() {
        let profile = flat_profile(100.0, 12);
        let result = compute_cva(&profile, &CreditSpec::new(150.0, 1.0).unwrap(), 0.03, 1.0).unwrap();
        assert_eq!(result.cva, 0.0);
        assert_eq!(result.lgd, 0.0);
    }

    #[test]
    fn test_zero_spread_zero_cva() {
        let profile = flat_profile(100.0, 12);
        let result = compute_cva(&profile, &CreditSpec::new(0.0, 0.4).unwrap(), 0.03, 1.0).unwrap();
        assert_eq!(result.cva, 0.0);
        assert_eq!(result.hazard_rate, 0.0);
    }

    #[test]
    fn test_cva_increases_with_spread() {
        let profile = flat_profile(100.0, 24);
        let cvas: Vec<f64> = [0.0, 50.0, 100.0, 250.0, 500.0]
            .iter()
            .map(|&s| {
                compute_cva(&profile, &CreditSpec::new(s, 0.4).unwrap(), 0.03, 1.0)
                    .unwrap()
                    .cva
            })
            .collect();
        assert!(cvas.windows(2).all(|w| w[1] > w[0]), "{:?}", cvas);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let profile = flat_profile(100.0, 12);
        let credit = CreditSpec::new(100.0, 0.4).unwrap();
        assert!(compute_cva(&profile, &credit, 0.03, 0.0).unwrap_err().is_validation());
        assert!(compute_cva(&profile, &credit, f64::NAN, 1.0).unwrap_err().is_validation());

        let bad_credit = CreditSpec {
            counterparty_spread_bps: 100.0,
            recovery_rate: 1.5,
        };
        assert!(compute_cva(&profile, &bad_credit, 0.03, 1.0).unwrap_err().is_validation());

        let mut truncated = profile.clone();
        truncated.epe.pop();
        assert!(compute_cva(&truncated, &credit, 0.03, 1.0).unwrap_err().is_validation());
    }
}
