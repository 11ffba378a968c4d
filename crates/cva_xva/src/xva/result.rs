//! CVA result structures.
//!
//! Provides the per-interval breakdown and the headline figures of a
//! unilateral CVA calculation.

use serde::{Deserialize, Serialize};

use crate::exposure::ExposureProfile;

/// Contribution of one monitoring interval `(t_{i-1}, t_i]` to CVA.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CvaContribution {
    /// Interval end date `t_i` in years.
    pub time: f64,
    /// Expected positive exposure at `t_i`.
    pub epe: f64,
    /// Marginal default probability over the interval.
    pub default_probability: f64,
    /// Risk-free discount factor to `t_i`.
    pub discount_factor: f64,
    /// `LGD × EPE × PD × DF`.
    pub contribution: f64,
}

/// Unilateral CVA with its breakdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CvaResult {
    /// Credit valuation adjustment in currency units (non-negative).
    pub cva: f64,
    /// CVA as basis points of notional.
    pub cva_bps: f64,
    /// Constant hazard rate implied by the spread.
    pub hazard_rate: f64,
    /// Loss given default, `1 - R`.
    pub lgd: f64,
    /// One entry per interval, in date order.
    pub contributions: Vec<CvaContribution>,
    /// Exposure profile the CVA was integrated over.
    pub exposure: ExposureProfile,
}

impl CvaResult {
    /// Sum of the marginal default probabilities, i.e. `PD(0, T)`.
    pub fn total_default_probability(&self) -> f64 {
        self.contributions.iter().map(|c| c.default_probability).sum()
    }

    /// Interval with the largest contribution, if any.
    pub fn peak_contribution(&self) -> Option<&CvaContribution> {
        self.contributions
            .iter()
            .max_by(|a, b| a.contribution.total_cmp(&b.contribution))
    }
}
