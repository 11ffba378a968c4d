//! Hull-White one-factor interest rate model.
//!
//! The short rate follows:
//! ```text
//! dr(t) = a * (theta(t) - r(t)) * dt + sigma * dW(t)
//! ```
//! where:
//! - r(t) = short rate at time t
//! - a = mean reversion speed (must be positive)
//! - sigma = volatility (zero gives a deterministic path)
//! - theta(t) = mean reversion target, see [`MeanReversionTarget`]
//! - dW(t) = Wiener process increment
//!
//! Rates are not floored: negative short rates are valid states.
//!
//! ## Usage
//!
//! ```
//! use cva_models::models::rates::hull_white::{HullWhiteModel, HullWhiteParams, MeanReversionTarget};
//! use cva_models::models::stochastic::StochasticModel;
//!
//! let params = HullWhiteParams::new(0.1_f64, 0.01, 0.03, MeanReversionTarget::InitialRate).unwrap();
//!
//! let state = HullWhiteModel::initial_state(&params);
//! assert!((state.0 - 0.03_f64).abs() < 1e-15);
//!
//! // A zero shock at the target leaves the rate unchanged
//! let next = HullWhiteModel::evolve_step(state, 0.0, 1.0 / 12.0, &[0.0], &params);
//! assert!((next.0 - 0.03).abs() < 1e-15);
//! ```

use cva_core::types::ValidationError;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::models::stochastic::{SingleState, StochasticModel};

/// Deterministic level the short rate reverts to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "level", rename_all = "snake_case")]
pub enum MeanReversionTarget<T> {
    /// `theta(t) = r0`: rates revert to where they started.
    #[default]
    InitialRate,
    /// `theta(t) = level`: a separate long-term mean.
    Constant(T),
    /// Flat-curve Hull-White drift, `theta(t) = r0 + sigma^2 / (2a^2) * (1 - exp(-2at))`.
    FlatCurveFit,
}

/// Hull-White model parameters.
///
/// # Fields
///
/// * `mean_reversion` - Mean reversion speed (a), must be positive
/// * `volatility` - Short rate volatility (sigma), must be non-negative
/// * `initial_short_rate` - Initial short rate r(0), any sign
/// * `target` - Mean reversion target theta(t)
#[derive(Clone, Debug, PartialEq)]
pub struct HullWhiteParams<T: Float> {
    /// Mean reversion speed (a > 0)
    pub mean_reversion: T,
    /// Volatility of short rate (sigma >= 0)
    pub volatility: T,
    /// Initial short rate r(0)
    pub initial_short_rate: T,
    /// Mean reversion target
    pub target: MeanReversionTarget<T>,
}

impl<T: Float> HullWhiteParams<T> {
    /// Create new Hull-White parameters with validation.
    ///
    /// # Errors
    ///
    /// - `NonFiniteParameter` for NaN or infinite inputs
    /// - `NonPositiveMeanReversion` if `mean_reversion <= 0`
    /// - `NegativeVolatility` if `volatility < 0`
    ///
    /// # Example
    ///
    /// ```
    /// use cva_models::models::rates::hull_white::{HullWhiteParams, MeanReversionTarget};
    ///
    /// let params = HullWhiteParams::new(0.1, 0.0, -0.005, MeanReversionTarget::InitialRate);
    /// assert!(params.is_ok());
    ///
    /// let invalid = HullWhiteParams::new(-0.05, 0.01, 0.03, MeanReversionTarget::InitialRate);
    /// assert!(invalid.is_err());
    /// ```
    pub fn new(
        mean_reversion: T,
        volatility: T,
        initial_short_rate: T,
        target: MeanReversionTarget<T>,
    ) -> Result<Self, ValidationError> {
        let a = to_f64(mean_reversion);
        let sigma = to_f64(volatility);
        ValidationError::ensure_finite("mean_reversion", a)?;
        ValidationError::ensure_finite("volatility", sigma)?;
        ValidationError::ensure_finite("initial_short_rate", to_f64(initial_short_rate))?;
        if let MeanReversionTarget::Constant(level) = target {
            ValidationError::ensure_finite("mean_reversion_level", to_f64(level))?;
        }

        if a <= 0.0 {
            return Err(ValidationError::NonPositiveMeanReversion(a));
        }
        if sigma < 0.0 {
            return Err(ValidationError::NegativeVolatility(sigma));
        }

        Ok(Self {
            mean_reversion,
            volatility,
            initial_short_rate,
            target,
        })
    }

    /// Mean reversion target theta(t).
    pub fn theta(&self, t: T) -> T {
        match self.target {
            MeanReversionTarget::InitialRate => self.initial_short_rate,
            MeanReversionTarget::Constant(level) => level,
            MeanReversionTarget::FlatCurveFit => {
                let a = self.mean_reversion;
                let sigma = self.volatility;
                let two = T::one() + T::one();
                let term = T::one() - (-(two * a * t)).exp();
                self.initial_short_rate + sigma * sigma / (two * a * a) * term
            }
        }
    }
}

#[inline]
fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// Hull-White one-factor model for short rate dynamics.
///
/// # Discretisation
///
/// Euler-Maruyama:
/// ```text
/// r(t+dt) = r(t) + a * (theta(t) - r(t)) * dt + sigma * sqrt(dt) * Z
/// ```
#[derive(Clone, Debug, Default)]
pub struct HullWhiteModel<T: Float> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Float> HullWhiteModel<T> {
    /// Create a new Hull-White model instance.
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: Float> StochasticModel<T> for HullWhiteModel<T> {
    type State = SingleState<T>;
    type Params = HullWhiteParams<T>;

    fn evolve_step(
        state: Self::State,
        t: T,
        dt: T,
        dw: &[T],
        params: &Self::Params,
    ) -> Self::State {
        let r = state.0;
        let a = params.mean_reversion;
        let sigma = params.volatility;

        let drift = a * (params.theta(t) - r) * dt;
        let diffusion = sigma * dt.sqrt() * dw[0];

        SingleState(r + drift + diffusion)
    }

    fn initial_state(params: &Self::Params) -> Self::State {
        SingleState(params.initial_short_rate)
    }

    fn brownian_dim() -> usize {
        1
    }

    fn model_name() -> &'static str {
        "HullWhite1F"
    }
}
