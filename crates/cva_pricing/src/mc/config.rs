//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration and builder for short-rate
//! ensemble simulations. All parameters are checked at `build()`, before any
//! path is sampled.

use cva_core::types::ValidationError;
use cva_models::models::{HullWhiteParams, MeanReversionTarget};
use serde::Serialize;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Default number of simulation paths.
pub const DEFAULT_NUM_PATHS: usize = 1_000;

/// Default mean reversion speed `a`.
pub const DEFAULT_MEAN_REVERSION: f64 = 0.1;

/// Default short rate volatility `sigma`.
pub const DEFAULT_VOLATILITY: f64 = 0.01;

/// Default initial short rate `r0`.
pub const DEFAULT_INITIAL_SHORT_RATE: f64 = 0.03;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use cva_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .num_paths(10_000)
///     .volatility(0.015)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.num_paths(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// assert_eq!(config.mean_reversion(), 0.1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationConfig {
    num_paths: usize,
    mean_reversion: f64,
    volatility: f64,
    initial_short_rate: f64,
    target: MeanReversionTarget<f64>,
    seed: Option<u64>,
    retained_paths: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_paths: DEFAULT_NUM_PATHS,
            mean_reversion: DEFAULT_MEAN_REVERSION,
            volatility: DEFAULT_VOLATILITY,
            initial_short_rate: DEFAULT_INITIAL_SHORT_RATE,
            target: MeanReversionTarget::InitialRate,
            seed: None,
            retained_paths: 0,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Returns the mean reversion speed.
    #[inline]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Returns the short rate volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the initial short rate, also used as the flat discount rate.
    #[inline]
    pub fn initial_short_rate(&self) -> f64 {
        self.initial_short_rate
    }

    /// Returns the mean reversion target.
    #[inline]
    pub fn target(&self) -> MeanReversionTarget<f64> {
        self.target
    }

    /// Returns the optional seed. `None` means a fresh seed per run.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns how many leading paths are kept for display, capped at the
    /// ensemble size.
    #[inline]
    pub fn retained_paths(&self) -> usize {
        self.retained_paths.min(self.num_paths)
    }

    /// Hull-White parameters for this configuration.
    pub fn hull_white_params(&self) -> Result<HullWhiteParams<f64>, ValidationError> {
        HullWhiteParams::new(
            self.mean_reversion,
            self.volatility,
            self.initial_short_rate,
            self.target,
        )
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidPathCount` if `num_paths` is 0 or greater than [`MAX_PATHS`]
    /// - Any model parameter error from [`HullWhiteParams::new`]
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.num_paths == 0 || self.num_paths > MAX_PATHS {
            return Err(ValidationError::InvalidPathCount {
                count: self.num_paths,
                max: MAX_PATHS,
            });
        }
        self.hull_white_params().map(|_| ())
    }
}

/// Builder for [`SimulationConfig`].
///
/// Unset fields fall back to the defaults of [`SimulationConfig::default`].
///
/// # Examples
///
/// ```rust
/// use cva_models::models::MeanReversionTarget;
/// use cva_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .num_paths(5_000)
///     .target(MeanReversionTarget::FlatCurveFit)
///     .retained_paths(20)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.retained_paths(), 20);
///
/// assert!(SimulationConfig::builder().num_paths(0).build().is_err());
/// assert!(SimulationConfig::builder().mean_reversion(0.0).build().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    num_paths: Option<usize>,
    mean_reversion: Option<f64>,
    volatility: Option<f64>,
    initial_short_rate: Option<f64>,
    target: Option<MeanReversionTarget<f64>>,
    seed: Option<u64>,
    retained_paths: Option<usize>,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulation paths, in [1, 10_000_000].
    #[inline]
    pub fn num_paths(mut self, num_paths: usize) -> Self {
        self.num_paths = Some(num_paths);
        self
    }

    /// Sets the mean reversion speed (must be positive).
    #[inline]
    pub fn mean_reversion(mut self, a: f64) -> Self {
        self.mean_reversion = Some(a);
        self
    }

    /// Sets the short rate volatility (must be non-negative).
    #[inline]
    pub fn volatility(mut self, sigma: f64) -> Self {
        self.volatility = Some(sigma);
        self
    }

    /// Sets the initial short rate.
    #[inline]
    pub fn initial_short_rate(mut self, r0: f64) -> Self {
        self.initial_short_rate = Some(r0);
        self
    }

    /// Sets the mean reversion target.
    #[inline]
    pub fn target(mut self, target: MeanReversionTarget<f64>) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how many leading paths to keep for display.
    #[inline]
    pub fn retained_paths(mut self, count: usize) -> Self {
        self.retained_paths = Some(count);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<SimulationConfig, ValidationError> {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            num_paths: self.num_paths.unwrap_or(defaults.num_paths),
            mean_reversion: self.mean_reversion.unwrap_or(defaults.mean_reversion),
            volatility: self.volatility.unwrap_or(defaults.volatility),
            initial_short_rate: self
                .initial_short_rate
                .unwrap_or(defaults.initial_short_rate),
            target: self.target.unwrap_or(defaults.target),
            seed: self.seed,
            retained_paths: self.retained_paths.unwrap_or(defaults.retained_paths),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SimulationConfig::builder().build().unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.num_paths(), 1_000);
        assert_eq!(config.volatility(), 0.01);
        assert_eq!(config.initial_short_rate(), 0.03);
        assert_eq!(config.target(), MeanReversionTarget::InitialRate);
        assert_eq!(config.seed(), None);
        assert_eq!(config.retained_paths(), 0);
    }

    #[test]
    fn test_builder_rejects_path_counts() {
        assert_eq!(
            SimulationConfig::builder().num_paths(0).build(),
            Err(ValidationError::InvalidPathCount {
                count: 0,
                max: MAX_PATHS
            })
        );
        assert!(SimulationConfig::builder()
            .num_paths(MAX_PATHS + 1)
            .build()
            .is_err());
        assert!(SimulationConfig::builder().num_paths(1).build().is_ok());
    }

    #[test]
    fn test_builder_rejects_model_parameters() {
        assert_eq!(
            SimulationConfig::builder().mean_reversion(-0.1).build(),
            Err(ValidationError::NonPositiveMeanReversion(-0.1))
        );
        assert_eq!(
            SimulationConfig::builder().volatility(-0.01).build(),
            Err(ValidationError::NegativeVolatility(-0.01))
        );
        assert!(SimulationConfig::builder().volatility(0.0).build().is_ok());
        assert!(SimulationConfig::builder()
            .initial_short_rate(-0.005)
            .build()
            .is_ok());
    }

    #[test]
    fn test_retained_paths_capped_at_ensemble() {
        let config = SimulationConfig::builder()
            .num_paths(5)
            .retained_paths(50)
            .build()
            .unwrap();
        assert_eq!(config.retained_paths(), 5);
    }

    #[test]
    fn test_maybe_seed() {
        let config = SimulationConfig::builder()
            .seed(3)
            .maybe_seed(None)
            .build()
            .unwrap();
        assert_eq!(config.seed(), None);
    }
}
