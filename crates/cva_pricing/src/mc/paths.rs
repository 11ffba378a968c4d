//! Short-rate path generation for Monte Carlo simulation.
//!
//! This module evolves the Hull-White short rate on the monthly monitoring
//! grid with the Euler-Maruyama scheme. Each path draws its shocks from its
//! own [`PricerRng`] stream, so `simulate_path(i)` returns the same path no
//! matter which thread runs it or in what order.

use cva_core::types::{NumericalError, TimeGrid, ValidationError};
use cva_models::models::{HullWhiteModel, HullWhiteParams, StochasticModel};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::SimulationConfig;
use super::error::SimulationError;
use super::parallel::{run_in_batches, BatchRun, CancellationToken, ParallelConfig};
use crate::rng::PricerRng;

/// Short rates on the monitoring grid of one path.
///
/// `rates()[i]` is the short rate at `grid.time(i)`; `rates()[0]` is `r0`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatePath {
    rates: Vec<f64>,
}

impl RatePath {
    /// Wraps precomputed rates.
    pub fn new(rates: Vec<f64>) -> Self {
        Self { rates }
    }

    /// Short rates at each monitoring date.
    #[inline]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Short rate at monitoring date `i`.
    #[inline]
    pub fn rate(&self, i: usize) -> f64 {
        self.rates[i]
    }

    /// Number of monitoring dates.
    #[inline]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True for a path with no dates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// `(time, rate)` pairs against the shared grid.
    pub fn points<'a>(&'a self, grid: &'a TimeGrid) -> impl Iterator<Item = (f64, f64)> + 'a {
        grid.times().iter().copied().zip(self.rates.iter().copied())
    }
}

/// Hull-White short-rate ensemble generator.
///
/// # Examples
///
/// ```rust
/// use cva_core::types::TimeGrid;
/// use cva_pricing::mc::{RateSimulator, SimulationConfig};
///
/// let config = SimulationConfig::builder().num_paths(100).seed(7).build().unwrap();
/// let grid = TimeGrid::monthly(2.0).unwrap();
/// let simulator = RateSimulator::new(&config, grid).unwrap();
///
/// let path = simulator.simulate_path(3).unwrap();
/// assert_eq!(path.len(), 25);
/// assert_eq!(path.rate(0), 0.03);
///
/// // Same index, same path
/// assert_eq!(path, simulator.simulate_path(3).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct RateSimulator {
    params: HullWhiteParams<f64>,
    grid: TimeGrid,
    num_paths: usize,
    base_seed: u64,
}

impl RateSimulator {
    /// Validates the configuration and fixes the base seed.
    ///
    /// Without a configured seed a fresh one is drawn from entropy; it is
    /// available from [`RateSimulator::base_seed`] for replay.
    pub fn new(config: &SimulationConfig, grid: TimeGrid) -> Result<Self, ValidationError> {
        config.validate()?;
        let base_seed = config.seed().unwrap_or_else(PricerRng::entropy_seed);
        debug!(
            base_seed,
            seeded = config.seed().is_some(),
            num_paths = config.num_paths(),
            n_steps = grid.n_steps(),
            model = HullWhiteModel::<f64>::model_name(),
            "rate simulator initialised"
        );
        Ok(Self {
            params: config.hull_white_params()?,
            grid,
            num_paths: config.num_paths(),
            base_seed,
        })
    }

    /// Base seed the per-path streams are derived from.
    #[inline]
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Monitoring grid shared by every path.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Number of paths in the ensemble.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Model parameters in use.
    #[inline]
    pub fn params(&self) -> &HullWhiteParams<f64> {
        &self.params
    }

    /// Simulates path `path` of the ensemble.
    ///
    /// # Errors
    ///
    /// `NumericalError::NonFiniteRate` if the rate overflows; the value is
    /// reported, never clamped.
    pub fn simulate_path(&self, path: usize) -> Result<RatePath, NumericalError> {
        let n_steps = self.grid.n_steps();
        let dt = self.grid.dt();

        let mut shocks = vec![0.0; n_steps * HullWhiteModel::<f64>::brownian_dim()];
        PricerRng::for_path(self.base_seed, path).fill_normal(&mut shocks);

        let mut rates = Vec::with_capacity(n_steps + 1);
        let mut state = HullWhiteModel::initial_state(&self.params);
        rates.push(state.0);

        for (step, dw) in shocks.chunks_exact(HullWhiteModel::<f64>::brownian_dim()).enumerate() {
            state = HullWhiteModel::evolve_step(state, self.grid.time(step), dt, dw, &self.params);
            if !state.0.is_finite() {
                return Err(NumericalError::NonFiniteRate {
                    path,
                    step: step + 1,
                    value: state.0,
                });
            }
            rates.push(state.0);
        }

        Ok(RatePath { rates })
    }

    /// Simulates the whole ensemble in parallel, in path order.
    pub fn simulate(
        &self,
        parallel: &ParallelConfig,
        token: &CancellationToken,
    ) -> Result<BatchRun<RatePath>, SimulationError> {
        run_in_batches(self.num_paths, parallel, token, |path| {
            self.simulate_path(path).map_err(SimulationError::from)
        })
    }
}
