//! End-to-end CVA calculation.
//!
//! A [`CvaRequest`] is validated in full before any path is drawn. Each path
//! is then simulated and valued in one parallel work item, so only the
//! value paths (and the first few rate paths, if requested) are held in
//! memory. The ensemble is reduced to an exposure profile and integrated
//! into CVA.
//!
//! ```text
//! validate → simulate + value (per path, batched) → aggregate → adjust
//! ```

use cva_core::types::{TimeGrid, ValidationError};
use cva_models::instruments::{SwapSpec, SwapValuer, ValuePath};
use cva_models::models::MeanReversionTarget;
use cva_pricing::mc::{
    run_in_batches, BatchRun, CancellationToken, ParallelConfig, RatePath, RateSimulator,
    SimulationConfig,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::exposure::ExposureAggregator;
use crate::xva::{compute_cva, CreditSpec, CvaError, CvaResult};

/// Simulation settings as supplied by a caller.
///
/// Every field is optional; unset fields take the defaults of
/// [`SimulationConfig`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of Monte Carlo paths.
    pub num_paths: Option<usize>,
    /// Mean-reversion speed `a`.
    pub mean_reversion: Option<f64>,
    /// Short-rate volatility `σ`.
    pub volatility: Option<f64>,
    /// Initial short rate `r0`, also the flat discount rate.
    pub initial_short_rate: Option<f64>,
    /// Mean-reversion target `θ(t)`.
    pub target: Option<MeanReversionTarget<f64>>,
    /// RNG seed. `None` draws a fresh seed, reported back in the output.
    pub seed: Option<u64>,
    /// Leading paths kept in the report.
    pub retained_paths: Option<usize>,
}

impl SimulationSettings {
    /// Resolves the settings into a validated [`SimulationConfig`].
    pub fn to_config(&self) -> Result<SimulationConfig, ValidationError> {
        let mut builder = SimulationConfig::builder().maybe_seed(self.seed);
        if let Some(n) = self.num_paths {
            builder = builder.num_paths(n);
        }
        if let Some(a) = self.mean_reversion {
            builder = builder.mean_reversion(a);
        }
        if let Some(sigma) = self.volatility {
            builder = builder.volatility(sigma);
        }
        if let Some(r0) = self.initial_short_rate {
            builder = builder.initial_short_rate(r0);
        }
        if let Some(target) = self.target {
            builder = builder.target(target);
        }
        if let Some(k) = self.retained_paths {
            builder = builder.retained_paths(k);
        }
        builder.build()
    }
}

/// One CVA calculation request.
///
/// # Examples
///
/// ```
/// use cva_xva::CvaRequest;
///
/// let request: CvaRequest = serde_json::from_str(r#"{
///     "counterparty": "ACME Corp",
///     "swap": { "notional": 1e8, "fixed_rate": 0.025, "maturity_years": 5.0 },
///     "credit": { "counterparty_spread_bps": 150.0, "recovery_rate": 0.4 },
///     "simulation": { "num_paths": 500, "seed": 42 }
/// }"#).unwrap();
///
/// let config = request.validate().unwrap();
/// assert_eq!(config.num_paths(), 500);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CvaRequest {
    /// Counterparty name, carried through to the report only.
    #[serde(default)]
    pub counterparty: Option<String>,
    /// Swap terms.
    pub swap: SwapSpec,
    /// Counterparty credit terms.
    pub credit: CreditSpec,
    /// Simulation settings.
    #[serde(default)]
    pub simulation: SimulationSettings,
    /// Parallel execution settings. Never affect the result.
    #[serde(default)]
    pub parallel: ParallelConfig,
}

impl CvaRequest {
    /// Creates a request with default simulation and parallel settings.
    pub fn new(swap: SwapSpec, credit: CreditSpec) -> Self {
        Self {
            counterparty: None,
            swap,
            credit,
            simulation: SimulationSettings::default(),
            parallel: ParallelConfig::default(),
        }
    }

    /// Sets the counterparty name.
    pub fn with_counterparty(mut self, name: impl Into<String>) -> Self {
        self.counterparty = Some(name.into());
        self
    }

    /// Sets the simulation settings.
    pub fn with_simulation(mut self, simulation: SimulationSettings) -> Self {
        self.simulation = simulation;
        self
    }

    /// Sets the parallel execution settings.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates every input and returns the resolved simulation config.
    ///
    /// # Errors
    ///
    /// The first `ValidationError` found, checking swap, credit and
    /// simulation terms in that order.
    pub fn validate(&self) -> Result<SimulationConfig, ValidationError> {
        self.swap.validate()?;
        self.credit.validate()?;
        self.simulation.to_config()
    }
}

/// Rate and value path of one retained simulation path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplePath {
    /// Path index within the ensemble.
    pub index: usize,
    /// Simulated short rates.
    pub rates: RatePath,
    /// Swap values along the same path.
    pub values: ValuePath,
}

/// Full output of a completed calculation.
#[derive(Clone, Debug, Serialize)]
pub struct CvaReport {
    /// Counterparty name from the request.
    pub counterparty: Option<String>,
    /// Swap terms.
    pub swap: SwapSpec,
    /// Credit terms.
    pub credit: CreditSpec,
    /// Resolved simulation configuration.
    pub simulation: SimulationConfig,
    /// Seed actually used; replaying with it reproduces the run.
    pub effective_seed: u64,
    /// Number of simulated paths.
    pub num_paths: usize,
    /// Monitoring grid.
    pub time_grid: TimeGrid,
    /// CVA, breakdown and exposure profile.
    pub result: CvaResult,
    /// Leading paths kept for plotting.
    pub sample_paths: Vec<SamplePath>,
}

/// Outcome of [`CvaEngine::run`].
#[derive(Clone, Debug)]
pub enum CalculationOutcome {
    /// The calculation finished.
    Completed(Box<CvaReport>),
    /// The calculation was cancelled between batches. Nothing is kept.
    Cancelled {
        /// Paths finished before the stop.
        paths_completed: usize,
    },
}

impl CalculationOutcome {
    /// Returns true if the run was cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CalculationOutcome::Cancelled { .. })
    }

    /// Returns the report of a completed run.
    pub fn into_report(self) -> Option<CvaReport> {
        match self {
            CalculationOutcome::Completed(report) => Some(*report),
            CalculationOutcome::Cancelled { .. } => None,
        }
    }
}

struct PathOutcome {
    rates: Option<RatePath>,
    values: ValuePath,
}

/// Runs the CVA pipeline.
///
/// # Examples
///
/// ```
/// use cva_models::instruments::{SwapPosition, SwapSpec};
/// use cva_pricing::mc::CancellationToken;
/// use cva_xva::engine::SimulationSettings;
/// use cva_xva::xva::CreditSpec;
/// use cva_xva::{CvaEngine, CvaRequest};
///
/// let swap = SwapSpec::new(1_000_000.0, 0.03, 2.0, SwapPosition::ReceiveFixed).unwrap();
/// let credit = CreditSpec::new(100.0, 0.4).unwrap();
/// let request = CvaRequest::new(swap, credit).with_simulation(SimulationSettings {
///     num_paths: Some(200),
///     seed: Some(1),
///     ..Default::default()
/// });
///
/// let report = CvaEngine::run(&request, &CancellationToken::new())
///     .unwrap()
///     .into_report()
///     .unwrap();
/// assert!(report.result.cva >= 0.0);
/// assert_eq!(report.effective_seed, 1);
/// ```
pub struct CvaEngine;

impl CvaEngine {
    /// Validates, simulates, values, aggregates and adjusts.
    ///
    /// # Errors
    ///
    /// - `CvaError::Validation` before any simulation
    /// - `CvaError::Numerical` if a rate, value or aggregate is non-finite
    /// - `CvaError::Simulation` if the worker pool fails or a worker panics
    pub fn run(
        request: &CvaRequest,
        token: &CancellationToken,
    ) -> Result<CalculationOutcome, CvaError> {
        let config = request.validate()?;
        let valuer = SwapValuer::new(&request.swap)?;
        let simulator = RateSimulator::new(&config, valuer.grid().clone())?;
        let retained = config.retained_paths();

        debug!(
            counterparty = request.counterparty.as_deref().unwrap_or(""),
            num_paths = config.num_paths(),
            n_steps = valuer.grid().n_steps(),
            seed = simulator.base_seed(),
            batch_size = request.parallel.batch_size,
            "starting cva calculation"
        );

        let work = |path: usize| -> Result<PathOutcome, CvaError> {
            let rates = simulator.simulate_path(path)?;
            let values = valuer.value_path(path, rates.rates())?;
            Ok(PathOutcome {
                rates: (path < retained).then_some(rates),
                values,
            })
        };
        let run = run_in_batches(config.num_paths(), &request.parallel, token, work)?;

        let outcomes = match run {
            BatchRun::Completed(outcomes) => outcomes,
            BatchRun::Cancelled { paths_completed } => {
                debug!(paths_completed, "cva calculation cancelled");
                return Ok(CalculationOutcome::Cancelled { paths_completed });
            }
        };

        let mut sample_paths = Vec::with_capacity(retained);
        let mut value_paths = Vec::with_capacity(outcomes.len());
        for (index, outcome) in outcomes.into_iter().enumerate() {
            if let Some(rates) = outcome.rates {
                sample_paths.push(SamplePath {
                    index,
                    rates,
                    values: outcome.values.clone(),
                });
            }
            value_paths.push(outcome.values);
        }

        let profile = ExposureAggregator::aggregate(valuer.grid(), &value_paths)?;
        drop(value_paths);
        let result = compute_cva(
            &profile,
            &request.credit,
            config.initial_short_rate(),
            request.swap.notional,
        )?;

        debug!(
            cva = result.cva,
            cva_bps = result.cva_bps,
            max_epe = result.exposure.max_epe,
            "cva calculation completed"
        );

        Ok(CalculationOutcome::Completed(Box::new(CvaReport {
            counterparty: request.counterparty.clone(),
            swap: request.swap,
            credit: request.credit,
            num_paths: config.num_paths(),
            effective_seed: simulator.base_seed(),
            time_grid: valuer.grid().clone(),
            simulation: config,
            result,
            sample_paths,
        })))
    }
}
