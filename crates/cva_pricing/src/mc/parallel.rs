//! Rayon-based batch execution over the path dimension.
//!
//! Paths are processed in fixed-size batches. Each batch runs in parallel
//! and is collected in path order; batches run one after another so that a
//! [`CancellationToken`] can stop the run between them.
//!
//! Results never depend on [`ParallelConfig`]: every path owns its RNG
//! stream, output order is path order, and a failing run reports the
//! failure with the lowest index.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::error::SimulationError;

/// Default number of paths per batch.
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Paths per batch; cancellation is checked between batches.
    pub batch_size: usize,
    /// Dedicated worker count. `None` uses the global rayon pool.
    pub num_threads: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            num_threads: None,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, num_threads: Option<usize>) -> Self {
        Self {
            batch_size: batch_size.max(1),
            num_threads,
        }
    }

    fn build_pool(&self) -> Result<Option<rayon::ThreadPool>, SimulationError> {
        match self.num_threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                Ok(Some(pool))
            }
            None => Ok(None),
        }
    }
}

/// Cooperative cancellation flag shared between a caller and a running
/// calculation.
///
/// # Examples
///
/// ```rust
/// use cva_pricing::mc::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
///
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Takes effect at the next batch boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Outcome of a batched run.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchRun<R> {
    /// Every item was processed; results are in item order.
    Completed(Vec<R>),
    /// Stopped at a batch boundary. Partial results are discarded.
    Cancelled {
        /// Items finished before the stop.
        paths_completed: usize,
    },
}

/// Applies `work` to every index in `0..n_items`, batch by batch.
///
/// The error type is the caller's: `work` failures are returned as-is and
/// execution failures arrive through `From<SimulationError>`.
///
/// # Errors
///
/// - The `work` error with the lowest item index
/// - `SimulationError::ThreadPool` if the dedicated pool cannot be built
/// - `SimulationError::WorkerPanicked` if `work` panics
///
/// # Examples
///
/// ```rust
/// use cva_pricing::mc::{run_in_batches, BatchRun, CancellationToken, ParallelConfig, SimulationError};
///
/// let config = ParallelConfig::new(4, None);
/// let run = run_in_batches(10, &config, &CancellationToken::new(), |i| {
///     Ok::<_, SimulationError>(i * i)
/// })
/// .unwrap();
///
/// match run {
///     BatchRun::Completed(squares) => assert_eq!(squares[9], 81),
///     BatchRun::Cancelled { .. } => unreachable!(),
/// }
/// ```
pub fn run_in_batches<R, E, F>(
    n_items: usize,
    config: &ParallelConfig,
    token: &CancellationToken,
    work: F,
) -> Result<BatchRun<R>, E>
where
    R: Send,
    E: Send + From<SimulationError>,
    F: Fn(usize) -> Result<R, E> + Sync + Send,
{
    let batch_size = config.batch_size.max(1);
    let pool = config.build_pool()?;
    let run = || run_batches(n_items, batch_size, token, &work);
    match pool {
        Some(pool) => pool.install(run),
        None => run(),
    }
}

fn run_batches<R, E, F>(
    n_items: usize,
    batch_size: usize,
    token: &CancellationToken,
    work: &F,
) -> Result<BatchRun<R>, E>
where
    R: Send,
    E: Send + From<SimulationError>,
    F: Fn(usize) -> Result<R, E> + Sync + Send,
{
    let mut results = Vec::with_capacity(n_items);

    for (batch, start) in (0..n_items).step_by(batch_size).enumerate() {
        if token.is_cancelled() {
            debug!(batch, paths_completed = results.len(), "run cancelled");
            return Ok(BatchRun::Cancelled {
                paths_completed: results.len(),
            });
        }

        let end = (start + batch_size).min(n_items);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            (start..end)
                .into_par_iter()
                .map(work)
                .collect::<Vec<Result<R, E>>>()
        }));

        match outcome {
            Ok(batch_results) => {
                for item in batch_results {
                    results.push(item?);
                }
            }
            Err(payload) => {
                return Err(SimulationError::WorkerPanicked {
                    batch,
                    message: panic_message(payload.as_ref()),
                }
                .into())
            }
        }
        trace!(batch, completed = results.len(), "batch completed");
    }

    Ok(BatchRun::Completed(results))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cva_core::types::NumericalError;

    fn square(i: usize) -> Result<usize, SimulationError> {
        Ok(i * i)
    }

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.num_threads, None);
        assert_eq!(ParallelConfig::new(0, None).batch_size, 1);
    }

    #[test]
    fn test_results_in_item_order() {
        let token = CancellationToken::new();
        for batch_size in [1, 7, 64, 1000] {
            let config = ParallelConfig::new(batch_size, None);
            match run_in_batches(500, &config, &token, square).unwrap() {
                BatchRun::Completed(v) => {
                    assert_eq!(v, (0..500).map(|i| i * i).collect::<Vec<_>>());
                }
                other => panic!("Expected completion, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_dedicated_pool() {
        let config = ParallelConfig::new(16, Some(2));
        let run = run_in_batches(100, &config, &CancellationToken::new(), square).unwrap();
        assert_eq!(run, BatchRun::Completed((0..100).map(|i| i * i).collect()));
    }

    #[test]
    fn test_zero_items() {
        let run = run_in_batches(0, &ParallelConfig::default(), &CancellationToken::new(), square)
            .unwrap();
        assert_eq!(run, BatchRun::Completed(vec![]));
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let run = run_in_batches(100, &ParallelConfig::default(), &token, square).unwrap();
        assert_eq!(run, BatchRun::Cancelled { paths_completed: 0 });
    }

    #[test]
    fn test_cancelled_between_batches() {
        let token = CancellationToken::new();
        let handle = token.clone();
        let config = ParallelConfig::new(100, None);
        let run = run_in_batches(1_000, &config, &token, |i| {
            if i == 250 {
                handle.cancel();
            }
            square(i)
        })
        .unwrap();
        // The batch in flight (200..300) finishes, the next one never starts
        assert_eq!(run, BatchRun::Cancelled { paths_completed: 300 });
    }

    #[test]
    fn test_work_error_is_returned() {
        let config = ParallelConfig::new(10, None);
        let result = run_in_batches(50, &config, &CancellationToken::new(), |i| {
            if i == 23 {
                Err(SimulationError::WorkerPanicked {
                    batch: 99,
                    message: "sentinel".to_string(),
                })
            } else {
                square(i)
            }
        });
        match result {
            Err(SimulationError::WorkerPanicked { batch, message }) => {
                assert_eq!(batch, 99);
                assert_eq!(message, "sentinel");
            }
            other => panic!("Expected work error, got {:?}", other),
        }
    }

    #[test]
    fn test_lowest_failing_index_wins() {
        let failing = |i: usize| -> Result<usize, SimulationError> {
            if i % 97 == 41 {
                Err(NumericalError::NonFiniteRate {
                    path: i,
                    step: 3,
                    value: f64::INFINITY,
                }
                .into())
            } else {
                square(i)
            }
        };

        for (batch_size, threads) in [(2_000, Some(1)), (2_000, Some(4)), (2_000, Some(8)), (50, None)] {
            let config = ParallelConfig::new(batch_size, threads);
            match run_in_batches(2_000, &config, &CancellationToken::new(), failing) {
                Err(SimulationError::Numerical(NumericalError::NonFiniteRate { path, .. })) => {
                    assert_eq!(path, 41)
                }
                other => panic!("Expected NonFiniteRate, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_worker_panic_is_caught() {
        let config = ParallelConfig::new(10, None);
        let result = run_in_batches(50, &config, &CancellationToken::new(), |i| {
            if i == 17 {
                panic!("path {} exploded", i);
            }
            square(i)
        });
        match result {
            Err(SimulationError::WorkerPanicked { batch, .. }) => assert_eq!(batch, 1),
            other => panic!("Expected WorkerPanicked, got {:?}", other),
        }
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }
}
