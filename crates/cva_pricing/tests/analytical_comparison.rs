//! Analytical comparison tests for the short-rate simulation.
//!
//! The Euler-Maruyama recursion for a constant mean reversion target is
//! linear in the shocks, so its terminal mean and variance are known exactly:
//!
//! ```text
//! E[r_n]   = theta + (r0 - theta) * q^n,              q = 1 - a dt
//! Var[r_n] = sigma^2 dt * (1 - q^(2n)) / (1 - q^2)
//! ```
//!
//! # Test Categories
//!
//! 1. **Moments**: sample mean and variance vs the exact discrete moments
//! 2. **Convergence**: sample-mean error shrinks with path count

use cva_core::types::TimeGrid;
use cva_models::models::MeanReversionTarget;
use cva_pricing::mc::{
    BatchRun, CancellationToken, ParallelConfig, RatePath, RateSimulator, SimulationConfig,
};

const A: f64 = 0.2;
const SIGMA: f64 = 0.015;
const R0: f64 = 0.01;
const THETA: f64 = 0.04;
const MATURITY: f64 = 3.0;

fn exact_moments(n: usize) -> (f64, f64) {
    let dt = 1.0 / 12.0;
    let q = 1.0 - A * dt;
    let mean = THETA + (R0 - THETA) * q.powi(n as i32);
    let var = SIGMA * SIGMA * dt * (1.0 - q.powi(2 * n as i32)) / (1.0 - q * q);
    (mean, var)
}

fn simulate(num_paths: usize, seed: u64) -> Vec<RatePath> {
    let config = SimulationConfig::builder()
        .num_paths(num_paths)
        .mean_reversion(A)
        .volatility(SIGMA)
        .initial_short_rate(R0)
        .target(MeanReversionTarget::Constant(THETA))
        .seed(seed)
        .build()
        .unwrap();
    let simulator = RateSimulator::new(&config, TimeGrid::monthly(MATURITY).unwrap()).unwrap();
    match simulator
        .simulate(&ParallelConfig::default(), &CancellationToken::new())
        .unwrap()
    {
        BatchRun::Completed(paths) => paths,
        BatchRun::Cancelled { .. } => panic!("unexpected cancellation"),
    }
}

fn sample_moments(paths: &[RatePath], step: usize) -> (f64, f64) {
    let n = paths.len() as f64;
    let mean = paths.iter().map(|p| p.rate(step)).sum::<f64>() / n;
    let var = paths
        .iter()
        .map(|p| (p.rate(step) - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    (mean, var)
}

// ============================================================================
// Moment Tests
// ============================================================================

#[test]
fn test_terminal_moments_match_discrete_scheme() {
    let paths = simulate(20_000, 42);
    let (mc_mean, mc_var) = sample_moments(&paths, 36);
    let (mean, var) = exact_moments(36);

    let std_err = (var / paths.len() as f64).sqrt();
    assert!(
        (mc_mean - mean).abs() < 5.0 * std_err,
        "mean: mc={}, exact={}, se={}",
        mc_mean,
        mean,
        std_err
    );
    // Relative standard error of the sample variance is about sqrt(2/n) = 1%
    assert!(
        (mc_var / var - 1.0).abs() < 0.05,
        "variance: mc={}, exact={}",
        mc_var,
        var
    );
}

#[test]
fn test_intermediate_moments_match_discrete_scheme() {
    let paths = simulate(20_000, 7);
    for step in [1, 6, 12, 24] {
        let (mc_mean, mc_var) = sample_moments(&paths, step);
        let (mean, var) = exact_moments(step);
        let std_err = (var / paths.len() as f64).sqrt();
        assert!((mc_mean - mean).abs() < 5.0 * std_err, "step {}", step);
        assert!((mc_var / var - 1.0).abs() < 0.05, "step {}", step);
    }
}

// ============================================================================
// Convergence Tests
// ============================================================================

#[test]
fn test_mean_error_shrinks_with_path_count() {
    let (mean, _) = exact_moments(36);

    // Average absolute error over independent seeds, small vs large ensembles
    let avg_error = |num_paths: usize| -> f64 {
        (0..8)
            .map(|seed| {
                let paths = simulate(num_paths, 1_000 + seed);
                (sample_moments(&paths, 36).0 - mean).abs()
            })
            .sum::<f64>()
            / 8.0
    };

    let small = avg_error(200);
    let large = avg_error(12_800);
    // Expected ratio is sqrt(64) = 8; allow generous sampling noise
    assert!(large < small / 2.0, "small={}, large={}", small, large);
}
