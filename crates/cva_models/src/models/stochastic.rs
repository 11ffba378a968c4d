//! StochasticModel trait for a unified stochastic process interface.
//!
//! The Monte Carlo layer only needs to know how to start a path and how to
//! advance it by one step given Brownian increments. Models expose exactly
//! that through [`StochasticModel`].
//!
//! ## Example
//!
//! ```
//! use cva_models::models::stochastic::{SingleState, StochasticModel};
//!
//! // Deterministic exponential decay, dx = -k x dt
//! struct Decay;
//!
//! impl StochasticModel<f64> for Decay {
//!     type State = SingleState<f64>;
//!     type Params = f64;
//!
//!     fn evolve_step(state: Self::State, _t: f64, dt: f64, _dw: &[f64], k: &f64) -> Self::State {
//!         SingleState(state.0 - k * state.0 * dt)
//!     }
//!
//!     fn initial_state(_k: &f64) -> Self::State {
//!         SingleState(1.0)
//!     }
//!
//!     fn brownian_dim() -> usize {
//!         0
//!     }
//!
//!     fn model_name() -> &'static str {
//!         "Decay"
//!     }
//! }
//!
//! let next = Decay::evolve_step(Decay::initial_state(&0.5), 0.0, 0.1, &[], &0.5);
//! assert!((next.0 - 0.95).abs() < 1e-15);
//! ```

use num_traits::Float;

/// Single-factor state (e.g. a short rate).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SingleState<T: Float>(pub T);

/// Unified interface for discretised stochastic processes.
///
/// # Type Parameters
/// * `T` - Float type
///
/// # Static Dispatch Only
/// Stepping is an associated function. Simulators are generic over the model
/// type, never `Box<dyn StochasticModel>`.
pub trait StochasticModel<T: Float> {
    /// Model-specific state type, passed by value between steps.
    type State: Copy;

    /// Model parameters type.
    type Params: Clone;

    /// Evolve state by one time step.
    ///
    /// # Arguments
    /// * `state` - State at time `t`
    /// * `t` - Start of the step, for time-dependent drifts
    /// * `dt` - Time step size (must be positive)
    /// * `dw` - Standard normal draws (length must equal `brownian_dim()`)
    /// * `params` - Model parameters
    ///
    /// # Preconditions
    /// - `dt > 0`
    /// - `dw.len() == Self::brownian_dim()`
    fn evolve_step(state: Self::State, t: T, dt: T, dw: &[T], params: &Self::Params)
        -> Self::State;

    /// Get initial state from model parameters.
    fn initial_state(params: &Self::Params) -> Self::State;

    /// Number of standard normal draws required per step.
    fn brownian_dim() -> usize;

    /// Model name for logging and debugging.
    fn model_name() -> &'static str;
}
