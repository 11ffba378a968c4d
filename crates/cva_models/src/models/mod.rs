//! Stochastic process models.
//!
//! - `StochasticModel` trait: Unified stepping interface used by the simulator
//! - `HullWhiteModel`: Hull-White one-factor short rate model
//!
//! ## Example
//!
//! ```
//! use cva_models::models::{HullWhiteModel, HullWhiteParams, MeanReversionTarget, StochasticModel};
//!
//! let params = HullWhiteParams::new(0.1_f64, 0.01, 0.03, MeanReversionTarget::default()).unwrap();
//! let dt = 1.0 / 12.0;
//! let shocks = [0.3, -1.2, 0.8];
//!
//! let mut state = HullWhiteModel::initial_state(&params);
//! for (i, z) in shocks.iter().enumerate() {
//!     state = HullWhiteModel::evolve_step(state, i as f64 * dt, dt, &[*z], &params);
//! }
//! assert!(state.0.is_finite());
//! ```

pub mod rates;
pub mod stochastic;

pub use rates::{HullWhiteModel, HullWhiteParams, MeanReversionTarget};
pub use stochastic::{SingleState, StochasticModel};
