//! Interest rate stochastic models.
//!
//! - [`HullWhiteModel`]: Hull-White one-factor model for short rate dynamics
//!
//! ```text
//! dr(t) = a * (theta(t) - r(t)) * dt + sigma * dW(t)
//! ```

pub mod hull_white;

pub use hull_white::{HullWhiteModel, HullWhiteParams, MeanReversionTarget};
