//! Swap contract definitions.
//!
//! A single vanilla fixed-for-floating interest rate swap, monitored on the
//! monthly grid out to its maturity.

use std::fmt;

use cva_core::types::{TimeGrid, ValidationError};
use serde::{Deserialize, Serialize};

/// Swap position (receiver or payer of the fixed rate).
///
/// - **ReceiveFixed** (Receiver swap): Receive fixed rate, pay floating rate
/// - **PayFixed** (Payer swap): Pay fixed rate, receive floating rate
///
/// # Examples
/// ```
/// use cva_models::instruments::SwapPosition;
///
/// assert_eq!(SwapPosition::default(), SwapPosition::ReceiveFixed);
/// assert_eq!(SwapPosition::PayFixed.sign(), -1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapPosition {
    /// Receive fixed rate, pay floating rate.
    #[default]
    ReceiveFixed,
    /// Pay fixed rate, receive floating rate.
    PayFixed,
}

impl SwapPosition {
    /// Multiplier applied to the receiver value.
    ///
    /// - ReceiveFixed: +1
    /// - PayFixed: -1
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            SwapPosition::ReceiveFixed => 1.0,
            SwapPosition::PayFixed => -1.0,
        }
    }
}

impl fmt::Display for SwapPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapPosition::ReceiveFixed => write!(f, "Receive Fixed"),
            SwapPosition::PayFixed => write!(f, "Pay Fixed"),
        }
    }
}

/// Interest rate swap terms.
///
/// # Fields
/// - `notional`: Notional principal, must be positive
/// - `fixed_rate`: Fixed coupon as a decimal (2.5% = 0.025)
/// - `maturity_years`: Time to maturity, rounded to whole months on the grid
/// - `position`: Receive-fixed unless stated otherwise
///
/// # Examples
/// ```
/// use cva_models::instruments::{SwapPosition, SwapSpec};
///
/// let swap = SwapSpec::new(100_000_000.0, 0.025, 5.0, SwapPosition::ReceiveFixed).unwrap();
/// assert_eq!(swap.time_grid().unwrap().n_steps(), 60);
///
/// assert!(SwapSpec::new(0.0, 0.025, 5.0, SwapPosition::ReceiveFixed).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapSpec {
    /// Notional principal.
    pub notional: f64,
    /// Fixed rate as a decimal.
    pub fixed_rate: f64,
    /// Maturity in years.
    pub maturity_years: f64,
    /// Receiver or payer of the fixed rate.
    #[serde(default)]
    pub position: SwapPosition,
}

impl SwapSpec {
    /// Creates validated swap terms.
    pub fn new(
        notional: f64,
        fixed_rate: f64,
        maturity_years: f64,
        position: SwapPosition,
    ) -> Result<Self, ValidationError> {
        let swap = Self {
            notional,
            fixed_rate,
            maturity_years,
            position,
        };
        swap.validate()?;
        Ok(swap)
    }

    /// Checks the terms without building a grid.
    ///
    /// # Errors
    /// - `NonFiniteParameter` for NaN or infinite fields
    /// - `NonPositiveNotional` if `notional <= 0`
    /// - `NonPositiveMaturity` if `maturity_years <= 0`
    /// - `MaturityTooLong` beyond [`cva_core::types::MAX_MATURITY_YEARS`]
    /// - `MaturityBelowMonitoringStep` if the maturity rounds to zero months
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::ensure_finite("notional", self.notional)?;
        ValidationError::ensure_finite("fixed_rate", self.fixed_rate)?;
        if self.notional <= 0.0 {
            return Err(ValidationError::NonPositiveNotional(self.notional));
        }
        TimeGrid::monthly_steps(self.maturity_years).map(|_| ())
    }

    /// Monthly monitoring grid ending at the (rounded) maturity.
    #[inline]
    pub fn time_grid(&self) -> Result<TimeGrid, ValidationError> {
        TimeGrid::monthly(self.maturity_years)
    }

    /// Returns true for a payer swap.
    #[inline]
    pub fn is_payer(&self) -> bool {
        self.position == SwapPosition::PayFixed
    }
}
