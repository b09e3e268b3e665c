use crate::state::Trajectory;
use crate::timeseries::FloatValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Carbon reservoirs tracked by a [`crate::state::ClimateState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reservoir {
    Atmosphere,
    Ocean,
    Land,
}

impl fmt::Display for Reservoir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reservoir::Atmosphere => "C_atm",
            Reservoir::Ocean => "C_ocean",
            Reservoir::Land => "C_land",
        };
        f.write_str(name)
    }
}

/// Error type for invalid operations.
#[derive(Error, Debug)]
pub enum CambioError {
    #[error("Invalid scenario parameters: {0}")]
    InvalidScenarioParameters(String),
    #[error("Scenario metadata is missing required key `{key}`")]
    MissingScenarioMetadata { key: String },
    #[error("Time grid has {time_len} points but the emission series has {emission_len}")]
    ScenarioMismatch {
        time_len: usize,
        emission_len: usize,
    },
    #[error("Numerical instability at step {step}: {reservoir} became {value}")]
    NumericalInstability {
        step: usize,
        reservoir: Reservoir,
        value: FloatValue,
    },
    #[error("Invalid value for parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Convenience type for `Result<T, CambioError>`.
pub type CambioResult<T> = Result<T, CambioError>;

/// A single step produced a non-physical reservoir value.
///
/// Step functions do not know where they sit in a run, so they report this and
/// the runner attaches the step index.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("{reservoir} became {value}")]
pub struct Instability {
    pub reservoir: Reservoir,
    pub value: FloatValue,
}

impl Instability {
    /// Returns an error if `value` is not finite or not a usable amount of
    /// carbon for `reservoir`.
    ///
    /// Atmosphere and ocean must stay strictly positive: CO2 forcing and surface
    /// pH are logarithmic in them. An empty land reservoir is allowed.
    pub fn check(reservoir: Reservoir, value: FloatValue) -> Result<(), Instability> {
        let physical = match reservoir {
            Reservoir::Atmosphere | Reservoir::Ocean => value > 0.0,
            Reservoir::Land => value >= 0.0,
        };
        if value.is_finite() && physical {
            Ok(())
        } else {
            Err(Instability { reservoir, value })
        }
    }

    pub fn at_step(self, step: usize) -> CambioError {
        CambioError::NumericalInstability {
            step,
            reservoir: self.reservoir,
            value: self.value,
        }
    }
}

/// A run that stopped early.
///
/// Holds every state produced before the failure so the breakdown point can be
/// inspected.
#[derive(Error, Debug)]
#[error("run aborted after {} states: {error}", trajectory.len())]
pub struct RunFailure {
    pub trajectory: Trajectory,
    #[source]
    pub error: CambioError,
}

impl RunFailure {
    pub fn new(trajectory: Trajectory, error: CambioError) -> Self {
        Self { trajectory, error }
    }
}
