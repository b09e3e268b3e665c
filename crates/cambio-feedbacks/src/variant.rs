//! Feedback variants
//!
//! Each Cambio version is the previous one plus exactly one feedback:
//!
//! | Variant | Adds                                              |
//! |---------|---------------------------------------------------|
//! | Cambio1 | carbon balances, forcing, temperature, fertilization |
//! | Cambio2 | Henry's-Law ocean equilibrium                     |
//! | Cambio3 | ice-albedo feedback                               |
//! | Cambio4 | terrestrial sequestration saturation              |

use crate::propagate::propagate;
use cambio_core::errors::{CambioError, CambioResult, Instability};
use cambio_core::params::ClimateParams;
use cambio_core::runner::StepFunction;
use cambio_core::state::ClimateState;
use cambio_core::timeseries::FloatValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which optional feedbacks a step applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feedbacks {
    /// Ocean uptake follows a Henry's-Law equilibrium instead of a fixed partition.
    pub henry_law: bool,
    /// Temperature-dependent albedo adds forcing.
    pub ice_albedo: bool,
    /// Accumulated land carbon weakens CO2 fertilization.
    pub land_saturation: bool,
}

impl Feedbacks {
    pub const NONE: Feedbacks = Feedbacks {
        henry_law: false,
        ice_albedo: false,
        land_saturation: false,
    };

    pub fn with_henry_law(self) -> Self {
        Self {
            henry_law: true,
            ..self
        }
    }

    pub fn with_ice_albedo(self) -> Self {
        Self {
            ice_albedo: true,
            ..self
        }
    }

    pub fn with_land_saturation(self) -> Self {
        Self {
            land_saturation: true,
            ..self
        }
    }
}

impl StepFunction for Feedbacks {
    fn step(
        &self,
        state: &ClimateState,
        params: &ClimateParams,
        emission_rate: FloatValue,
        dt: FloatValue,
    ) -> Result<ClimateState, Instability> {
        propagate(state, params, *self, emission_rate, dt)
    }
}

/// The four Cambio versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variant {
    Cambio1,
    Cambio2,
    Cambio3,
    Cambio4,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Cambio1,
        Variant::Cambio2,
        Variant::Cambio3,
        Variant::Cambio4,
    ];

    /// The variant this one builds on.
    pub fn previous(self) -> Option<Variant> {
        match self {
            Variant::Cambio1 => None,
            Variant::Cambio2 => Some(Variant::Cambio1),
            Variant::Cambio3 => Some(Variant::Cambio2),
            Variant::Cambio4 => Some(Variant::Cambio3),
        }
    }

    /// The previous variant's feedbacks plus this variant's addition.
    pub fn feedbacks(self) -> Feedbacks {
        let inherited = self
            .previous()
            .map_or(Feedbacks::NONE, |previous| previous.feedbacks());
        match self {
            Variant::Cambio1 => inherited,
            Variant::Cambio2 => inherited.with_henry_law(),
            Variant::Cambio3 => inherited.with_ice_albedo(),
            Variant::Cambio4 => inherited.with_land_saturation(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::Cambio1 => "Cambio1.0",
            Variant::Cambio2 => "Cambio2.0",
            Variant::Cambio3 => "Cambio3.0",
            Variant::Cambio4 => "Cambio4.0",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Variant {
    type Err = CambioError;

    fn from_str(s: &str) -> CambioResult<Self> {
        let normalised = s.trim().to_ascii_lowercase();
        let number = normalised
            .strip_prefix("cambio")
            .unwrap_or(&normalised)
            .trim_end_matches(".0");
        match number {
            "1" => Ok(Variant::Cambio1),
            "2" => Ok(Variant::Cambio2),
            "3" => Ok(Variant::Cambio3),
            "4" => Ok(Variant::Cambio4),
            _ => Err(CambioError::InvalidParameter {
                name: s.to_string(),
                reason: "expected one of Cambio1, Cambio2, Cambio3, Cambio4".to_string(),
            }),
        }
    }
}

impl StepFunction for Variant {
    fn step(
        &self,
        state: &ClimateState,
        params: &ClimateParams,
        emission_rate: FloatValue,
        dt: FloatValue,
    ) -> Result<ClimateState, Instability> {
        propagate(state, params, self.feedbacks(), emission_rate, dt)
    }

    fn label(&self) -> &str {
        Variant::label(*self)
    }
}
