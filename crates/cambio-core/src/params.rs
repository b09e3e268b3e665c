//! Climate parameters
//!
//! [`ClimateParams`] bundles the physical constants used by every feedback
//! variant with a link back to the scenario they were derived for.
//!
//! Physical constants are universal (they do not depend on the scenario) and
//! can be overridden from TOML. The scenario link anchors a parameter set to
//! the scenario's reference year, reference emission rate and peak year so a
//! run can check it is being driven by the scenario it was derived from.

use crate::errors::{CambioError, CambioResult};
use crate::scenario::{MetadataMap, ScenarioMetadata};
use crate::timeseries::{FloatValue, Time};
use serde::{Deserialize, Serialize};

/// Physical constants of the box model.
///
/// # Carbon cycle
///
/// Air-sea exchange relaxes the atmosphere toward the carbon content in
/// equilibrium with the ocean:
/// $$F_{ocean} = k_{ao} (C_{atm} - C_{atm}^{eq}(C_{ocean}, T))$$
///
/// Land uptake is gross primary uptake enhanced by CO2 fertilization, minus
/// turnover of the land reservoir:
/// $$F_{land} = U_0 \left(1 + \beta \ln\frac{C_{atm}}{C_{atm,0}}\right) - U_0 \frac{C_{land}}{C_{land,0}}$$
///
/// # Energy balance
///
/// $$C \frac{dT}{dt} = F - \frac{T}{\lambda}$$
///
/// # Step size
///
/// The defaults are tuned for explicit steps of at most 2 yr. The binding limit
/// is the air-sea exchange: with Henry's Law the ocean relaxes at about
/// $k_{ao} (1 + h \, C_{atm,0} / C_{ocean,0}) \approx 0.54$/yr, so coarser grids
/// overshoot and can leave the ocean reservoir negative. The energy balance
/// relaxes at $1/(\lambda C) \approx 0.16$/yr and is not the constraint.
/// Raising `air_sea_exchange_rate` or `henry_exponent` shrinks the usable step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Pre-industrial atmospheric carbon.
    /// unit: GtC
    /// default: 615.0
    pub preindustrial_c_atm: FloatValue,

    /// Pre-industrial surface ocean carbon.
    /// unit: GtC
    /// default: 350.0
    pub preindustrial_c_ocean: FloatValue,

    /// Pre-industrial land (vegetation and soil) carbon.
    /// unit: GtC
    /// default: 2300.0
    pub preindustrial_c_land: FloatValue,

    /// Pre-industrial ocean surface pH.
    /// default: 8.2
    pub preindustrial_ph: FloatValue,

    /// Atmosphere-to-ocean exchange coefficient ($k_{ao}$).
    /// unit: 1/yr
    /// default: 0.12
    pub air_sea_exchange_rate: FloatValue,

    /// Exponent of the Henry's-Law equilibrium between ocean and atmospheric carbon.
    /// Values above 1 make the ocean a progressively poorer solvent as it fills.
    /// default: 2.0
    pub henry_exponent: FloatValue,

    /// Temperature sensitivity of the ocean's equilibrium CO2 partial pressure.
    /// unit: 1/K
    /// default: 0.0423
    pub solubility_temperature_sensitivity: FloatValue,

    /// Pre-industrial gross land uptake ($U_0$).
    /// unit: GtC/yr
    /// default: 120.0
    pub land_gross_uptake: FloatValue,

    /// CO2 fertilization strength ($\beta$).
    /// default: 0.4
    pub fertilization: FloatValue,

    /// Rate at which accumulated land carbon saturates fertilization.
    /// unit: 1/GtC
    /// default: 1/300
    pub land_saturation_rate: FloatValue,

    /// Radiative forcing for a doubling of atmospheric carbon.
    /// unit: W/m^2
    /// default: 3.7
    pub forcing_per_doubling: FloatValue,

    /// Equilibrium temperature response per unit forcing ($\lambda$).
    /// unit: K/(W/m^2)
    /// default: 0.8
    pub climate_sensitivity: FloatValue,

    /// Effective heat capacity of the climate system ($C$).
    /// unit: W yr/(m^2 K)
    /// default: 8.0
    pub heat_capacity: FloatValue,

    /// Globally averaged incoming solar radiation.
    /// unit: W/m^2
    /// default: 342.0
    pub insolation: FloatValue,

    /// Largest planetary albedo reduction once ice cover is lost.
    /// default: 0.006
    pub albedo_feedback_gain: FloatValue,

    /// Temperature anomaly at the midpoint of the ice-albedo transition.
    /// unit: K
    /// default: 2.0
    pub albedo_transition_temperature: FloatValue,

    /// Width of the ice-albedo transition.
    /// unit: K
    /// default: 1.0
    pub albedo_transition_width: FloatValue,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            // Reservoirs
            preindustrial_c_atm: 615.0,
            preindustrial_c_ocean: 350.0,
            preindustrial_c_land: 2300.0,
            preindustrial_ph: 8.2,

            // Air-sea exchange
            air_sea_exchange_rate: 0.12,
            henry_exponent: 2.0,
            solubility_temperature_sensitivity: 0.0423,

            // Land
            land_gross_uptake: 120.0,
            fertilization: 0.4,
            land_saturation_rate: 1.0 / 300.0,

            // Energy balance
            forcing_per_doubling: 3.7,
            climate_sensitivity: 0.8,
            heat_capacity: 8.0,

            // Ice-albedo
            insolation: 342.0,
            albedo_feedback_gain: 0.006,
            albedo_transition_temperature: 2.0,
            albedo_transition_width: 1.0,
        }
    }
}

impl PhysicalConstants {
    /// Load constants from TOML. Keys that are absent keep their defaults.
    pub fn from_toml_str(source: &str) -> CambioResult<Self> {
        let constants: Self =
            toml::from_str(source).map_err(|e| CambioError::Serialization(e.to_string()))?;
        constants.validate()?;
        Ok(constants)
    }

    /// Checks that reservoirs, rates and scales are usable.
    pub fn validate(&self) -> CambioResult<()> {
        let strictly_positive = [
            ("preindustrial_c_atm", self.preindustrial_c_atm),
            ("preindustrial_c_ocean", self.preindustrial_c_ocean),
            ("preindustrial_c_land", self.preindustrial_c_land),
            ("air_sea_exchange_rate", self.air_sea_exchange_rate),
            ("henry_exponent", self.henry_exponent),
            ("land_gross_uptake", self.land_gross_uptake),
            ("climate_sensitivity", self.climate_sensitivity),
            ("heat_capacity", self.heat_capacity),
            ("albedo_transition_width", self.albedo_transition_width),
        ];
        for (name, value) in strictly_positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CambioError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("must be positive and finite, got {value}"),
                });
            }
        }

        let finite = [
            ("preindustrial_ph", self.preindustrial_ph),
            (
                "solubility_temperature_sensitivity",
                self.solubility_temperature_sensitivity,
            ),
            ("fertilization", self.fertilization),
            ("land_saturation_rate", self.land_saturation_rate),
            ("forcing_per_doubling", self.forcing_per_doubling),
            ("insolation", self.insolation),
            ("albedo_feedback_gain", self.albedo_feedback_gain),
            (
                "albedo_transition_temperature",
                self.albedo_transition_temperature,
            ),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(CambioError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// The scenario a parameter set was derived for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioLink {
    pub reference_year: Time,
    /// unit: GtC/yr
    pub reference_emission: FloatValue,
    pub peak_year: Time,
    pub description: String,
}

/// Everything a step function needs besides the state itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateParams {
    #[serde(flatten)]
    pub constants: PhysicalConstants,
    pub scenario: ScenarioLink,
}

impl ClimateParams {
    /// Derive parameters for a scenario using the default constants.
    pub fn from_metadata(metadata: &ScenarioMetadata) -> Self {
        Self {
            constants: PhysicalConstants::default(),
            scenario: ScenarioLink {
                reference_year: metadata.t_0,
                reference_emission: metadata.eps_0,
                peak_year: metadata.t_peak,
                description: metadata.description.clone(),
            },
        }
    }

    /// Derive parameters for a scenario with caller-supplied constants.
    pub fn from_metadata_with(
        metadata: &ScenarioMetadata,
        constants: PhysicalConstants,
    ) -> CambioResult<Self> {
        constants.validate()?;
        Ok(Self {
            constants,
            ..Self::from_metadata(metadata)
        })
    }

    /// Derive parameters from loose metadata, e.g. as read from storage.
    pub fn from_metadata_map(map: &MetadataMap) -> CambioResult<Self> {
        Ok(Self::from_metadata(&ScenarioMetadata::from_map(map)?))
    }
}
