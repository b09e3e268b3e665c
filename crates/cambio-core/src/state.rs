//! Climate state and trajectories
//!
//! A [`ClimateState`] is the model at one instant. A [`Trajectory`] is the
//! append-only sequence of states produced by a run, one per grid point.

use crate::errors::{CambioError, CambioResult};
use crate::params::ClimateParams;
use crate::timeseries::{FloatValue, Time};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// The climate system at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateState {
    pub t: Time,
    /// Atmospheric carbon.
    /// unit: GtC
    pub c_atm: FloatValue,
    /// Surface ocean carbon.
    /// unit: GtC
    pub c_ocean: FloatValue,
    /// Land carbon.
    /// unit: GtC
    pub c_land: FloatValue,
    /// Human-to-atmosphere flux.
    /// unit: GtC/yr
    pub f_ha: FloatValue,
    /// Net flux into the ocean over the step that produced this state.
    /// unit: GtC/yr
    pub f_ocean_net: FloatValue,
    /// Net flux into the land over the step that produced this state.
    /// unit: GtC/yr
    pub f_land_net: FloatValue,
    /// unit: K
    pub t_anomaly: FloatValue,
    pub ocean_surface_ph: FloatValue,
}

impl ClimateState {
    /// Pre-industrial state at time `t` with emission rate `f_ha`.
    pub fn initial(params: &ClimateParams, t: Time, f_ha: FloatValue) -> Self {
        let c = &params.constants;
        Self {
            t,
            c_atm: c.preindustrial_c_atm,
            c_ocean: c.preindustrial_c_ocean,
            c_land: c.preindustrial_c_land,
            f_ha,
            f_ocean_net: 0.0,
            f_land_net: 0.0,
            t_anomaly: 0.0,
            ocean_surface_ph: c.preindustrial_ph,
        }
    }

    pub fn get(&self, attribute: ClimateAttribute) -> FloatValue {
        match attribute {
            ClimateAttribute::Time => self.t,
            ClimateAttribute::AtmosphericCarbon => self.c_atm,
            ClimateAttribute::OceanCarbon => self.c_ocean,
            ClimateAttribute::LandCarbon => self.c_land,
            ClimateAttribute::HumanFlux => self.f_ha,
            ClimateAttribute::OceanNetFlux => self.f_ocean_net,
            ClimateAttribute::LandNetFlux => self.f_land_net,
            ClimateAttribute::TemperatureAnomaly => self.t_anomaly,
            ClimateAttribute::OceanSurfacePh => self.ocean_surface_ph,
        }
    }
}

impl fmt::Display for ClimateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "t: {:.2}", self.t)?;
        for attribute in ClimateAttribute::ALL.iter().skip(1) {
            writeln!(
                f,
                "{}: {:.4} {}",
                attribute,
                self.get(*attribute),
                attribute.unit()
            )?;
        }
        Ok(())
    }
}

/// A named quantity on [`ClimateState`], for reporting and plotting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateAttribute {
    Time,
    AtmosphericCarbon,
    OceanCarbon,
    LandCarbon,
    HumanFlux,
    OceanNetFlux,
    LandNetFlux,
    TemperatureAnomaly,
    OceanSurfacePh,
}

impl ClimateAttribute {
    pub const ALL: [ClimateAttribute; 9] = [
        ClimateAttribute::Time,
        ClimateAttribute::AtmosphericCarbon,
        ClimateAttribute::OceanCarbon,
        ClimateAttribute::LandCarbon,
        ClimateAttribute::HumanFlux,
        ClimateAttribute::OceanNetFlux,
        ClimateAttribute::LandNetFlux,
        ClimateAttribute::TemperatureAnomaly,
        ClimateAttribute::OceanSurfacePh,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ClimateAttribute::Time => "t",
            ClimateAttribute::AtmosphericCarbon => "C_atm",
            ClimateAttribute::OceanCarbon => "C_ocean",
            ClimateAttribute::LandCarbon => "C_land",
            ClimateAttribute::HumanFlux => "F_ha",
            ClimateAttribute::OceanNetFlux => "F_ocean_net",
            ClimateAttribute::LandNetFlux => "F_land_net",
            ClimateAttribute::TemperatureAnomaly => "T_anomaly",
            ClimateAttribute::OceanSurfacePh => "OceanSurfacepH",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ClimateAttribute::Time => "yr",
            ClimateAttribute::AtmosphericCarbon
            | ClimateAttribute::OceanCarbon
            | ClimateAttribute::LandCarbon => "GtC",
            ClimateAttribute::HumanFlux
            | ClimateAttribute::OceanNetFlux
            | ClimateAttribute::LandNetFlux => "GtC/yr",
            ClimateAttribute::TemperatureAnomaly => "K",
            ClimateAttribute::OceanSurfacePh => "",
        }
    }
}

impl fmt::Display for ClimateAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClimateAttribute {
    type Err = CambioError;

    fn from_str(s: &str) -> CambioResult<Self> {
        ClimateAttribute::ALL
            .into_iter()
            .find(|attribute| attribute.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CambioError::InvalidParameter {
                name: s.to_string(),
                reason: "not a climate state attribute".to_string(),
            })
    }
}

/// The ordered states of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    states: Vec<ClimateState>,
}

impl Trajectory {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            states: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, state: ClimateState) {
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClimateState> {
        self.states.get(index)
    }

    pub fn first(&self) -> Option<&ClimateState> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&ClimateState> {
        self.states.last()
    }

    /// The state at exactly time `t`, if the run produced one.
    pub fn at_time(&self, t: Time) -> Option<&ClimateState> {
        let index = self.states.partition_point(|state| state.t < t);
        self.states.get(index).filter(|state| state.t == t)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClimateState> {
        self.states.iter()
    }

    pub fn states(&self) -> &[ClimateState] {
        &self.states
    }

    /// One attribute across the whole run.
    pub fn series(&self, attribute: ClimateAttribute) -> Vec<FloatValue> {
        self.states.iter().map(|state| state.get(attribute)).collect()
    }

    /// Carbon added by humans since the first state, integrated the way the
    /// step functions integrate it.
    /// unit: GtC
    pub fn cumulative_emissions(&self) -> Vec<FloatValue> {
        let mut total = 0.0;
        let mut cumulative = Vec::with_capacity(self.states.len());
        let mut previous_t = self.states.first().map(|state| state.t);
        for state in &self.states {
            if let Some(t0) = previous_t {
                total += (state.t - t0) * state.f_ha;
            }
            previous_t = Some(state.t);
            cumulative.push(total);
        }
        cumulative
    }
}

impl Index<usize> for Trajectory {
    type Output = ClimateState;

    fn index(&self, index: usize) -> &ClimateState {
        &self.states[index]
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a ClimateState;
    type IntoIter = std::slice::Iter<'a, ClimateState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ClimateParams;
    use crate::scenario::ScenarioMetadata;

    fn params() -> ClimateParams {
        ClimateParams::from_metadata(&ScenarioMetadata {
            k: 0.0166,
            eps_0: 9.0,
            t_0: 2003.0,
            t_peak: 2040.0,
            t_decarb: 15.0,
            epslongterm: None,
            t_decarb_ppf_factor: None,
            description: String::new(),
        })
    }

    fn trajectory() -> Trajectory {
        let mut trajectory = Trajectory::default();
        for (i, t) in [1750.0, 1751.0, 1752.0].into_iter().enumerate() {
            let mut state = ClimateState::initial(&params(), t, 2.0);
            state.t_anomaly = i as FloatValue * 0.1;
            trajectory.push(state);
        }
        trajectory
    }

    #[test]
    fn test_initial_state_is_preindustrial() {
        let p = params();
        let state = ClimateState::initial(&p, 1750.0, 0.5);
        assert_eq!(state.c_atm, p.constants.preindustrial_c_atm);
        assert_eq!(state.c_ocean, p.constants.preindustrial_c_ocean);
        assert_eq!(state.t_anomaly, 0.0);
        assert_eq!(state.ocean_surface_ph, p.constants.preindustrial_ph);
        assert_eq!(state.f_ha, 0.5);
    }

    #[test]
    fn test_lookup_by_time() {
        let trajectory = trajectory();
        assert_eq!(trajectory.at_time(1751.0).unwrap().t_anomaly, 0.1);
        assert!(trajectory.at_time(1751.5).is_none());
        assert!(trajectory.at_time(1800.0).is_none());
    }

    #[test]
    fn test_series_and_cumulative_emissions() {
        let trajectory = trajectory();
        assert_eq!(
            trajectory.series(ClimateAttribute::Time),
            vec![1750.0, 1751.0, 1752.0]
        );
        assert_eq!(trajectory.cumulative_emissions(), vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_attribute_names_parse() {
        for attribute in ClimateAttribute::ALL {
            assert_eq!(
                attribute.name().parse::<ClimateAttribute>().unwrap(),
                attribute
            );
        }
        assert_eq!(
            "oceansurfaceph".parse::<ClimateAttribute>().unwrap(),
            ClimateAttribute::OceanSurfacePh
        );
        assert!("C_deep".parse::<ClimateAttribute>().is_err());
    }

    #[test]
    fn test_display_lists_every_attribute() {
        let text = ClimateState::initial(&params(), 1750.0, 0.0).to_string();
        for attribute in ClimateAttribute::ALL {
            assert!(text.contains(attribute.name()), "missing {attribute}");
        }
    }
}
