//! One explicit step of the coupled carbon-temperature system.
//!
//! The step reads only the previous state:
//!
//! 1. Air-sea and land fluxes from the previous reservoirs and temperature.
//! 2. Forward update of the three carbon reservoirs. Emissions enter the
//!    atmosphere; whatever the ocean and land take up leaves it.
//! 3. Forcing from the updated atmospheric carbon, plus the ice-albedo term
//!    evaluated at the previous temperature.
//! 4. Forward update of the temperature anomaly.
//! 5. Surface pH diagnosed from the updated ocean carbon.
//!
//! A non-positive atmosphere or ocean, a negative land reservoir, or any
//! non-finite reservoir is reported, never clamped.
//!
//! # Step size
//!
//! The air-sea exchange is the stiffest part of the system. The ocean relaxes
//! toward equilibrium at roughly
//! $k_{ao} (1 + h \, C_{atm}^{eq} / C_{ocean})$ per year, with $h = 1$ for the
//! fixed partition. Steps shorter than the inverse of that rate do not
//! overshoot. With the default constants that is about 3 yr for Cambio 1 and
//! 1.8 yr under Henry's Law. Around 3 yr per step the Henry's-Law variants can
//! drive the ocean negative as carbon accumulates, and the step then reports an
//! [`Instability`] on the ocean. Grids of 2 yr or finer are safe for all four
//! variants.

use crate::carbon::{air_sea_net_flux, land_net_flux, ocean_surface_ph};
use crate::climate::temperature_step;
use crate::forcing::{co2_forcing, ice_albedo_forcing};
use crate::variant::{Feedbacks, Variant};
use cambio_core::errors::{Instability, Reservoir};
use cambio_core::params::ClimateParams;
use cambio_core::state::ClimateState;
use cambio_core::timeseries::FloatValue;

/// Advance `state` by `dt` years with the given feedbacks switched on.
///
/// See the module docs for the largest `dt` the explicit update tolerates.
pub fn propagate(
    state: &ClimateState,
    params: &ClimateParams,
    feedbacks: Feedbacks,
    emission_rate: FloatValue,
    dt: FloatValue,
) -> Result<ClimateState, Instability> {
    let c = &params.constants;

    let f_ocean = air_sea_net_flux(
        c,
        state.c_atm,
        state.c_ocean,
        state.t_anomaly,
        feedbacks.henry_law,
    );
    let f_land = land_net_flux(c, state.c_atm, state.c_land, feedbacks.land_saturation);

    let c_atm = state.c_atm + dt * (emission_rate - f_ocean - f_land);
    let c_ocean = state.c_ocean + dt * f_ocean;
    let c_land = state.c_land + dt * f_land;
    Instability::check(Reservoir::Atmosphere, c_atm)?;
    Instability::check(Reservoir::Ocean, c_ocean)?;
    Instability::check(Reservoir::Land, c_land)?;

    let mut forcing = co2_forcing(c, c_atm);
    if feedbacks.ice_albedo {
        forcing += ice_albedo_forcing(c, state.t_anomaly);
    }
    let t_anomaly = temperature_step(c, state.t_anomaly, forcing, dt);

    Ok(ClimateState {
        t: state.t + dt,
        c_atm,
        c_ocean,
        c_land,
        f_ha: emission_rate,
        f_ocean_net: f_ocean,
        f_land_net: f_land,
        t_anomaly,
        ocean_surface_ph: ocean_surface_ph(c, c_ocean),
    })
}

/// Cambio 1.0: carbon balances, forcing and temperature with CO2 fertilization.
pub fn propagate_cambio1(
    state: &ClimateState,
    params: &ClimateParams,
    emission_rate: FloatValue,
    dt: FloatValue,
) -> Result<ClimateState, Instability> {
    propagate(state, params, Variant::Cambio1.feedbacks(), emission_rate, dt)
}

/// Cambio 2.0: Cambio 1.0 with Henry's-Law ocean uptake.
pub fn propagate_cambio2(
    state: &ClimateState,
    params: &ClimateParams,
    emission_rate: FloatValue,
    dt: FloatValue,
) -> Result<ClimateState, Instability> {
    propagate(state, params, Variant::Cambio2.feedbacks(), emission_rate, dt)
}

/// Cambio 3.0: Cambio 2.0 with ice-albedo feedback.
pub fn propagate_cambio3(
    state: &ClimateState,
    params: &ClimateParams,
    emission_rate: FloatValue,
    dt: FloatValue,
) -> Result<ClimateState, Instability> {
    propagate(state, params, Variant::Cambio3.feedbacks(), emission_rate, dt)
}

/// Cambio 4.0: Cambio 3.0 with saturating terrestrial sequestration.
pub fn propagate_cambio4(
    state: &ClimateState,
    params: &ClimateParams,
    emission_rate: FloatValue,
    dt: FloatValue,
) -> Result<ClimateState, Instability> {
    propagate(state, params, Variant::Cambio4.feedbacks(), emission_rate, dt)
}
