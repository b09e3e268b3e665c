//! Ice-albedo feedback
//!
//! Planetary albedo falls smoothly as the temperature anomaly passes through a
//! transition band, modelled with a logistic curve $\sigma$. The extra absorbed
//! sunlight is measured from the pre-industrial albedo, so the forcing is zero
//! at zero anomaly:
//!
//! $$F_{albedo} = S \, g \left[\sigma\left(\frac{T - T_{tr}}{w}\right) - \sigma\left(\frac{-T_{tr}}{w}\right)\right]$$

use cambio_core::params::PhysicalConstants;
use cambio_core::timeseries::FloatValue;

fn logistic(x: FloatValue) -> FloatValue {
    1.0 / (1.0 + (-x).exp())
}

/// Fraction of the full albedo change realised at temperature anomaly `t_anomaly`.
fn ice_loss(constants: &PhysicalConstants, t_anomaly: FloatValue) -> FloatValue {
    logistic((t_anomaly - constants.albedo_transition_temperature) / constants.albedo_transition_width)
}

/// Planetary albedo reduction relative to pre-industrial.
pub fn albedo_reduction(constants: &PhysicalConstants, t_anomaly: FloatValue) -> FloatValue {
    constants.albedo_feedback_gain * (ice_loss(constants, t_anomaly) - ice_loss(constants, 0.0))
}

/// Forcing (W/m^2) from the albedo change at `t_anomaly`.
pub fn ice_albedo_forcing(constants: &PhysicalConstants, t_anomaly: FloatValue) -> FloatValue {
    constants.insolation * albedo_reduction(constants, t_anomaly)
}
