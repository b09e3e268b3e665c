//! Single-box energy balance
//!
//! $$C \frac{dT}{dt} = F - \frac{T}{\lambda}$$
//!
//! stepped explicitly. The anomaly relaxes toward $\lambda F$ without
//! overshooting while $\Delta t / (\lambda C) < 1$, about 6 yr with the default
//! constants. The carbon side limits the step well before that; see
//! the `propagate` module.

use cambio_core::params::PhysicalConstants;
use cambio_core::timeseries::FloatValue;

/// Temperature anomaly after a step of `dt` years under `forcing` (W/m^2).
pub fn temperature_step(
    constants: &PhysicalConstants,
    t_anomaly: FloatValue,
    forcing: FloatValue,
    dt: FloatValue,
) -> FloatValue {
    let imbalance = forcing - t_anomaly / constants.climate_sensitivity;
    t_anomaly + dt * imbalance / constants.heat_capacity
}
