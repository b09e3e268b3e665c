//! Air-sea carbon exchange
//!
//! The ocean takes up carbon in proportion to how far the atmosphere sits
//! above the carbon content in equilibrium with the surface ocean:
//!
//! $$F_{ocean} = k_{ao} \left(C_{atm} - C_{atm}^{eq}\right)$$
//!
//! With a fixed partition (Cambio 1) the equilibrium is linear in ocean carbon,
//! $C_{atm}^{eq} = C_{atm,0} \, C_{ocean}/C_{ocean,0}$, which is the same as
//! $k_{ao} C_{atm} - k_{oa} C_{ocean}$.
//!
//! Under Henry's Law (Cambio 2 onward) the equilibrium rises faster than
//! linearly as the ocean fills, and warmer water holds less carbon:
//!
//! $$C_{atm}^{eq} = C_{atm,0} \left(\frac{C_{ocean}}{C_{ocean,0}}\right)^{h} e^{\alpha_T T}$$

use cambio_core::params::PhysicalConstants;
use cambio_core::timeseries::FloatValue;

/// Atmospheric carbon in equilibrium with the current surface ocean.
pub fn equilibrium_atmospheric_carbon(
    constants: &PhysicalConstants,
    c_ocean: FloatValue,
    t_anomaly: FloatValue,
    henry_law: bool,
) -> FloatValue {
    let ocean_ratio = c_ocean / constants.preindustrial_c_ocean;
    if henry_law {
        constants.preindustrial_c_atm
            * ocean_ratio.powf(constants.henry_exponent)
            * (constants.solubility_temperature_sensitivity * t_anomaly).exp()
    } else {
        constants.preindustrial_c_atm * ocean_ratio
    }
}

/// Net flux from atmosphere into the ocean (GtC/yr, positive = uptake).
pub fn air_sea_net_flux(
    constants: &PhysicalConstants,
    c_atm: FloatValue,
    c_ocean: FloatValue,
    t_anomaly: FloatValue,
    henry_law: bool,
) -> FloatValue {
    let equilibrium = equilibrium_atmospheric_carbon(constants, c_ocean, t_anomaly, henry_law);
    constants.air_sea_exchange_rate * (c_atm - equilibrium)
}

/// Surface ocean pH, diagnosed from ocean carbon.
///
/// Hydrogen ion concentration is taken as proportional to surface ocean carbon:
/// $$pH = pH_0 - \log_{10}\frac{C_{ocean}}{C_{ocean,0}}$$
pub fn ocean_surface_ph(constants: &PhysicalConstants, c_ocean: FloatValue) -> FloatValue {
    constants.preindustrial_ph - (c_ocean / constants.preindustrial_c_ocean).log10()
}
