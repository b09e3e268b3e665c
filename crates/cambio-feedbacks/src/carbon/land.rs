//! Land carbon uptake
//!
//! Gross uptake grows logarithmically with atmospheric carbon (CO2
//! fertilization) while release is proportional to the land reservoir:
//!
//! $$F_{land} = U_0 \left(1 + \beta \ln\frac{C_{atm}}{C_{atm,0}}\right) - U_0 \frac{C_{land}}{C_{land,0}}$$
//!
//! With terrestrial sequestration saturation (Cambio 4) the fertilization
//! strength decays with the carbon the land has already accumulated:
//!
//! $$\beta_{eff} = \beta \, e^{-s \max(C_{land} - C_{land,0}, 0)}$$

use cambio_core::params::PhysicalConstants;
use cambio_core::timeseries::FloatValue;

/// Fertilization strength after saturation by accumulated land carbon.
pub fn effective_fertilization(
    constants: &PhysicalConstants,
    c_land: FloatValue,
    saturation: bool,
) -> FloatValue {
    if saturation {
        let accumulated = (c_land - constants.preindustrial_c_land).max(0.0);
        constants.fertilization * (-constants.land_saturation_rate * accumulated).exp()
    } else {
        constants.fertilization
    }
}

/// Net flux from atmosphere into the land (GtC/yr, positive = uptake).
pub fn land_net_flux(
    constants: &PhysicalConstants,
    c_atm: FloatValue,
    c_land: FloatValue,
    saturation: bool,
) -> FloatValue {
    let beta = effective_fertilization(constants, c_land, saturation);
    let uptake = constants.land_gross_uptake
        * (1.0 + beta * (c_atm / constants.preindustrial_c_atm).ln());
    let release = constants.land_gross_uptake * c_land / constants.preindustrial_c_land;
    uptake - release
}
