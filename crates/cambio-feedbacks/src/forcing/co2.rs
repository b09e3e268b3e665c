//! CO2 radiative forcing
//!
//! $$F = \frac{F_{2\times}}{\ln 2} \ln\frac{C_{atm}}{C_{atm,0}}$$

use cambio_core::params::PhysicalConstants;
use cambio_core::timeseries::FloatValue;
use std::f64::consts::LN_2;

/// Forcing (W/m^2) from atmospheric carbon relative to pre-industrial.
pub fn co2_forcing(constants: &PhysicalConstants, c_atm: FloatValue) -> FloatValue {
    constants.forcing_per_doubling / LN_2 * (c_atm / constants.preindustrial_c_atm).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_zero_at_preindustrial() {
        let c = PhysicalConstants::default();
        assert_eq!(co2_forcing(&c, c.preindustrial_c_atm), 0.0);
    }

    #[test]
    fn test_doubling() {
        let c = PhysicalConstants::default();
        let forcing = co2_forcing(&c, 2.0 * c.preindustrial_c_atm);
        assert!(
            is_close!(forcing, c.forcing_per_doubling),
            "Forcing at 2x should equal forcing_per_doubling, got {forcing}"
        );
    }

    #[test]
    fn test_negative_below_preindustrial() {
        let c = PhysicalConstants::default();
        assert!(co2_forcing(&c, 0.9 * c.preindustrial_c_atm) < 0.0);
    }
}
