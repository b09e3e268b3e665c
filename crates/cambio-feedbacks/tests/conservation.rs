//! Conservation tests for the Cambio step functions.
//!
//! - Without emissions the pre-industrial state is a fixed point
//! - Carbon added by humans is exactly the carbon gained by the three reservoirs

use approx::assert_relative_eq;
use cambio_core::params::ClimateParams;
use cambio_core::runner::run_scenario;
use cambio_core::scenario::{EmissionScenario, EmissionScenarioBuilder};
use cambio_core::state::ClimateState;
use cambio_feedbacks::Variant;
use ndarray::Array1;

fn scenario(nsteps: usize) -> EmissionScenario {
    EmissionScenarioBuilder::new(1750.0, 2150.0, nsteps, 0.0166, 9.0, 2003.0, 2040.0, 15.0)
        .with_long_term_emissions(2.0)
        .build()
        .unwrap()
}

fn total_carbon(state: &ClimateState) -> f64 {
    state.c_atm + state.c_ocean + state.c_land
}

mod steady_state {
    use super::*;
    use cambio_core::runner::run_cambio;

    /// With zero emissions every variant stays at the pre-industrial state.
    #[test]
    fn test_zero_emissions_hold_preindustrial() {
        let params = ClimateParams::from_metadata(scenario(10).metadata());
        let time = Array1::linspace(1750.0, 2150.0, 400);
        let eps = Array1::zeros(400);
        let initial = ClimateState::initial(&params, 1750.0, 0.0);

        for variant in Variant::ALL {
            let trajectory = run_cambio(&variant, &params, time.view(), eps.view()).unwrap();
            for state in &trajectory {
                assert_eq!(state.c_atm, initial.c_atm, "{variant} at {}", state.t);
                assert_eq!(state.c_ocean, initial.c_ocean, "{variant} at {}", state.t);
                assert_eq!(state.c_land, initial.c_land, "{variant} at {}", state.t);
                assert_eq!(state.t_anomaly, 0.0, "{variant} at {}", state.t);
                assert_eq!(
                    state.ocean_surface_ph, initial.ocean_surface_ph,
                    "{variant} at {}",
                    state.t
                );
            }
        }
    }
}

mod carbon_conservation {
    use super::*;

    /// Reservoir gains over a whole run equal the integrated emissions.
    #[test]
    fn test_total_carbon_matches_cumulative_emissions() {
        let scenario = scenario(600);
        let params = ClimateParams::from_metadata(scenario.metadata());

        for variant in Variant::ALL {
            let trajectory = run_scenario(&variant, &params, &scenario).unwrap();
            let initial = total_carbon(&trajectory[0]);
            let emitted = trajectory.cumulative_emissions();

            for (state, emitted) in trajectory.iter().zip(emitted) {
                assert_relative_eq!(
                    total_carbon(state) - initial,
                    emitted,
                    epsilon = 1e-6,
                    max_relative = 1e-9
                );
            }
        }
    }

    /// Net fluxes recorded on each state account for every reservoir change.
    #[test]
    fn test_recorded_fluxes_explain_reservoir_changes() {
        let scenario = scenario(200);
        let params = ClimateParams::from_metadata(scenario.metadata());
        let trajectory = run_scenario(&Variant::Cambio4, &params, &scenario).unwrap();

        for pair in trajectory.states().windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            let dt = after.t - before.t;
            assert_relative_eq!(
                after.c_ocean - before.c_ocean,
                dt * after.f_ocean_net,
                epsilon = 1e-9
            );
            assert_relative_eq!(
                after.c_land - before.c_land,
                dt * after.f_land_net,
                epsilon = 1e-9
            );
            assert_relative_eq!(
                after.c_atm - before.c_atm,
                dt * (after.f_ha - after.f_ocean_net - after.f_land_net),
                epsilon = 1e-9
            );
        }
    }

    /// Ocean and land are sinks while emissions are positive.
    #[test]
    fn test_sinks_take_up_carbon() {
        let scenario = scenario(600);
        let params = ClimateParams::from_metadata(scenario.metadata());

        for variant in Variant::ALL {
            let trajectory = run_scenario(&variant, &params, &scenario).unwrap();
            let last = trajectory.last().unwrap();
            assert!(last.c_ocean > trajectory[0].c_ocean, "{variant}");
            assert!(last.c_land > trajectory[0].c_land, "{variant}");
        }
    }
}
