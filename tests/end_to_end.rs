//! The four-variant comparison over the reference scenario: 1750 to 2150 on 600
//! grid points, emissions of 9 GtC/yr in 2003 peaking in 2040 and decaying to a
//! long-term 2 GtC/yr.

use approx::assert_relative_eq;
use cambio::comparison::{run_variants, run_variants_parallel};
use cambio::report::{LabelledTrajectory, TextReporter, TrajectoryReporter};
use cambio::scenario::EmissionProfile;
use cambio::state::ClimateAttribute;
use cambio::{
    run_cambio, run_scenario, CambioError, ClimateParams, EmissionScenario,
    EmissionScenarioBuilder, Variant,
};
use ndarray::{s, Array1};

const NSTEPS: usize = 600;

fn reference_scenario() -> EmissionScenario {
    EmissionScenarioBuilder::new(1750.0, 2150.0, NSTEPS, 0.0166, 9.0, 2003.0, 2040.0, 15.0)
        .with_long_term_emissions(2.0)
        .with_decarb_ppf_factor(0.5)
        .with_description("Peaks in 2040, then decays to 2 GtC/yr")
        .build()
        .unwrap()
}

mod scenario {
    use super::*;

    #[test]
    fn test_emissions_rise_peak_and_decay() {
        let scenario = reference_scenario();
        let time = scenario.time();
        let eps = scenario.emission_rate();
        assert_eq!(scenario.len(), NSTEPS);

        let peak_index = eps
            .iter()
            .enumerate()
            .fold(0, |best, (i, e)| if *e > eps[best] { i } else { best });
        assert!(
            (time[peak_index] - 2040.0).abs() <= 1.0,
            "peak at {} instead of 2040",
            time[peak_index]
        );

        for i in 1..=peak_index {
            assert!(eps[i] > eps[i - 1], "emissions fell before the peak at {}", time[i]);
        }
        for i in peak_index + 1..NSTEPS {
            assert!(eps[i] < eps[i - 1], "emissions rose after the peak at {}", time[i]);
            assert!(eps[i] >= 2.0, "emissions below the long-term floor at {}", time[i]);
        }
        assert!(eps[NSTEPS - 1] - 2.0 < 0.1);
    }

    #[test]
    fn test_reference_emission_is_honoured() {
        let scenario = reference_scenario();
        let profile = EmissionProfile::from_metadata(scenario.metadata()).unwrap();
        assert_relative_eq!(profile.rate(2003.0), 9.0, max_relative = 1e-12);
    }

    #[test]
    fn test_builder_and_parameters_are_deterministic() {
        let (a, b) = (reference_scenario(), reference_scenario());
        assert_eq!(a.time(), b.time());
        assert_eq!(a.emission_rate(), b.emission_rate());
        assert_eq!(
            ClimateParams::from_metadata(a.metadata()),
            ClimateParams::from_metadata(b.metadata())
        );
    }

    #[test]
    fn test_two_point_grid() {
        let scenario =
            EmissionScenarioBuilder::new(1750.0, 2150.0, 2, 0.0166, 9.0, 2003.0, 2040.0, 15.0)
                .build()
                .unwrap();
        let params = ClimateParams::from_metadata(scenario.metadata());
        let trajectory = run_scenario(&Variant::Cambio1, &params, &scenario).unwrap();
        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory[0].t, 1750.0);
        assert_eq!(trajectory[1].t, 2150.0);
    }
}

mod comparison {
    use super::*;

    #[test]
    fn test_four_complete_trajectories() {
        let scenario = reference_scenario();
        let params = ClimateParams::from_metadata(scenario.metadata());
        let runs = run_variants(&params, &scenario, &Variant::ALL);

        assert_eq!(runs.len(), 4);
        for run in &runs {
            let trajectory = run.trajectory().unwrap();
            assert_eq!(trajectory.len(), NSTEPS, "{}", run.variant);
            for state in trajectory {
                assert!(state.c_atm >= 0.0, "{} C_atm at {}", run.variant, state.t);
                assert!(state.c_ocean >= 0.0, "{} C_ocean at {}", run.variant, state.t);
                assert!(
                    (7.5..=8.2).contains(&state.ocean_surface_ph),
                    "{} pH {} at {}",
                    run.variant,
                    state.ocean_surface_ph,
                    state.t
                );
            }
        }
    }

    #[test]
    fn test_warming_rises_through_first_half() {
        let scenario = reference_scenario();
        let params = ClimateParams::from_metadata(scenario.metadata());

        for variant in Variant::ALL {
            let trajectory = run_scenario(&variant, &params, &scenario).unwrap();
            let temperature = trajectory.series(ClimateAttribute::TemperatureAnomaly);
            let carbon = trajectory.series(ClimateAttribute::AtmosphericCarbon);
            for i in 1..NSTEPS / 2 {
                assert!(
                    temperature[i] > temperature[i - 1],
                    "{variant}: T fell at {}",
                    trajectory[i].t
                );
                assert!(
                    carbon[i] > carbon[i - 1],
                    "{variant}: C_atm fell at {}",
                    trajectory[i].t
                );
            }
        }
    }

    #[test]
    fn test_ice_albedo_warms_more() {
        let scenario = reference_scenario();
        let params = ClimateParams::from_metadata(scenario.metadata());
        let runs = run_variants(&params, &scenario, &[Variant::Cambio2, Variant::Cambio3]);
        let final_t = |i: usize| runs[i].trajectory().unwrap().last().unwrap().t_anomaly;
        assert!(final_t(1) >= final_t(0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scenario = reference_scenario();
        let params = ClimateParams::from_metadata(scenario.metadata());
        let sequential = run_variants(&params, &scenario, &Variant::ALL);
        let parallel = run_variants_parallel(&params, &scenario, &Variant::ALL);

        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.variant, b.variant);
            assert_eq!(a.trajectory(), b.trajectory());
        }
    }

    #[test]
    fn test_truncated_emission_series_is_rejected() {
        let scenario = reference_scenario();
        let params = ClimateParams::from_metadata(scenario.metadata());
        let short: Array1<f64> = scenario.emission_rate().slice(s![..NSTEPS - 1]).to_owned();

        let failure =
            run_cambio(&Variant::Cambio1, &params, scenario.time().view(), short.view())
                .unwrap_err();
        assert!(failure.trajectory.is_empty());
        match failure.error {
            CambioError::ScenarioMismatch {
                time_len,
                emission_len,
            } => {
                assert_eq!(time_len, NSTEPS);
                assert_eq!(emission_len, NSTEPS - 1);
            }
            other => panic!("expected ScenarioMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_runs_are_restartable() {
        let scenario = reference_scenario();
        let params = ClimateParams::from_metadata(scenario.metadata());
        let time = scenario.time().view();
        let eps = scenario.emission_rate().view();

        let first = run_cambio(&Variant::Cambio4, &params, time, eps).unwrap();
        let second = run_cambio(&Variant::Cambio4, &params, time, eps).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_text_report_covers_every_variant() {
        let scenario = reference_scenario();
        let params = ClimateParams::from_metadata(scenario.metadata());
        let runs = run_variants(&params, &scenario, &Variant::ALL);
        let labelled: Vec<LabelledTrajectory<'_>> = runs.iter().map(|run| run.labelled()).collect();
        let groups = vec![
            vec![ClimateAttribute::HumanFlux],
            vec![
                ClimateAttribute::AtmosphericCarbon,
                ClimateAttribute::OceanCarbon,
                ClimateAttribute::LandCarbon,
            ],
            vec![ClimateAttribute::TemperatureAnomaly],
            vec![ClimateAttribute::OceanSurfacePh],
        ];

        let mut reporter = TextReporter::new(Vec::new());
        reporter.report(&labelled, &groups).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        for variant in Variant::ALL {
            assert!(text.contains(variant.label()), "missing {variant}");
        }
        assert!(text.contains("[4] OceanSurfacepH"));
    }
}
