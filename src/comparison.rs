//! Running several variants over one scenario.

use crate::report::LabelledTrajectory;
use cambio_core::errors::RunFailure;
use cambio_core::params::ClimateParams;
use cambio_core::runner::run_scenario;
use cambio_core::scenario::EmissionScenario;
use cambio_core::state::Trajectory;
use cambio_feedbacks::Variant;
use rayon::prelude::*;
use tracing::{info, warn};

/// The outcome of running one variant.
#[derive(Debug)]
pub struct VariantRun {
    pub variant: Variant,
    pub result: Result<Trajectory, RunFailure>,
}

impl VariantRun {
    fn execute(variant: Variant, params: &ClimateParams, scenario: &EmissionScenario) -> Self {
        let result = run_scenario(&variant, params, scenario);
        if let Err(failure) = &result {
            warn!(
                variant = variant.label(),
                completed_states = failure.trajectory.len(),
                error = %failure.error,
                "Variant run failed"
            );
        }
        Self { variant, result }
    }

    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.result.as_ref().ok()
    }

    /// The trajectory for reporting, partial if the run failed.
    pub fn labelled(&self) -> LabelledTrajectory<'_> {
        let trajectory = match &self.result {
            Ok(trajectory) => trajectory,
            Err(failure) => &failure.trajectory,
        };
        LabelledTrajectory::new(self.variant.label(), trajectory)
    }
}

/// Run each variant in turn. Results are in the order of `variants`.
pub fn run_variants(
    params: &ClimateParams,
    scenario: &EmissionScenario,
    variants: &[Variant],
) -> Vec<VariantRun> {
    info!(variants = variants.len(), steps = scenario.len(), "Comparing variants");
    variants
        .iter()
        .map(|variant| VariantRun::execute(*variant, params, scenario))
        .collect()
}

/// [`run_variants`] with one rayon task per variant.
///
/// Each run is a pure function of its inputs, so the results are identical to
/// the sequential version.
pub fn run_variants_parallel(
    params: &ClimateParams,
    scenario: &EmissionScenario,
    variants: &[Variant],
) -> Vec<VariantRun> {
    info!(
        variants = variants.len(),
        steps = scenario.len(),
        "Comparing variants in parallel"
    );
    variants
        .par_iter()
        .map(|variant| VariantRun::execute(*variant, params, scenario))
        .collect()
}
