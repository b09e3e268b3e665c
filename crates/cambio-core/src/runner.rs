//! Driving a step function over a time grid.

use crate::errors::{CambioError, Instability, RunFailure};
use crate::params::ClimateParams;
use crate::scenario::EmissionScenario;
use crate::state::{ClimateState, Trajectory};
use crate::timeseries::{FloatValue, Time};
use ndarray::ArrayView1;
use tracing::{debug, info, warn};

/// Advances a [`ClimateState`] by one explicit step.
///
/// Implementations must depend only on their arguments, so that a run is a pure
/// function of its inputs.
pub trait StepFunction {
    /// Produce the state one step of length `dt` after `state`, with humans
    /// emitting `emission_rate` (GtC/yr) over the step.
    fn step(
        &self,
        state: &ClimateState,
        params: &ClimateParams,
        emission_rate: FloatValue,
        dt: FloatValue,
    ) -> Result<ClimateState, Instability>;

    /// Label used in logs.
    fn label(&self) -> &str {
        "custom"
    }
}

impl<F> StepFunction for F
where
    F: Fn(&ClimateState, &ClimateParams, FloatValue, FloatValue) -> Result<ClimateState, Instability>,
{
    fn step(
        &self,
        state: &ClimateState,
        params: &ClimateParams,
        emission_rate: FloatValue,
        dt: FloatValue,
    ) -> Result<ClimateState, Instability> {
        self(state, params, emission_rate, dt)
    }
}

/// Run `step_function` over `time`, producing one state per grid point.
///
/// The first state is the pre-industrial state at `time[0]`. Every later state
/// is produced from its predecessor with the emission rate at its own grid
/// point and the spacing to the previous point.
///
/// On failure the states produced so far are returned alongside the error.
pub fn run_cambio<S: StepFunction + ?Sized>(
    step_function: &S,
    params: &ClimateParams,
    time: ArrayView1<Time>,
    emission_rate: ArrayView1<FloatValue>,
) -> Result<Trajectory, RunFailure> {
    if time.len() != emission_rate.len() {
        return Err(RunFailure::new(
            Trajectory::default(),
            CambioError::ScenarioMismatch {
                time_len: time.len(),
                emission_len: emission_rate.len(),
            },
        ));
    }
    if time.is_empty() {
        return Err(RunFailure::new(
            Trajectory::default(),
            CambioError::InvalidScenarioParameters("time grid is empty".to_string()),
        ));
    }

    let n = time.len();
    let reference_year = params.scenario.reference_year;
    if reference_year < time[0] || reference_year > time[n - 1] {
        warn!(
            reference_year,
            t_start = time[0],
            t_stop = time[n - 1],
            "Time grid does not cover the scenario's reference year"
        );
    }
    let first_dt = if n > 1 { time[1] - time[0] } else { 0.0 };
    debug!(
        variant = step_function.label(),
        steps = n,
        dt = first_dt,
        "Starting run"
    );

    let mut trajectory = Trajectory::with_capacity(n);
    let mut state = ClimateState::initial(params, time[0], emission_rate[0]);
    trajectory.push(state);

    for i in 1..n {
        let dt = time[i] - time[i - 1];
        if !(dt.is_finite() && dt > 0.0) {
            return Err(RunFailure::new(
                trajectory,
                CambioError::InvalidScenarioParameters(format!(
                    "time grid is not strictly increasing at index {i}"
                )),
            ));
        }

        state = match step_function.step(&state, params, emission_rate[i], dt) {
            Ok(mut next) => {
                next.t = time[i];
                next
            }
            Err(instability) => {
                warn!(
                    variant = step_function.label(),
                    step = i,
                    t = time[i],
                    reservoir = %instability.reservoir,
                    value = instability.value,
                    "Run aborted by numerical instability"
                );
                return Err(RunFailure::new(trajectory, instability.at_step(i)));
            }
        };
        trajectory.push(state);
    }

    info!(
        variant = step_function.label(),
        final_t_anomaly = state.t_anomaly,
        final_c_atm = state.c_atm,
        "Run complete"
    );
    Ok(trajectory)
}

/// [`run_cambio`] over a scenario's own grid and emission series.
pub fn run_scenario<S: StepFunction + ?Sized>(
    step_function: &S,
    params: &ClimateParams,
    scenario: &EmissionScenario,
) -> Result<Trajectory, RunFailure> {
    run_cambio(
        step_function,
        params,
        scenario.time().view(),
        scenario.emission_rate().view(),
    )
}
