//! Scalar aliases and helpers for the uniform time grids scenarios live on.

use crate::errors::{CambioError, CambioResult};
use ndarray::{Array1, ArrayView1};

pub type FloatValue = f64;
pub type Time = f64;

/// `n` evenly spaced points from `start` to `stop`, both ends included.
pub fn time_grid(start: Time, stop: Time, n: usize) -> CambioResult<Array1<Time>> {
    if !(start.is_finite() && stop.is_finite()) {
        return Err(CambioError::InvalidScenarioParameters(format!(
            "time grid bounds must be finite, got [{start}, {stop}]"
        )));
    }
    if stop <= start {
        return Err(CambioError::InvalidScenarioParameters(format!(
            "t_stop ({stop}) must be after t_start ({start})"
        )));
    }
    if n < 2 {
        return Err(CambioError::InvalidScenarioParameters(format!(
            "nsteps must be at least 2, got {n}"
        )));
    }
    Ok(Array1::linspace(start, stop, n))
}

/// Checks that `time` is finite and strictly increasing.
pub fn validate_time_axis(time: ArrayView1<Time>) -> CambioResult<()> {
    if let Some(bad) = time.iter().find(|t| !t.is_finite()) {
        return Err(CambioError::InvalidScenarioParameters(format!(
            "time grid contains a non-finite value ({bad})"
        )));
    }
    for (i, pair) in time.windows(2).into_iter().enumerate() {
        if pair[1] <= pair[0] {
            return Err(CambioError::InvalidScenarioParameters(format!(
                "time grid is not strictly increasing at index {}: {} then {}",
                i + 1,
                pair[0],
                pair[1]
            )));
        }
    }
    Ok(())
}
