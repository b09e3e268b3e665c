//! Reporting collaborators
//!
//! Reporters receive finished trajectories by shared reference and turn them
//! into charts or text. Attributes are grouped so related quantities
//! (e.g. the three carbon fluxes) can share one panel.

use crate::errors::CambioResult;
use crate::state::{ClimateAttribute, Trajectory};
use crate::timeseries::FloatValue;
use std::io::Write;

/// A trajectory with the label it should be reported under.
#[derive(Debug, Clone, Copy)]
pub struct LabelledTrajectory<'a> {
    pub label: &'a str,
    pub trajectory: &'a Trajectory,
}

impl<'a> LabelledTrajectory<'a> {
    pub fn new(label: &'a str, trajectory: &'a Trajectory) -> Self {
        Self { label, trajectory }
    }
}

/// Attributes reported together.
pub type AttributeGroup = Vec<ClimateAttribute>;

pub trait TrajectoryReporter {
    fn report(
        &mut self,
        runs: &[LabelledTrajectory<'_>],
        groups: &[AttributeGroup],
    ) -> CambioResult<()>;
}

/// Writes a start/end/min/max line per run and attribute.
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TrajectoryReporter for TextReporter<W> {
    fn report(
        &mut self,
        runs: &[LabelledTrajectory<'_>],
        groups: &[AttributeGroup],
    ) -> CambioResult<()> {
        for (i, group) in groups.iter().enumerate() {
            let names: Vec<&str> = group.iter().map(|attribute| attribute.name()).collect();
            writeln!(self.out, "[{}] {}", i + 1, names.join(", "))?;
            for run in runs {
                for attribute in group {
                    let series = run.trajectory.series(*attribute);
                    match summarise(&series) {
                        Some(summary) => writeln!(
                            self.out,
                            "  {:<12} {:<16} start={:.4} end={:.4} min={:.4} max={:.4} {}",
                            run.label,
                            attribute.name(),
                            summary.start,
                            summary.end,
                            summary.min,
                            summary.max,
                            attribute.unit()
                        )?,
                        None => writeln!(
                            self.out,
                            "  {:<12} {:<16} (empty)",
                            run.label,
                            attribute.name()
                        )?,
                    }
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

struct Summary {
    start: FloatValue,
    end: FloatValue,
    min: FloatValue,
    max: FloatValue,
}

fn summarise(series: &[FloatValue]) -> Option<Summary> {
    let (&start, &end) = (series.first()?, series.last()?);
    let (min, max) = series
        .iter()
        .fold((FloatValue::INFINITY, FloatValue::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    Some(Summary {
        start,
        end,
        min,
        max,
    })
}
