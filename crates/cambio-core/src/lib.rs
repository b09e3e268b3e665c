//! Core types for the Cambio carbon-cycle and temperature box model.
//!
//! - [`scenario`]: emission scenarios and the builder that synthesises them
//! - [`params`]: physical constants and their derivation from a scenario
//! - [`state`]: the climate state and run trajectories
//! - [`runner`]: the [`runner::StepFunction`] seam and the run loop
//! - [`store`] and [`report`]: persistence and reporting collaborators
//!
//! The step functions themselves live in `cambio-feedbacks`.

pub mod errors;
pub mod params;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod state;
pub mod store;
pub mod timeseries;

pub use errors::{CambioError, CambioResult, Instability, Reservoir, RunFailure};
pub use params::{ClimateParams, PhysicalConstants, ScenarioLink};
pub use runner::{run_cambio, run_scenario, StepFunction};
pub use scenario::{EmissionProfile, EmissionScenario, EmissionScenarioBuilder, ScenarioMetadata};
pub use state::{ClimateAttribute, ClimateState, Trajectory};
