//! Step functions for the Cambio box model
//!
//! Cambio 1.0 through 4.0 share one explicit update ([`propagate`]) and differ
//! only in which [`Feedbacks`] are switched on. Each version adds one feedback
//! to the one before:
//!
//! - `carbon`: air-sea and land fluxes, ocean pH
//! - `forcing`: CO2 and ice-albedo radiative forcing
//! - `climate`: energy balance temperature response
//!
//! [`Variant`] and [`Feedbacks`] both implement
//! [`cambio_core::runner::StepFunction`], so either can drive
//! [`cambio_core::runner::run_cambio`].

pub mod carbon;
pub mod climate;
pub mod forcing;
pub mod propagate;
pub mod variant;

pub use propagate::{
    propagate, propagate_cambio1, propagate_cambio2, propagate_cambio3, propagate_cambio4,
};
pub use variant::{Feedbacks, Variant};
