//! Radiative forcing
//!
//! - `co2`: logarithmic forcing from atmospheric carbon
//! - `albedo`: extra absorbed sunlight as ice cover retreats

pub mod albedo;
pub mod co2;

pub use albedo::ice_albedo_forcing;
pub use co2::co2_forcing;
