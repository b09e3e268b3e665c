//! Carbon cycle
//!
//! - `ocean`: air-sea exchange (fixed partition or Henry's-Law equilibrium)
//!   and the surface pH diagnostic
//! - `land`: gross uptake with CO2 fertilization, optionally saturating, minus
//!   turnover

pub mod land;
pub mod ocean;

pub use land::land_net_flux;
pub use ocean::{air_sea_net_flux, ocean_surface_ph};
