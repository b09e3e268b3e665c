//! Cambio: a didactic carbon-cycle and global-temperature box model
//!
//! Emissions enter the atmosphere and are partitioned into ocean and land
//! reservoirs. Atmospheric carbon drives radiative forcing, forcing drives the
//! temperature anomaly, and ocean carbon sets surface pH. Four variants add one
//! feedback each:
//!
//! 1. Cambio 1.0: carbon balances with CO2 fertilization
//! 2. Cambio 2.0: Henry's-Law ocean uptake
//! 3. Cambio 3.0: ice-albedo feedback
//! 4. Cambio 4.0: saturating land sequestration
//!
//! ```ignore
//! let scenario = EmissionScenarioBuilder::new(1750.0, 2150.0, 600, 0.0166, 9.0, 2003.0, 2040.0, 15.0)
//!     .with_long_term_emissions(2.0)
//!     .build()?;
//! let params = ClimateParams::from_metadata(scenario.metadata());
//! let trajectory = run_scenario(&Variant::Cambio4, &params, &scenario)?;
//! ```

pub mod comparison;

pub use cambio_core::*;
pub use cambio_feedbacks as feedbacks;
pub use cambio_feedbacks::{Feedbacks, Variant};
