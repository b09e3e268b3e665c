//! Climate response

pub mod energy_balance;

pub use energy_balance::temperature_step;
