//! Startup and shutdown of the running system.

pub mod supply_system;

pub use supply_system::SupplySystem;
