//! WSN Lifetime - battery vs. solar-harvesting sensor field simulation

pub mod core;
pub mod deployment;
pub mod energy;
pub mod metrics;
pub mod node;
pub mod render;
pub mod simulation;
pub mod weather;

pub use crate::core::config::SimulationConfig;
pub use crate::core::error::{ConfigError, Result, WsnError};
pub use crate::simulation::{simulate, Simulation};
