pub mod config;
pub mod error;
pub mod types;

pub use config::{FieldConfig, HarvestConfig, PopulationSpec, SimulationConfig};
pub use error::{ConfigError, Result, WsnError};
pub use types::{NodeId, Round, Vec2};
