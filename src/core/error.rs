use thiserror::Error;

/// Invalid parameter combination, detected before any round runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("total_rounds must be positive")]
    NoRounds,

    #[error("num_nodes must be positive")]
    NoNodes,

    #[error("initial_energy must be positive and finite, got {0}")]
    InvalidInitialEnergy(f64),

    #[error("loss_coefficient must be positive and finite, got {0}")]
    InvalidLossCoefficient(f64),

    #[error("base_charge_rate must be non-negative and finite, got {0}")]
    InvalidChargeRate(f64),

    #[error("weather probability '{name}' must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("weather probabilities must sum to 1.0, got {0}")]
    ProbabilitySum(f64),

    #[error("field size must be positive and finite, got {0}")]
    InvalidFieldSize(f64),

    #[error("sink position ({0}, {1}) is not finite")]
    InvalidSink(f64, f64),

    #[error("day/night cycle needs period > 0 and daylight <= period (period {period}, daylight {daylight})")]
    InvalidDayNightCycle { period: u32, daylight: u32 },

    #[error("at least one population is required")]
    NoPopulations,

    #[error("population names must be non-empty")]
    EmptyPopulationName,

    #[error("duplicate population name: {0}")]
    DuplicatePopulation(String),

    #[error("node {index} has invalid distance {distance}")]
    InvalidDistance { index: usize, distance: f64 },

    #[error("deployment holds {actual} nodes but num_nodes is {expected}")]
    DeploymentSize { expected: u32, actual: usize },
}

#[derive(Error, Debug)]
pub enum WsnError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WsnError>;
