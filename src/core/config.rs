//! Simulation configuration with documented constants
//!
//! Every parameter of a run lives here, along with the rules that make a
//! combination valid. Values can be loaded from a TOML file; any field left
//! out of the file falls back to its default.

use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, Result};
use crate::weather::{HarvestFactor, WeatherProbabilities};

/// Configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === POPULATION ===
    /// Number of sensor nodes deployed in every population
    pub num_nodes: u32,

    /// Number of rounds to simulate
    ///
    /// The run never stops early; once every node is dead the remaining
    /// rounds still produce (flat) metric samples.
    pub total_rounds: u32,

    // === ENERGY MODEL ===
    /// Starting energy of every node, which is also its battery capacity (Joules)
    pub initial_energy: f64,

    /// Path-loss coefficient `k` in `loss = k * distance^2` (Joules per m^2 per round)
    ///
    /// At the default (1e-6), a node 50m from the sink spends 0.0025 J per
    /// round and a fresh 0.5 J battery lasts 200 rounds.
    pub loss_coefficient: f64,

    /// Energy a harvesting node gains per round under full sun (Joules)
    ///
    /// Scaled by the round's harvest factor (1.0 / 0.5 / 0.0).
    pub base_charge_rate: f64,

    // === RANDOMNESS ===
    /// Seed for deployment and weather generators
    pub seed: u64,

    // === SUBSYSTEMS ===
    pub field: FieldConfig,
    pub weather: WeatherProbabilities,
    pub harvest: HarvestConfig,

    /// Populations run in lockstep over the same deployment
    pub populations: Vec<PopulationSpec>,

    // === PARALLELIZATION ===
    /// Minimum population size before node updates run on the rayon pool
    ///
    /// Below this threshold, thread overhead exceeds the cost of the update pass.
    pub parallel_threshold: usize,
}

/// Square deployment field with the sink (base station) inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Side length of the field (meters)
    pub size: f64,
    pub sink_x: f64,
    pub sink_y: f64,
}

/// Where the per-round harvest factor comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HarvestConfig {
    /// Categorical sunny/cloudy/rainy draw each round
    Stochastic,
    /// Fixed cycle: the first `daylight` rounds of every `period` get full sun, the rest none
    DayNight { period: u32, daylight: u32 },
    /// Same factor every round
    Constant { factor: HarvestFactor },
}

/// A named population and whether its nodes can harvest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSpec {
    pub name: String,
    #[serde(default)]
    pub harvest_capable: bool,
}

impl PopulationSpec {
    pub fn new(name: impl Into<String>, harvest_capable: bool) -> Self {
        Self {
            name: name.into(),
            harvest_capable,
        }
    }

    pub fn standard() -> Self {
        Self::new("standard", false)
    }

    pub fn solar() -> Self {
        Self::new("solar", true)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_nodes: 100,
            total_rounds: 2000,

            initial_energy: 0.5,
            loss_coefficient: 1e-6,
            base_charge_rate: 0.002,

            seed: 42,

            field: FieldConfig::default(),
            weather: WeatherProbabilities::default(),
            harvest: HarvestConfig::default(),
            populations: vec![PopulationSpec::standard(), PopulationSpec::solar()],

            parallel_threshold: 4096,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            size: 100.0,
            sink_x: 50.0,
            sink_y: 50.0,
        }
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self::Stochastic
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.total_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.num_nodes == 0 {
            return Err(ConfigError::NoNodes);
        }
        if !(self.initial_energy.is_finite() && self.initial_energy > 0.0) {
            return Err(ConfigError::InvalidInitialEnergy(self.initial_energy));
        }
        if !(self.loss_coefficient.is_finite() && self.loss_coefficient > 0.0) {
            return Err(ConfigError::InvalidLossCoefficient(self.loss_coefficient));
        }
        if !(self.base_charge_rate.is_finite() && self.base_charge_rate >= 0.0) {
            return Err(ConfigError::InvalidChargeRate(self.base_charge_rate));
        }

        self.weather.validate()?;
        self.field.validate()?;

        if let HarvestConfig::DayNight { period, daylight } = self.harvest {
            if period == 0 || daylight > period {
                return Err(ConfigError::InvalidDayNightCycle { period, daylight });
            }
        }

        if self.populations.is_empty() {
            return Err(ConfigError::NoPopulations);
        }
        let mut seen = ahash::AHashSet::new();
        for spec in &self.populations {
            if spec.name.trim().is_empty() {
                return Err(ConfigError::EmptyPopulationName);
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicatePopulation(spec.name.clone()));
            }
        }

        Ok(())
    }

    /// True when at least one population can harvest, i.e. the run needs a weather draw
    pub fn any_harvesting(&self) -> bool {
        self.populations.iter().any(|p| p.harvest_capable)
    }

    /// Load and validate a config from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl FieldConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(ConfigError::InvalidFieldSize(self.size));
        }
        if !(self.sink_x.is_finite() && self.sink_y.is_finite()) {
            return Err(ConfigError::InvalidSink(self.sink_x, self.sink_y));
        }
        Ok(())
    }
}
