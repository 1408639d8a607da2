//! Simulation output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::PopulationSeries;
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::Vec2;
use crate::deployment::DistanceSummary;
use crate::node::population::PopulationSnapshot;
use crate::weather::HarvestFactor;

/// Complete simulation output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub config: SimulationConfig,
    pub populations: Vec<PopulationSeries>,
    /// Harvest factor of each round; `None` when no population harvests
    pub harvest: Vec<Option<HarvestFactor>>,
    pub final_state: Vec<PopulationSnapshot>,
    pub sink: Vec2,
    pub distances: Option<DistanceSummary>,
    pub statistics: RunStatistics,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunStatistics {
    pub rounds_simulated: u32,
    pub nodes_per_population: u32,
    pub seed: u64,
    pub simulation_time_ms: u64,
}

impl RunStatistics {
    pub fn new(config: &SimulationConfig, rounds_simulated: u32, nodes: usize, elapsed: Duration) -> Self {
        Self {
            rounds_simulated,
            nodes_per_population: nodes as u32,
            seed: config.seed,
            simulation_time_ms: elapsed.as_millis() as u64,
        }
    }
}

impl SimulationOutput {
    pub fn population(&self, name: &str) -> Option<&PopulationSeries> {
        self.populations.iter().find(|p| p.name == name)
    }

    pub fn snapshot(&self, name: &str) -> Option<&PopulationSnapshot> {
        self.final_state.iter().find(|p| p.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn write_json(&self, path: &std::path::Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Simulated {} rounds of {} nodes per population in {}ms (seed {})",
            self.statistics.rounds_simulated,
            self.statistics.nodes_per_population,
            self.statistics.simulation_time_ms,
            self.statistics.seed,
        )];

        for series in &self.populations {
            lines.push(format!(
                "{:<12} {:>5}/{:<5} alive  {:>10} packets  FND {:>6}  HND {:>6}  LND {:>6}",
                series.name,
                series.final_alive(),
                series.initial_nodes,
                series.total_throughput(),
                fmt_round(series.milestones.first_death),
                fmt_round(series.milestones.half_dead),
                fmt_round(series.milestones.last_death),
            ));
        }

        lines.join("\n")
    }
}

fn fmt_round(round: Option<u32>) -> String {
    round.map_or_else(|| "-".to_string(), |r| r.to_string())
}
