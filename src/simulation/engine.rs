//! Round-based simulation engine
//!
//! Each round: one harvest draw (only when some population harvests), then an
//! independent update pass over every population, then one metric sample per
//! population. The run always lasts `total_rounds`, even after every node is
//! dead.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::core::config::SimulationConfig;
use crate::core::error::ConfigError;
use crate::core::types::Round;
use crate::deployment::Deployment;
use crate::energy::{EnergyModel, NodeOutcome};
use crate::metrics::{MetricsAccumulator, RunStatistics, SimulationOutput};
use crate::node::{Node, Population};
use crate::weather::{build_source, HarvestFactor, HarvestSource};

/// Live/dead counts produced by one update pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundTally {
    pub alive: u32,
    pub died: u32,
}

impl RoundTally {
    fn from_outcome(outcome: NodeOutcome) -> Self {
        match outcome {
            NodeOutcome::Survived => Self { alive: 1, died: 0 },
            NodeOutcome::Died => Self { alive: 0, died: 1 },
            NodeOutcome::Skipped => Self::default(),
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            alive: self.alive + other.alive,
            died: self.died + other.died,
        }
    }
}

/// What happened during one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: Round,
    /// `None` when no population harvests and no draw was made
    pub harvest: Option<HarvestFactor>,
    /// One tally per population, in population order
    pub tallies: Vec<RoundTally>,
}

/// Owns every node, population and metric series for one run
pub struct Simulation {
    config: SimulationConfig,
    model: EnergyModel,
    deployment: Deployment,
    populations: Vec<Population>,
    harvest: Box<dyn HarvestSource>,
    harvesting: bool,
    metrics: MetricsAccumulator,
    round: Round,
}

impl Simulation {
    /// Validate the config, deploy nodes from the config seed and build the
    /// configured harvest source
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let deployment = Deployment::random(&config.field, config.num_nodes, &mut rng);
        let harvest = build_source(&config.harvest, config.weather, config.seed)?;

        Self::with_parts(config, deployment, harvest)
    }

    /// Build a run from an explicit deployment and harvest source
    pub fn with_parts(
        config: SimulationConfig,
        deployment: Deployment,
        harvest: Box<dyn HarvestSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if deployment.len() != config.num_nodes as usize {
            return Err(ConfigError::DeploymentSize {
                expected: config.num_nodes,
                actual: deployment.len(),
            });
        }

        let model = EnergyModel::from_config(&config)?;
        let populations: Vec<Population> = config
            .populations
            .iter()
            .map(|spec| Population::from_deployment(spec, &deployment, model.capacity()))
            .collect();
        let metrics = MetricsAccumulator::new(&populations, config.total_rounds);
        let harvesting = config.any_harvesting();

        Ok(Self {
            config,
            model,
            deployment,
            populations,
            harvest,
            harvesting,
            metrics,
            round: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn model(&self) -> &EnergyModel {
        &self.model
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    pub fn metrics(&self) -> &MetricsAccumulator {
        &self.metrics
    }

    /// Next round to run
    pub fn round(&self) -> Round {
        self.round
    }

    pub fn is_finished(&self) -> bool {
        self.round >= self.config.total_rounds
    }

    /// Advance one round. Returns `None` once all rounds have run.
    pub fn step(&mut self) -> Option<RoundSummary> {
        if self.is_finished() {
            return None;
        }
        let round = self.round;

        // One draw per round, broadcast to every harvesting node
        let harvest = self.harvesting.then(|| self.harvest.factor_for(round));
        let factor = harvest.unwrap_or(HarvestFactor::None);
        self.metrics.record_harvest(harvest);

        let model = self.model;
        let threshold = self.config.parallel_threshold;
        let mut tallies = Vec::with_capacity(self.populations.len());

        for (index, population) in self.populations.iter_mut().enumerate() {
            let parallel = population.len() >= threshold;
            let tally = update_nodes(&model, population.nodes_mut(), factor, parallel);
            if tally.died > 0 {
                tracing::debug!(
                    population = population.name(),
                    round,
                    died = tally.died,
                    alive = tally.alive,
                    "nodes depleted"
                );
            }
            self.metrics.record(index, round, tally.alive);
            tallies.push(tally);
        }

        tracing::trace!(round, ?harvest, "round complete");
        self.round += 1;

        Some(RoundSummary {
            round,
            harvest,
            tallies,
        })
    }

    /// Run every remaining round and collect the output
    pub fn run(mut self) -> SimulationOutput {
        let start = Instant::now();

        tracing::info!(
            nodes = self.config.num_nodes,
            rounds = self.config.total_rounds,
            populations = self.populations.len(),
            seed = self.config.seed,
            "starting simulation"
        );

        while self.step().is_some() {}

        let elapsed = start.elapsed();
        tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "simulation complete");

        self.into_output(elapsed)
    }

    fn into_output(self, elapsed: std::time::Duration) -> SimulationOutput {
        let statistics = RunStatistics::new(&self.config, self.round, self.deployment.len(), elapsed);
        let final_state = self.populations.iter().map(Population::snapshot).collect();
        let (populations, harvest) = self.metrics.into_parts();

        SimulationOutput {
            sink: self.deployment.sink(),
            distances: self.deployment.distance_summary(),
            config: self.config,
            populations,
            harvest,
            final_state,
            statistics,
        }
    }
}

/// Apply one round to every node of a population.
///
/// Nodes never interact, so the pass can be split across the rayon pool;
/// each node is written by exactly one task.
fn update_nodes(model: &EnergyModel, nodes: &mut [Node], factor: HarvestFactor, parallel: bool) -> RoundTally {
    if parallel {
        nodes
            .par_iter_mut()
            .map(|node| RoundTally::from_outcome(model.apply(node, factor)))
            .reduce(RoundTally::default, RoundTally::merge)
    } else {
        nodes
            .iter_mut()
            .map(|node| RoundTally::from_outcome(model.apply(node, factor)))
            .fold(RoundTally::default(), RoundTally::merge)
    }
}

/// Run a whole simulation from a config
pub fn simulate(config: SimulationConfig) -> Result<SimulationOutput, ConfigError> {
    Ok(Simulation::new(config)?.run())
}
