//! Per-population metric series
//!
//! For every population the accumulator keeps the number of live nodes after
//! each round and the running total of alive-node-rounds (one packet per live
//! node per round). Both series grow by exactly one sample per round.

pub mod output;

pub use output::{RunStatistics, SimulationOutput};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::Round;
use crate::node::Population;
use crate::weather::HarvestFactor;

/// Rounds at which a population crossed the classic lifetime thresholds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeMilestones {
    /// First node dies (FND)
    pub first_death: Option<Round>,
    /// At least half the nodes are dead (HND)
    pub half_dead: Option<Round>,
    /// Last node dies (LND)
    pub last_death: Option<Round>,
}

/// Metric series for one population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSeries {
    pub name: String,
    pub harvest_capable: bool,
    pub initial_nodes: u32,
    pub alive_count: Vec<u32>,
    pub cumulative_throughput: Vec<u64>,
    pub milestones: LifetimeMilestones,
}

impl PopulationSeries {
    pub fn new(name: impl Into<String>, harvest_capable: bool, initial_nodes: u32, total_rounds: Round) -> Self {
        Self {
            name: name.into(),
            harvest_capable,
            initial_nodes,
            alive_count: Vec::with_capacity(total_rounds as usize),
            cumulative_throughput: Vec::with_capacity(total_rounds as usize),
            milestones: LifetimeMilestones::default(),
        }
    }

    /// Append the sample for `round` given the live node count after its update
    pub fn record(&mut self, round: Round, alive: u32) {
        debug_assert_eq!(self.alive_count.len(), round as usize);
        debug_assert!(self.alive_count.last().map_or(alive <= self.initial_nodes, |&prev| alive <= prev));

        let throughput = self.total_throughput() + u64::from(alive);
        self.alive_count.push(alive);
        self.cumulative_throughput.push(throughput);

        let dead = self.initial_nodes.saturating_sub(alive);
        let milestones = &mut self.milestones;
        if dead > 0 && milestones.first_death.is_none() {
            milestones.first_death = Some(round);
            tracing::debug!(population = %self.name, round, "first node died");
        }
        if dead * 2 >= self.initial_nodes && milestones.half_dead.is_none() {
            milestones.half_dead = Some(round);
            tracing::debug!(population = %self.name, round, "half of the nodes are dead");
        }
        if alive == 0 && milestones.last_death.is_none() {
            milestones.last_death = Some(round);
            tracing::debug!(population = %self.name, round, "last node died");
        }
    }

    pub fn rounds(&self) -> usize {
        self.alive_count.len()
    }

    pub fn total_throughput(&self) -> u64 {
        self.cumulative_throughput.last().copied().unwrap_or(0)
    }

    pub fn final_alive(&self) -> u32 {
        self.alive_count.last().copied().unwrap_or(self.initial_nodes)
    }
}

/// Collects series for every population of a run, in population order
#[derive(Debug, Clone)]
pub struct MetricsAccumulator {
    series: Vec<PopulationSeries>,
    index: AHashMap<String, usize>,
    harvest: Vec<Option<HarvestFactor>>,
}

impl MetricsAccumulator {
    pub fn new(populations: &[Population], total_rounds: Round) -> Self {
        let series: Vec<_> = populations
            .iter()
            .map(|p| PopulationSeries::new(p.name(), p.harvest_capable(), p.len() as u32, total_rounds))
            .collect();
        let index = series
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();

        Self {
            series,
            index,
            harvest: Vec::with_capacity(total_rounds as usize),
        }
    }

    /// Factor drawn for the round, `None` when no population harvests
    pub fn record_harvest(&mut self, factor: Option<HarvestFactor>) {
        self.harvest.push(factor);
    }

    pub fn record(&mut self, population: usize, round: Round, alive: u32) {
        self.series[population].record(round, alive);
    }

    pub fn series(&self) -> &[PopulationSeries] {
        &self.series
    }

    pub fn get(&self, name: &str) -> Option<&PopulationSeries> {
        self.index.get(name).map(|&i| &self.series[i])
    }

    pub fn harvest_history(&self) -> &[Option<HarvestFactor>] {
        &self.harvest
    }

    pub fn into_parts(self) -> (Vec<PopulationSeries>, Vec<Option<HarvestFactor>>) {
        (self.series, self.harvest)
    }
}
