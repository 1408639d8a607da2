//! Depletion and harvesting model
//!
//! Every round a live node pays a transmission cost that grows with the
//! square of its distance to the sink (the energy-hole effect), then, if it
//! can harvest, recovers the round's share of the base charge rate. Energy
//! never exceeds the battery capacity. A node whose energy reaches zero is
//! dead for good; exactly zero counts as dead.

use crate::core::config::SimulationConfig;
use crate::core::error::ConfigError;
use crate::node::Node;
use crate::weather::HarvestFactor;

/// Result of applying one round to one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOutcome {
    /// Node was already dead; nothing happened
    Skipped,
    /// Node is alive after the round and reports one packet
    Survived,
    /// Node ran out of energy this round
    Died,
}

/// Per-round energy accounting shared by every node of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyModel {
    capacity: f64,
    loss_coefficient: f64,
    base_charge_rate: f64,
}

impl EnergyModel {
    pub fn new(capacity: f64, loss_coefficient: f64, base_charge_rate: f64) -> Result<Self, ConfigError> {
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(ConfigError::InvalidInitialEnergy(capacity));
        }
        if !(loss_coefficient.is_finite() && loss_coefficient > 0.0) {
            return Err(ConfigError::InvalidLossCoefficient(loss_coefficient));
        }
        if !(base_charge_rate.is_finite() && base_charge_rate >= 0.0) {
            return Err(ConfigError::InvalidChargeRate(base_charge_rate));
        }
        Ok(Self {
            capacity,
            loss_coefficient,
            base_charge_rate,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.initial_energy,
            config.loss_coefficient,
            config.base_charge_rate,
        )
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Energy spent per round at `distance` from the sink
    pub fn loss(&self, distance: f64) -> f64 {
        self.loss_coefficient * (distance * distance)
    }

    /// Energy gained per round by a harvesting node
    pub fn charge(&self, factor: HarvestFactor) -> f64 {
        self.base_charge_rate * factor.multiplier()
    }

    /// Pure form of [`EnergyModel::apply`]
    pub fn update(&self, mut node: Node, factor: HarvestFactor) -> Node {
        self.apply(&mut node, factor);
        node
    }

    /// Advance one node by one round in place
    pub fn apply(&self, node: &mut Node, factor: HarvestFactor) -> NodeOutcome {
        if !node.alive {
            return NodeOutcome::Skipped;
        }

        node.energy -= self.loss(node.distance());

        if node.harvest_capable() {
            node.energy = (node.energy + self.charge(factor)).min(self.capacity);
        }

        if node.energy <= 0.0 {
            node.energy = 0.0;
            node.alive = false;
            NodeOutcome::Died
        } else {
            NodeOutcome::Survived
        }
    }

    /// Whether a harvesting node at `distance` can never die when every
    /// round yields at least `worst` as its harvest factor
    pub fn sustains(&self, distance: f64, worst: HarvestFactor) -> bool {
        self.charge(worst) >= self.loss(distance)
    }

    /// Number of updates a non-harvesting node survives before dying,
    /// counting the round it dies in. `None` when it never loses energy.
    pub fn rounds_to_depletion(&self, distance: f64) -> Option<u64> {
        let loss = self.loss(distance);
        if loss <= 0.0 {
            return None;
        }
        Some((self.capacity / loss).ceil() as u64)
    }
}
