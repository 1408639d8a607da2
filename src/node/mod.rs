//! Sensor node state

pub mod population;

pub use population::Population;

use serde::{Deserialize, Serialize};

use crate::core::types::{NodeId, Vec2};

/// One sensor node.
///
/// Identity, position, distance and harvesting capability are fixed at
/// creation. Only the energy model mutates `energy` and `alive`, and
/// `alive` only ever goes from true to false.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    id: NodeId,
    position: Vec2,
    distance: f64,
    harvest_capable: bool,
    pub(crate) energy: f64,
    pub(crate) alive: bool,
}

impl Node {
    /// Fresh node with a full battery
    pub fn new(id: NodeId, position: Vec2, distance: f64, capacity: f64, harvest_capable: bool) -> Self {
        Self {
            id,
            position,
            distance,
            harvest_capable,
            energy: capacity,
            alive: true,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn harvest_capable(&self) -> bool {
        self.harvest_capable
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            id: self.id,
            x: self.position.x,
            y: self.position.y,
            distance: self.distance,
            energy: self.energy,
            alive: self.alive,
        }
    }
}

/// Final per-node state handed to renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub distance: f64,
    pub energy: f64,
    pub alive: bool,
}
