//! Populations: contiguous node storage sharing one simulation clock

use serde::{Deserialize, Serialize};

use super::{Node, NodeSnapshot};
use crate::core::config::PopulationSpec;
use crate::core::types::NodeId;
use crate::deployment::Deployment;

/// Named group of nodes updated together each round
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    name: String,
    harvest_capable: bool,
    nodes: Vec<Node>,
}

impl Population {
    /// Build one node per deployed position, ids in deployment order
    pub fn from_deployment(spec: &PopulationSpec, deployment: &Deployment, capacity: f64) -> Self {
        let nodes = deployment
            .positions()
            .iter()
            .zip(deployment.distances())
            .enumerate()
            .map(|(i, (&position, &distance))| {
                Node::new(NodeId(i as u32), position, distance, capacity, spec.harvest_capable)
            })
            .collect();

        Self {
            name: spec.name.clone(),
            harvest_capable: spec.harvest_capable,
            nodes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn harvest_capable(&self) -> bool {
        self.harvest_capable
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn alive_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.alive).count()
    }

    pub fn snapshot(&self) -> PopulationSnapshot {
        PopulationSnapshot {
            name: self.name.clone(),
            harvest_capable: self.harvest_capable,
            nodes: self.nodes.iter().map(Node::snapshot).collect(),
        }
    }
}

/// Final spatial state of one population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub name: String,
    pub harvest_capable: bool,
    pub nodes: Vec<NodeSnapshot>,
}

impl PopulationSnapshot {
    pub fn alive_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.alive).count()
    }
}
