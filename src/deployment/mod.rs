//! Sensor deployment
//!
//! Places nodes in the field and measures their distance to the sink. A
//! single deployment is shared by every population of a run so that the
//! populations differ only in their harvesting capability.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::FieldConfig;
use crate::core::error::ConfigError;
use crate::core::types::Vec2;

/// Node positions and their fixed distances to the sink
#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    sink: Vec2,
    positions: Vec<Vec2>,
    distances: Vec<f64>,
}

/// Distance statistics for the energy map view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceSummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl Deployment {
    /// Uniform random placement over `[0, size)^2`
    pub fn random<R: Rng>(field: &FieldConfig, num_nodes: u32, rng: &mut R) -> Self {
        let sink = Vec2::new(field.sink_x, field.sink_y);
        let positions: Vec<Vec2> = (0..num_nodes)
            .map(|_| Vec2::new(rng.gen_range(0.0..field.size), rng.gen_range(0.0..field.size)))
            .collect();
        let distances = positions.iter().map(|p| p.distance(&sink)).collect();

        tracing::debug!(
            nodes = num_nodes,
            size = field.size,
            "deployed nodes uniformly over field"
        );

        Self {
            sink,
            positions,
            distances,
        }
    }

    /// Deployment from known positions
    pub fn from_positions(sink: Vec2, positions: Vec<Vec2>) -> Result<Self, ConfigError> {
        if !sink.is_finite() {
            return Err(ConfigError::InvalidSink(sink.x, sink.y));
        }
        let distances: Vec<f64> = positions.iter().map(|p| p.distance(&sink)).collect();
        check_distances(&distances)?;
        Ok(Self {
            sink,
            positions,
            distances,
        })
    }

    /// Deployment from bare distances; nodes are laid out along the x axis
    /// from a sink at the origin so snapshots still carry coordinates.
    pub fn from_distances(distances: Vec<f64>) -> Result<Self, ConfigError> {
        check_distances(&distances)?;
        let positions = distances.iter().map(|&d| Vec2::new(d, 0.0)).collect();
        Ok(Self {
            sink: Vec2::default(),
            positions,
            distances,
        })
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn sink(&self) -> Vec2 {
        self.sink
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn distance_summary(&self) -> Option<DistanceSummary> {
        if self.distances.is_empty() {
            return None;
        }
        let min = self.distances.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.distances.iter().copied().fold(0.0, f64::max);
        let mean = self.distances.iter().sum::<f64>() / self.distances.len() as f64;
        Some(DistanceSummary { min, mean, max })
    }
}

fn check_distances(distances: &[f64]) -> Result<(), ConfigError> {
    for (index, &distance) in distances.iter().enumerate() {
        if !(distance.is_finite() && distance >= 0.0) {
            return Err(ConfigError::InvalidDistance { index, distance });
        }
    }
    Ok(())
}
