//! Simulation driver

pub mod engine;

pub use engine::{simulate, RoundSummary, RoundTally, Simulation};
