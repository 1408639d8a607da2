//! WSN Lifetime - Entry Point
//!
//! Loads the configuration, runs the battery vs. solar comparison and hands
//! the results to the text renderer (and optionally a JSON file for plotting).

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wsn_lifetime::core::error::Result;
use wsn_lifetime::render;
use wsn_lifetime::{Simulation, SimulationConfig};

/// Sensor field lifetime simulator
#[derive(Parser, Debug)]
#[command(name = "wsn-lifetime")]
#[command(about = "Compare lifetime and throughput of battery-only and solar-harvesting sensor fields")]
struct Args {
    /// TOML configuration file (defaults are used for anything it leaves out)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Random seed for deployment and weather
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds to simulate
    #[arg(long)]
    rounds: Option<u32>,

    /// Nodes per population
    #[arg(long)]
    nodes: Option<u32>,

    /// Write the full results as JSON to this path
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Print one table row every N rounds
    #[arg(long, default_value_t = 100)]
    report_every: u32,

    /// Print a character map of each population's final state
    #[arg(long)]
    map: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "wsn_lifetime=debug"
    } else {
        "wsn_lifetime=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading configuration");
            SimulationConfig::load_from_toml(path)?
        }
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(rounds) = args.rounds {
        config.total_rounds = rounds;
    }
    if let Some(nodes) = args.nodes {
        config.num_nodes = nodes;
    }

    // Overrides can break a valid file; nothing runs until the final config checks out
    let simulation = Simulation::new(config).map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        e
    })?;

    let field = simulation.config().field.clone();
    let output = simulation.run();

    println!("\n=== WSN LIFETIME ===");
    println!("{}", output.summary());
    if let Some(d) = output.distances {
        println!(
            "Distance to sink: min {:.1}m, mean {:.1}m, max {:.1}m",
            d.min, d.mean, d.max
        );
    }
    println!();
    println!("{}", render::series_table(&output, args.report_every));

    if args.map {
        for snapshot in &output.final_state {
            println!();
            println!(
                "{}",
                render::field_map(snapshot, output.sink, field.size, 40, 20)
            );
        }
    }

    if let Some(path) = &args.output {
        output.write_json(path)?;
        tracing::info!(path = %path.display(), "results written");
    }

    Ok(())
}
