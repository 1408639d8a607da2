//! Integration tests for the depletion/harvesting engine
//!
//! These tests drive complete runs through the public API:
//! - a node at the sink never dies
//! - a distant battery node dies at an exact round
//! - a fully charged twin population outlives its battery-only twin
//! - invalid configurations are rejected before any round runs

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wsn_lifetime::core::config::{FieldConfig, HarvestConfig, PopulationSpec};
use wsn_lifetime::deployment::Deployment;
use wsn_lifetime::weather::{ConstantHarvest, HarvestFactor, WeatherProbabilities};
use wsn_lifetime::{simulate, ConfigError, Simulation, SimulationConfig};

fn single_node_config(rounds: u32) -> SimulationConfig {
    SimulationConfig {
        num_nodes: 1,
        total_rounds: rounds,
        initial_energy: 0.5,
        loss_coefficient: 1e-6,
        populations: vec![PopulationSpec::standard()],
        ..Default::default()
    }
}

#[test]
fn test_node_at_sink_never_dies() {
    let rounds = 1000;
    let deployment = Deployment::from_distances(vec![0.0]).unwrap();
    let sim = Simulation::with_parts(
        single_node_config(rounds),
        deployment,
        Box::new(ConstantHarvest(HarvestFactor::None)),
    )
    .unwrap();
    let output = sim.run();

    let series = output.population("standard").unwrap();
    assert!(series.alive_count.iter().all(|&a| a == 1));
    for (r, &t) in series.cumulative_throughput.iter().enumerate() {
        assert_eq!(t, r as u64 + 1);
    }
    assert_eq!(series.total_throughput(), rounds as u64);
    assert_eq!(series.milestones.first_death, None);

    let node = &output.snapshot("standard").unwrap().nodes[0];
    assert!(node.alive);
    assert_eq!(node.energy, 0.5);
}

#[test]
fn test_distant_node_dies_on_fiftieth_update() {
    // loss = 1e-6 * 100^2 = 0.01 per round; 0.5 J lasts 50 updates
    let deployment = Deployment::from_distances(vec![100.0]).unwrap();
    let sim = Simulation::with_parts(
        single_node_config(120),
        deployment,
        Box::new(ConstantHarvest(HarvestFactor::None)),
    )
    .unwrap();
    assert_eq!(sim.model().rounds_to_depletion(100.0), Some(50));

    let output = sim.run();
    let series = output.population("standard").unwrap();

    assert!(series.alive_count[..49].iter().all(|&a| a == 1));
    assert!(series.alive_count[49..].iter().all(|&a| a == 0));
    assert_eq!(series.alive_count.len(), 120);
    assert_eq!(series.total_throughput(), 49);
    assert_eq!(series.milestones.first_death, Some(49));
    assert_eq!(series.milestones.last_death, Some(49));

    let node = &output.snapshot("standard").unwrap().nodes[0];
    assert!(!node.alive);
    assert_eq!(node.energy, 0.0);
}

#[test]
fn test_full_sun_twin_outlives_battery_twin() {
    let nodes = 50;
    let rounds = 2000;
    let config = SimulationConfig {
        num_nodes: nodes,
        total_rounds: rounds,
        // Worst-case loss in a 100m field is 1e-6 * 70.7^2 = 0.005
        base_charge_rate: 0.01,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let deployment = Deployment::random(&FieldConfig::default(), nodes, &mut rng);

    let output = Simulation::with_parts(
        config,
        deployment,
        Box::new(ConstantHarvest(HarvestFactor::Full)),
    )
    .unwrap()
    .run();

    let solar = output.population("solar").unwrap();
    let standard = output.population("standard").unwrap();

    assert!(solar.alive_count.iter().all(|&a| a == nodes));
    assert_eq!(solar.total_throughput(), nodes as u64 * rounds as u64);
    assert!(standard.final_alive() < nodes);
    assert!(standard.total_throughput() < solar.total_throughput());
    assert!(standard.milestones.first_death.is_some());
}

#[test]
fn test_always_sunny_weather_config_matches_constant_harvest() {
    let base = SimulationConfig {
        num_nodes: 30,
        total_rounds: 600,
        base_charge_rate: 0.01,
        ..Default::default()
    };
    let sunny = simulate(SimulationConfig {
        weather: WeatherProbabilities {
            sunny: 1.0,
            cloudy: 0.0,
            rainy: 0.0,
        },
        ..base.clone()
    })
    .unwrap();
    let constant = simulate(SimulationConfig {
        harvest: HarvestConfig::Constant {
            factor: HarvestFactor::Full,
        },
        ..base
    })
    .unwrap();

    assert_eq!(sunny.populations, constant.populations);
    assert!(sunny.harvest.iter().all(|h| *h == Some(HarvestFactor::Full)));
}

#[test]
fn test_stochastic_comparison_favours_solar() {
    let output = simulate(SimulationConfig::default()).unwrap();
    let solar = output.population("solar").unwrap();
    let standard = output.population("standard").unwrap();

    assert_eq!(output.statistics.rounds_simulated, 2000);
    for r in 0..2000 {
        assert!(solar.alive_count[r] >= standard.alive_count[r]);
    }
    assert!(solar.total_throughput() >= standard.total_throughput());

    // Both populations sit on the same deployment
    let a = output.snapshot("solar").unwrap();
    let b = output.snapshot("standard").unwrap();
    for (x, y) in a.nodes.iter().zip(&b.nodes) {
        assert_eq!((x.id, x.x, x.y, x.distance), (y.id, y.x, y.y, y.distance));
    }
}

#[test]
fn test_runs_past_total_depletion() {
    let config = SimulationConfig {
        num_nodes: 10,
        total_rounds: 500,
        initial_energy: 0.001,
        populations: vec![PopulationSpec::standard()],
        field: FieldConfig {
            size: 100.0,
            sink_x: -1000.0,
            sink_y: -1000.0,
        },
        ..Default::default()
    };
    let output = simulate(config).unwrap();
    let series = output.population("standard").unwrap();

    // Every node is > 1000m away: 1 J per round kills all of them in round 0
    assert_eq!(series.alive_count.len(), 500);
    assert!(series.alive_count.iter().all(|&a| a == 0));
    assert_eq!(series.total_throughput(), 0);
    assert_eq!(series.milestones.last_death, Some(0));
}

#[test]
fn test_rejects_zero_rounds() {
    let config = SimulationConfig {
        total_rounds: 0,
        ..Default::default()
    };
    assert!(matches!(simulate(config), Err(ConfigError::NoRounds)));
}

#[test]
fn test_rejects_probabilities_summing_below_one() {
    let config = SimulationConfig {
        weather: WeatherProbabilities {
            sunny: 0.6,
            cloudy: 0.3,
            rainy: 0.05,
        },
        ..Default::default()
    };
    let err = Simulation::new(config).err().unwrap();
    match err {
        ConfigError::ProbabilitySum(sum) => assert!((sum - 0.95).abs() < 1e-9),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_default_scenario_file_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/default.toml");
    let config = SimulationConfig::load_from_toml(&path).unwrap();
    assert_eq!(config, SimulationConfig::default());
}

#[test]
fn test_day_night_scenario_file_runs() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/day_night.toml");
    let config = SimulationConfig::load_from_toml(&path).unwrap();
    assert!(matches!(config.harvest, HarvestConfig::DayNight { .. }));

    let output = simulate(config).unwrap();
    assert_eq!(output.populations.len(), 2);
}
