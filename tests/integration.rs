//! Integration tests for GRAZERS

use grazers::{BoardLayout, Config, StatsHistory, World};

const BOARD: &str = concat!(
    "x   x    \n",
    "  x     x\n",
    "     x   \n",
    "x       x\n",
    "    x    \n",
);

fn seeded_world(config: Config, seed: u64) -> World {
    let layout: BoardLayout = BOARD.parse().unwrap();
    let mut world = World::new_with_seed(&layout, config, seed);
    world.seed_population();
    world.refresh_and_collect_stats();
    world
}

#[test]
fn test_full_simulation_cycle() {
    let mut config = Config::default();
    config.agents.initial_population = 30;

    let mut world = seeded_world(config, 12345);
    world.run(200);

    assert_eq!(world.round, 200);
    // the stats pass and the arena agree on the population
    assert_eq!(world.stats.population, world.population());
    // survivors always end a round with non-negative energy
    if !world.is_extinct() {
        assert!(world.stats.energy.min() >= 0.0);
    }
}

#[test]
fn test_reproducibility() {
    let mut config = Config::default();
    config.agents.initial_population = 25;

    let mut world1 = seeded_world(config.clone(), 99999);
    let mut world2 = seeded_world(config, 99999);

    world1.run(150);
    world2.run(150);

    assert_eq!(world1.round, world2.round);
    assert_eq!(world1.population(), world2.population());
    assert_eq!(world1.stats.summary(), world2.stats.summary());
    assert_eq!(world1.state_report(), world2.state_report());
}

#[test]
fn test_extinction_is_not_fatal() {
    let mut config = Config::default();
    config.agents.initial_population = 10;
    config.agents.round_cost = 1000.0;

    let mut world = seeded_world(config, 11111);
    world.run(20);

    assert!(world.is_extinct());
    assert_eq!(world.stats.population, 0);
    assert_eq!(world.round, 20);
    // empty metrics report as zeros, not sentinels
    assert_eq!(world.stats.energy.min(), 0.0);
    assert_eq!(world.stats.energy.max(), 0.0);
}

#[test]
fn test_state_report_shape() {
    let mut config = Config::default();
    config.agents.initial_population = 5;

    let world = seeded_world(config, 333);
    let report = world.state_report();

    assert!(report.starts_with("SIMULATION STATE (round 0)"));
    assert_eq!(report.matches("agent {").count(), 5);
}

#[test]
fn test_config_and_board_files_roundtrip() {
    let config_path = "/tmp/grazers_test_config.yaml";
    let board_path = "/tmp/grazers_test_board.txt";

    let mut config = Config::default();
    config.simulation.rounds = 42;
    config.save(config_path).expect("Failed to save config");
    let loaded = Config::from_file(config_path).expect("Failed to load config");
    assert_eq!(loaded.simulation.rounds, 42);

    std::fs::write(board_path, BOARD).unwrap();
    let layout = BoardLayout::from_file(board_path).expect("Failed to load board");
    assert_eq!(layout.rows(), 5);
    assert_eq!(layout.cols(), 9);

    std::fs::remove_file(config_path).ok();
    std::fs::remove_file(board_path).ok();
}

#[test]
fn test_stats_history_export() {
    let history_path = "/tmp/grazers_test_history.json";

    let mut config = Config::default();
    config.agents.initial_population = 15;
    let mut world = seeded_world(config, 2024);

    let mut history = StatsHistory::new();
    history.record(world.stats.snapshot());
    for _ in 0..30 {
        world.advance_round();
        world.refresh_and_collect_stats();
        history.record(world.stats.snapshot());
    }

    assert_eq!(history.len(), 31);
    let series = history.population_series();
    assert_eq!(series[0].1, 15);

    history.save(history_path).expect("Failed to save history");
    let loaded = StatsHistory::load(history_path).expect("Failed to load history");
    assert_eq!(loaded.len(), history.len());

    std::fs::remove_file(history_path).ok();
}
