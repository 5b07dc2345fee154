//! GRAZERS - CLI entry point.
//!
//! Drives a simulation run: per-round stats lines, periodic full state
//! dumps, and an optional stats-history export.

use clap::{Parser, Subcommand};
use grazers::{BoardLayout, Config, StatsHistory, World};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grazers")]
#[command(version)]
#[command(about = "Artificial-life simulator: program-driven grazers on a toroidal board")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Board layout file ('x' = food cell, space = empty cell)
        #[arg(short, long, default_value = "board.txt")]
        board: PathBuf,

        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Override the configured round count
        #[arg(short, long)]
        rounds: Option<u64>,

        /// Quiet mode (suppress per-round output)
        #[arg(short, long)]
        quiet: bool,

        /// Write the recorded stats history to a JSON file
        #[arg(long)]
        stats_json: Option<PathBuf>,
    },

    /// Generate a default configuration file and a starter board
    Init {
        /// Configuration output path
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Board output path
        #[arg(short, long, default_value = "board.txt")]
        board: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            board,
            config,
            seed,
            rounds,
            quiet,
            stats_json,
        } => run_simulation(board, config, seed, rounds, quiet, stats_json),

        Commands::Init { config, board } => generate_files(config, board),
    }
}

fn run_simulation(
    board_path: PathBuf,
    config_path: PathBuf,
    seed: Option<u64>,
    rounds: Option<u64>,
    quiet: bool,
    stats_json: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = BoardLayout::from_file(&board_path)?;

    // Load or create config
    let mut config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };
    if let Some(rounds) = rounds {
        config.simulation.rounds = rounds;
        config.validate()?;
    }

    // Create world
    let mut world = if let Some(seed) = seed {
        println!("Using seed: {}", seed);
        World::new_with_seed(&layout, config.clone(), seed)
    } else {
        World::new(&layout, config.clone())
    };

    println!("Starting simulation");
    println!("  Board: {}x{} ({} food cells)", layout.rows(), layout.cols(), layout.food_cell_count());
    println!("  Initial population: {}", config.agents.initial_population);
    println!("  Rounds: {}", config.simulation.rounds);
    println!();

    world.seed_population();
    world.refresh_and_collect_stats();

    let mut history = StatsHistory::new();
    history.record(world.stats.snapshot());

    if !quiet {
        println!("{}", world.state_report());
    }

    let dump_interval = config.simulation.dump_interval;
    let mut since_dump = 1u64;
    for _ in 0..config.simulation.rounds {
        world.advance_round();
        world.refresh_and_collect_stats();
        history.record(world.stats.snapshot());

        if !quiet {
            println!("{}", world.stats.summary());
            if since_dump == dump_interval {
                println!("{}", world.state_report());
                since_dump = 0;
            }
        }
        since_dump += 1;
    }
    // always end with a dump, unless the cadence just produced one
    if !quiet && since_dump != 1 {
        println!("{}", world.state_report());
    }

    println!();
    println!("=== Simulation Complete ===");
    println!("Rounds: {}", world.round);
    println!("Final population: {}", world.population());
    println!("Seed: {}", world.seed());

    if let Some(path) = stats_json {
        history.save(&path)?;
        log::info!("stats history written to {:?}", path);
    }

    Ok(())
}

// 8x16, every row the same width: the layout parser rejects ragged rows.
const STARTER_BOARD: &str = concat!(
    "x      x        \n",
    "   x       x    \n",
    "        x      x\n",
    "  x        x    \n",
    "x      x        \n",
    "     x      x   \n",
    " x        x     \n",
    "       x      x \n",
);

fn generate_files(
    config_path: PathBuf,
    board_path: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&config_path)?;
    println!("Configuration saved to: {:?}", config_path);

    std::fs::write(&board_path, STARTER_BOARD)?;
    println!("Starter board saved to: {:?}", board_path);

    Ok(())
}
