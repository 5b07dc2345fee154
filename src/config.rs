//! Configuration for a simulation run.
//!
//! Supports YAML configuration files with sensible defaults. Every
//! parameter check lives in [`Config::validate`]; the simulation core
//! assumes a validated configuration and performs no re-validation.

use crate::program::Program;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub agents: AgentConfig,
    pub food: FoodConfig,
    pub reproduction: ReproductionConfig,
    pub mutation: MutationConfig,
}

/// Run length and reporting cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of rounds to simulate.
    pub rounds: u64,
    /// Rounds between full per-agent state dumps.
    pub dump_interval: u64,
}

/// Agent lifecycle parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Number of agents placed at the start.
    pub initial_population: usize,
    /// Energy each seeded agent starts with.
    pub starting_energy: f32,
    /// Flat energy overhead charged at the end of every round.
    pub round_cost: f32,
}

/// Food growth and yield.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodConfig {
    /// Energy granted by eating.
    pub energy: f32,
    /// Rounds a grazed cell needs before its food is ready again.
    pub growth_rounds: u32,
}

/// Reproduction gating and energy split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproductionConfig {
    /// Minimum energy before an agent may duplicate.
    pub energy_threshold: f32,
    /// Chance per round that an eligible agent duplicates.
    pub probability: f32,
    /// Fraction of the parent's energy transferred to the child.
    pub parent_fraction: f32,
}

/// Program mutation rates and the instruction alphabet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Chance of appending a fresh instruction.
    pub add_probability: f32,
    /// Chance of dropping the trailing instruction.
    pub remove_probability: f32,
    /// Chance of rewriting one instruction in place.
    pub change_probability: f32,
    /// Symbols mutations may draw from.
    pub alphabet: String,
    /// Program every seeded agent's program is derived from.
    pub seed_program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            agents: AgentConfig::default(),
            food: FoodConfig::default(),
            reproduction: ReproductionConfig::default(),
            mutation: MutationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: 300,
            dump_interval: 25,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_population: 20,
            starting_energy: 16.0,
            round_cost: 0.5,
        }
    }
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            energy: 8.0,
            growth_rounds: 5,
        }
    }
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self {
            energy_threshold: 12.0,
            probability: 0.25,
            parent_fraction: 0.4,
        }
    }
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            add_probability: 0.05,
            remove_probability: 0.05,
            change_probability: 0.1,
            alphabet: "lpiwj".to_string(),
            seed_program: "wii".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.simulation.rounds == 0 {
            return Err("rounds must be > 0".to_string());
        }
        if self.simulation.dump_interval == 0 {
            return Err("dump_interval must be > 0".to_string());
        }
        if self.agents.starting_energy <= 0.0 {
            return Err("starting_energy must be > 0".to_string());
        }
        if self.agents.round_cost < 0.0 {
            return Err("round_cost must be >= 0".to_string());
        }
        if self.food.energy < 0.0 {
            return Err("food energy must be >= 0".to_string());
        }
        if self.food.growth_rounds == 0 {
            return Err("food growth_rounds must be > 0".to_string());
        }
        if self.reproduction.energy_threshold < 0.0 {
            return Err("reproduction energy_threshold must be >= 0".to_string());
        }
        for (name, value) in [
            ("reproduction probability", self.reproduction.probability),
            ("parent_fraction", self.reproduction.parent_fraction),
            ("add_probability", self.mutation.add_probability),
            ("remove_probability", self.mutation.remove_probability),
            ("change_probability", self.mutation.change_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be within [0, 1], got {value}"));
            }
        }

        let alphabet: Program = self
            .mutation
            .alphabet
            .parse()
            .map_err(|e| format!("alphabet: {e}"))?;
        let seed_program: Program = self
            .mutation
            .seed_program
            .parse()
            .map_err(|e| format!("seed_program: {e}"))?;
        for instruction in seed_program.instructions() {
            if !alphabet.instructions().contains(instruction) {
                return Err(format!(
                    "seed_program uses '{}' which is not in the alphabet",
                    instruction.symbol()
                ));
            }
        }
        Ok(())
    }
}
