//! # GRAZERS
//!
//! Artificial-life simulator: program-driven grazers on a toroidal board.
//!
//! ## Features
//!
//! - **Programs**: each agent carries a small instruction string that turns,
//!   steps, sniffs, and grazes
//! - **Evolvable**: programs mutate on reproduction (append, drop, rewrite)
//! - **Configurable**: YAML configuration files, plain-text board layouts
//! - **Reproducible**: seeded random number generation, deterministic rounds
//!
//! ## Quick Start
//!
//! ```rust
//! use grazers::{BoardLayout, Config, World};
//!
//! let layout: BoardLayout = "x  \n  x".parse().unwrap();
//! let mut world = World::new_with_seed(&layout, Config::default(), 42);
//!
//! world.seed_population();
//! world.refresh_and_collect_stats();
//! for _ in 0..100 {
//!     world.advance_round();
//!     world.refresh_and_collect_stats();
//! }
//!
//! println!("{}", world.stats.summary());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use grazers::Config;
//!
//! let mut config = Config::default();
//! config.agents.initial_population = 50;
//! config.mutation.change_probability = 0.2;
//! ```

pub mod agent;
pub mod cell;
pub mod config;
pub mod layout;
pub mod program;
pub mod stats;
pub mod world;

// Re-export main types
pub use agent::{Agent, AgentId, Heading};
pub use cell::{Cell, CellKind, Coord};
pub use config::Config;
pub use layout::BoardLayout;
pub use program::{Instruction, Program};
pub use stats::{RoundStats, StatsHistory, StatsSnapshot};
pub use world::World;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_quick_simulation() {
        let layout: BoardLayout = "x   \n  x \nx   ".parse().unwrap();
        let mut world = World::new_with_seed(&layout, Config::default(), 1);

        world.seed_population();
        world.refresh_and_collect_stats();
        world.run(100);

        assert_eq!(world.round, 100);
    }
}
