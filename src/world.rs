//! World simulation engine - board, agent arena, and the round loop.

use crate::agent::{Agent, AgentId, Heading};
use crate::cell::{Cell, Coord};
use crate::config::{Config, MutationConfig};
use crate::layout::BoardLayout;
use crate::program::{Instruction, Program};
use crate::stats::RoundStats;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// The simulation world: a toroidal board of cells and the agents on it.
///
/// Cells hold agent ids; the agents themselves live in the world's arena.
/// One round is `advance_round` followed by `refresh_and_collect_stats`;
/// the refresh also snapshots every cell's round-start count, so it must
/// run once after seeding and once after every round.
pub struct World {
    rows: usize,
    cols: usize,
    /// Row-major cell storage.
    cells: Vec<Cell>,

    /// Agent arena; cells reference into it by id.
    agents: HashMap<AgentId, Agent>,
    next_agent_id: AgentId,

    /// Rounds completed so far.
    pub round: u64,
    pub stats: RoundStats,
    pub config: Config,

    seed_program: Program,
    alphabet: Vec<Instruction>,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl World {
    /// Create a new world with a random seed.
    pub fn new(layout: &BoardLayout, config: Config) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(layout, config, seed)
    }

    /// Create a new world with a specific seed for reproducibility.
    ///
    /// The configuration must already be validated; an undecodable seed
    /// program or alphabet here is an invariant violation and halts.
    pub fn new_with_seed(layout: &BoardLayout, config: Config, seed: u64) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);

        let mut cells = Vec::with_capacity(layout.rows() * layout.cols());
        for row in 0..layout.rows() {
            for col in 0..layout.cols() {
                let coord = Coord { row, col };
                cells.push(if layout.has_food_at(row, col) {
                    Cell::with_food(coord)
                } else {
                    Cell::empty(coord)
                });
            }
        }

        let seed_program: Program = config
            .mutation
            .seed_program
            .parse()
            .unwrap_or_else(|err| panic!("configuration was not validated: {err}"));
        let alphabet: Vec<Instruction> = config
            .mutation
            .alphabet
            .parse::<Program>()
            .unwrap_or_else(|err| panic!("configuration was not validated: {err}"))
            .instructions()
            .to_vec();

        World {
            rows: layout.rows(),
            cols: layout.cols(),
            cells,
            agents: HashMap::new(),
            next_agent_id: 0,
            round: 0,
            stats: RoundStats::new(),
            config,
            seed_program,
            alphabet,
            rng,
            seed,
        }
    }

    /// Get the seed used for this run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get current population count.
    pub fn population(&self) -> usize {
        self.agents.len()
    }

    /// Check if the population has died out.
    pub fn is_extinct(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[coord.row * self.cols + coord.col]
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        &mut self.cells[coord.row * self.cols + coord.col]
    }

    /// The adjacent coordinate in a heading. Both axes wrap, so every cell
    /// has four neighbors; on a one-cell axis a cell neighbors itself.
    pub fn neighbor(&self, from: Coord, heading: Heading) -> Coord {
        let Coord { row, col } = from;
        match heading {
            Heading::North => Coord {
                row: if row == 0 { self.rows - 1 } else { row - 1 },
                col,
            },
            Heading::South => Coord {
                row: if row + 1 == self.rows { 0 } else { row + 1 },
                col,
            },
            Heading::East => Coord {
                row,
                col: if col + 1 == self.cols { 0 } else { col + 1 },
            },
            Heading::West => Coord {
                row,
                col: if col == 0 { self.cols - 1 } else { col - 1 },
            },
        }
    }

    /// Bernoulli draw from the world's random stream.
    pub(crate) fn chance(&mut self, probability: f32) -> bool {
        self.rng.gen::<f32>() < probability
    }

    /// Mutate a program against this world's alphabet and random stream.
    pub(crate) fn mutate_program(&mut self, parent: &Program, rates: &MutationConfig) -> Program {
        parent.mutate(&self.alphabet, rates, &mut self.rng)
    }

    /// Add an agent to the arena and the front of its cell's membership
    /// list, without food interaction. Returns the new agent's id.
    pub(crate) fn spawn(&mut self, agent: Agent) -> AgentId {
        let id = self.next_agent_id;
        self.next_agent_id += 1;
        self.cell_mut(agent.coord).place(id);
        self.agents.insert(id, agent);
        id
    }

    /// Place the initial population: uniformly-random cells (with
    /// replacement), each agent carrying a fresh mutation of the seed
    /// program, the starting energy, and a random heading.
    pub fn seed_population(&mut self) {
        let config = self.config.clone();
        let seed_program = self.seed_program.clone();

        for _ in 0..config.agents.initial_population {
            let row = self.rng.gen_range(0..self.rows);
            let col = self.rng.gen_range(0..self.cols);
            let program = self.mutate_program(&seed_program, &config.mutation);
            let heading = Heading::ALL[self.rng.gen_range(0..4)];

            self.spawn(Agent {
                program,
                heading,
                energy: config.agents.starting_energy,
                age: 0,
                coord: Coord { row, col },
            });
        }

        log::debug!(
            "seeded {} agents on a {}x{} board",
            config.agents.initial_population,
            self.rows,
            self.cols
        );
    }

    /// Run one round: every cell in row-major order processes the agents it
    /// held at round start, then the round counter advances.
    pub fn advance_round(&mut self) {
        let config = self.config.clone();
        for index in 0..self.cells.len() {
            self.run_cell_round(index, &config);
        }
        self.round += 1;
    }

    /// Process one cell's round-start agents, oldest arrival first.
    ///
    /// Agents are taken off the tail of the membership list while newcomers
    /// (movers, newborns) join at the front, so each agent present at round
    /// start is visited exactly once no matter how membership changes
    /// mid-round. A survivor that is still in this cell and was not already
    /// re-inserted by its own movement goes back on the front; a casualty is
    /// released from whichever cell it died in.
    fn run_cell_round(&mut self, index: usize, config: &Config) {
        let coord = self.cells[index].coord();
        let budget = self.cells[index].round_start_count();

        for _ in 0..budget {
            let id = self.cells[index].take_oldest().unwrap_or_else(|| {
                panic!(
                    "cell ({}, {}) round-start snapshot exceeds its membership",
                    coord.row, coord.col
                )
            });
            let mut agent = self
                .agents
                .remove(&id)
                .unwrap_or_else(|| panic!("agent {id} is missing from the arena"));

            if agent.try_survive_round(id, config, self) {
                if agent.coord == coord && self.cells[index].newest() != Some(id) {
                    self.cells[index].place(id);
                }
                self.agents.insert(id, agent);
            } else {
                let at = agent.coord;
                self.cell_mut(at).release(id);
            }
        }
    }

    /// Prepare the next round and rebuild the aggregates: every cell in
    /// row-major order snapshots its round-start count and advances its food
    /// growth, then folds its current occupants into the stats.
    pub fn refresh_and_collect_stats(&mut self) {
        let growth_rounds = self.config.food.growth_rounds;
        self.stats.reset(self.round);

        for cell in &mut self.cells {
            cell.snapshot_round_start();
            cell.update_food(growth_rounds);
            self.stats.observe_cell(cell.occupant_count(), cell.has_food());
            for id in cell.members() {
                let agent = self
                    .agents
                    .get(&id)
                    .unwrap_or_else(|| panic!("agent {id} is missing from the arena"));
                self.stats
                    .observe_agent(agent.program.len() as f32, agent.energy, agent.age as f32);
            }
        }
    }

    /// Run several rounds back to back. Call only on a world that has been
    /// seeded and refreshed once, the way the driver does.
    pub fn run(&mut self, rounds: u64) {
        for _ in 0..rounds {
            self.advance_round();
            self.refresh_and_collect_stats();
        }
    }

    /// Render the full per-agent state dump: every living agent, row-major
    /// by cell and newest-arrival-first within a cell.
    pub fn state_report(&self) -> String {
        let rule = "-".repeat(86);
        let mut lines = Vec::with_capacity(self.agents.len() + 3);
        lines.push(format!("SIMULATION STATE (round {})", self.round));
        lines.push(rule.clone());
        for cell in &self.cells {
            for id in cell.members() {
                let agent = self
                    .agents
                    .get(&id)
                    .unwrap_or_else(|| panic!("agent {id} is missing from the arena"));
                lines.push(agent.to_string());
            }
        }
        lines.push(rule);
        lines.join("\n")
    }
}
