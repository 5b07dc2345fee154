//! Agents and their per-round behavior.

use crate::cell::Coord;
use crate::config::Config;
use crate::program::{Instruction, Program};
use crate::world::World;
use std::fmt;

/// Unique agent identifier, the handle cells keep in their membership lists.
pub type AgentId = u64;

/// The four cardinal headings an agent can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// All headings, in the fixed scan priority order (North first,
    /// clockwise).
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Rotate 90 degrees counter-clockwise.
    pub fn left(self) -> Heading {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// Rotate 90 degrees clockwise.
    pub fn right(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// Rotate 180 degrees.
    pub fn reversed(self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::South => Heading::North,
            Heading::East => Heading::West,
            Heading::West => Heading::East,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::North => "North",
            Heading::East => "East",
            Heading::South => "South",
            Heading::West => "West",
        };
        write!(f, "{name}")
    }
}

/// An agent on the board.
///
/// The `coord` field is a handle to the cell the agent stands on; the cell's
/// membership list is the authoritative record, owned by the world.
#[derive(Debug, Clone)]
pub struct Agent {
    pub program: Program,
    pub heading: Heading,
    /// Signed on purpose: `-1.0` is the terminal death marker.
    pub energy: f32,
    pub age: u32,
    pub coord: Coord,
}

impl Agent {
    /// Live through one round: maybe duplicate, run the program, pay the
    /// round overhead, grow older. Returns whether the agent survived.
    ///
    /// A child spawned here joins the same cell at the front of its list and
    /// outside the round-start snapshot, so it acts for the first time next
    /// round.
    pub fn try_survive_round(&mut self, id: AgentId, config: &Config, world: &mut World) -> bool {
        if self.energy >= config.reproduction.energy_threshold
            && world.chance(config.reproduction.probability)
        {
            let child = self.duplicate(config, world);
            world.spawn(child);
        }
        self.execute_program(id, config, world);
        self.age += 1;
        self.energy >= 0.0
    }

    /// Split off a child carrying a mutated copy of this program and
    /// `parent_fraction` of this agent's energy, facing the other way.
    fn duplicate(&mut self, config: &Config, world: &mut World) -> Agent {
        let child = Agent {
            program: world.mutate_program(&self.program, &config.mutation),
            heading: self.heading.reversed(),
            energy: config.reproduction.parent_fraction * self.energy,
            age: 0,
            coord: self.coord,
        };
        self.energy *= 1.0 - config.reproduction.parent_fraction;
        child
    }

    /// Run the program one instruction at a time. Each instruction costs one
    /// energy; running out mid-program marks the agent dead (`energy = -1`)
    /// and skips the rest. The flat round cost is charged afterwards under
    /// the same rule.
    fn execute_program(&mut self, id: AgentId, config: &Config, world: &mut World) {
        for at in 0..self.program.len() {
            if self.energy > 0.0 {
                let instruction = self.program.instructions()[at];
                self.perform(instruction, id, config, world);
            } else {
                self.energy = -1.0;
                break;
            }
        }

        if self.energy < config.agents.round_cost {
            self.energy = -1.0;
        } else {
            self.energy -= config.agents.round_cost;
        }
    }

    fn perform(&mut self, instruction: Instruction, id: AgentId, config: &Config, world: &mut World) {
        match instruction {
            Instruction::TurnLeft => self.heading = self.heading.left(),
            Instruction::TurnRight => self.heading = self.heading.right(),
            Instruction::MoveForward => self.step_forward(id, config, world),
            Instruction::Sniff => self.sniff(world),
            Instruction::Eat => self.seek_food(id, config, world),
        }
        self.energy -= 1.0;
    }

    /// Step onto the adjacent cell in the current heading.
    fn step_forward(&mut self, id: AgentId, config: &Config, world: &mut World) {
        let dest = world.neighbor(self.coord, self.heading);
        self.enter(id, dest, config, world);
    }

    /// Turn toward the first food-ready cardinal neighbor, checked in fixed
    /// priority order. No movement; no match leaves the heading unchanged.
    fn sniff(&mut self, world: &World) {
        for heading in Heading::ALL {
            if world.cell(world.neighbor(self.coord, heading)).has_food() {
                self.heading = heading;
                return;
            }
        }
    }

    /// Scan the surroundings clockwise from North, cardinal neighbors
    /// interleaved with their two-hop composites (N, N+E, E, E+S, S, S+W,
    /// W, W+N), and move straight onto the first food-ready cell found.
    /// The two-hop entries really do cross two cells in one instruction.
    fn seek_food(&mut self, id: AgentId, config: &Config, world: &mut World) {
        let north = world.neighbor(self.coord, Heading::North);
        let east = world.neighbor(self.coord, Heading::East);
        let south = world.neighbor(self.coord, Heading::South);
        let west = world.neighbor(self.coord, Heading::West);
        let scan = [
            north,
            world.neighbor(north, Heading::East),
            east,
            world.neighbor(east, Heading::South),
            south,
            world.neighbor(south, Heading::West),
            west,
            world.neighbor(west, Heading::North),
        ];

        for dest in scan {
            if world.cell(dest).has_food() {
                self.enter(id, dest, config, world);
                return;
            }
        }
    }

    /// Transfer this agent between membership lists: leave the current cell,
    /// be accepted by the destination (eating its food if ready), and point
    /// the coordinate handle at the new cell.
    fn enter(&mut self, id: AgentId, dest: Coord, config: &Config, world: &mut World) {
        world.cell_mut(self.coord).release(id);
        world.cell_mut(dest).accept(id, self, config.food.energy);
        self.coord = dest;
    }

    /// Take in food energy, saturating instead of overflowing.
    pub fn gain_food_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(f32::MAX);
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "agent {{ heading: {}, program: \"{}\", energy: {:.2}, age: {}, row: {}, col: {} }}",
            self.heading,
            self.program,
            self.energy,
            self.age,
            self.coord.row + 1,
            self.coord.col + 1,
        )
    }
}
