//! Agent programs and their mutation operator.

use crate::config::MutationConfig;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// A single program instruction.
///
/// The canonical symbols are `l` (turn left), `p` (turn right), `i` (step
/// forward), `w` (sniff for food), `j` (seek food and jump onto it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    TurnLeft,
    TurnRight,
    MoveForward,
    Sniff,
    Eat,
}

impl Instruction {
    /// The character this instruction is written as in configs and reports.
    pub const fn symbol(self) -> char {
        match self {
            Instruction::TurnLeft => 'l',
            Instruction::TurnRight => 'p',
            Instruction::MoveForward => 'i',
            Instruction::Sniff => 'w',
            Instruction::Eat => 'j',
        }
    }

    /// Decode a symbol, or `None` if it is not a recognized instruction.
    pub fn from_symbol(symbol: char) -> Option<Instruction> {
        match symbol {
            'l' => Some(Instruction::TurnLeft),
            'p' => Some(Instruction::TurnRight),
            'i' => Some(Instruction::MoveForward),
            'w' => Some(Instruction::Sniff),
            'j' => Some(Instruction::Eat),
            _ => None,
        }
    }
}

/// An immutable, ordered sequence of instructions.
///
/// Programs are values: two programs with equal sequences are
/// interchangeable. A program is never edited in place; [`Program::mutate`]
/// always builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program(Vec<Instruction>);

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Program(instructions)
    }

    pub fn empty() -> Self {
        Program(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.0
    }

    /// Derive a descendant program.
    ///
    /// Three independent draws decide the mutation: `remove` (only sampled
    /// for non-empty parents), `add`, and `change`, in that fixed order.
    /// The order is part of the deterministic random-stream contract.
    ///
    /// The copy keeps the parent's symbols up to but excluding the last one;
    /// the tail is then rebuilt: `add`+`remove` replaces the final slot with
    /// a fresh random symbol, `add` alone re-appends the parent's last symbol
    /// followed by a fresh one, `remove` alone drops the slot, and neither
    /// re-appends the parent's last symbol unchanged. The final slot is
    /// therefore rewritten on every mutation, even a net-neutral one.
    ///
    /// `change` then overwrites one uniformly-random position with a fresh
    /// random symbol. An empty alphabet short-circuits to an empty program.
    pub fn mutate<R: Rng>(
        &self,
        alphabet: &[Instruction],
        rates: &MutationConfig,
        rng: &mut R,
    ) -> Program {
        if alphabet.is_empty() {
            return Program::empty();
        }

        let len = self.0.len();
        let remove = len > 0 && rng.gen::<f32>() < rates.remove_probability;
        let add = rng.gen::<f32>() < rates.add_probability;
        let change = rng.gen::<f32>() < rates.change_probability;

        let mut next: Vec<Instruction> = Vec::with_capacity(len + 1);
        next.extend_from_slice(&self.0[..len.saturating_sub(1)]);

        match (add, remove) {
            (true, true) => next.push(random_symbol(alphabet, rng)),
            (true, false) => {
                if let Some(&last) = self.0.last() {
                    next.push(last);
                }
                next.push(random_symbol(alphabet, rng));
            }
            (false, true) => {}
            (false, false) => {
                if let Some(&last) = self.0.last() {
                    next.push(last);
                }
            }
        }

        if change && !next.is_empty() {
            let at = rng.gen_range(0..next.len());
            next[at] = random_symbol(alphabet, rng);
        }

        Program(next)
    }
}

/// Uniform draw over the alphabet. Repeated symbols weight the draw, as
/// configured.
fn random_symbol<R: Rng>(alphabet: &[Instruction], rng: &mut R) -> Instruction {
    if alphabet.is_empty() {
        panic!("random instruction requested from an empty alphabet");
    }
    alphabet[rng.gen_range(0..alphabet.len())]
}

impl FromStr for Program {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| {
                Instruction::from_symbol(c)
                    .ok_or_else(|| format!("unrecognized instruction symbol '{c}'"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Program)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.0 {
            write!(f, "{}", instruction.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MutationConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rates(add: f32, remove: f32, change: f32) -> MutationConfig {
        MutationConfig {
            add_probability: add,
            remove_probability: remove,
            change_probability: change,
            ..MutationConfig::default()
        }
    }

    fn alphabet() -> Vec<Instruction> {
        "lpiwj".parse::<Program>().unwrap().instructions().to_vec()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn parse_and_display_roundtrip() {
        let program: Program = "lpiwj".parse().unwrap();
        assert_eq!(program.len(), 5);
        assert_eq!(program.to_string(), "lpiwj");
    }

    #[test]
    fn parse_rejects_unknown_symbol() {
        assert!("lpq".parse::<Program>().is_err());
    }

    #[test]
    fn zero_rates_yield_identical_program() {
        let mut rng = rng();
        for source in ["", "i", "lpiwj", "wwjji"] {
            let parent: Program = source.parse().unwrap();
            let child = parent.mutate(&alphabet(), &rates(0.0, 0.0, 0.0), &mut rng);
            assert_eq!(child, parent);
        }
    }

    #[test]
    fn add_appends_one_symbol() {
        let mut rng = rng();
        let parent: Program = "lpiw".parse().unwrap();
        for _ in 0..50 {
            let child = parent.mutate(&alphabet(), &rates(1.0, 0.0, 0.0), &mut rng);
            assert_eq!(child.len(), parent.len() + 1);
            assert_eq!(&child.instructions()[..4], parent.instructions());
        }
    }

    #[test]
    fn remove_drops_the_last_symbol() {
        let mut rng = rng();
        let parent: Program = "lpiw".parse().unwrap();
        let child = parent.mutate(&alphabet(), &rates(0.0, 1.0, 0.0), &mut rng);
        assert_eq!(child.len(), 3);
        assert_eq!(child.instructions(), &parent.instructions()[..3]);
    }

    #[test]
    fn add_and_remove_replace_the_tail() {
        let mut rng = rng();
        let parent: Program = "lpiw".parse().unwrap();
        for _ in 0..50 {
            let child = parent.mutate(&alphabet(), &rates(1.0, 1.0, 0.0), &mut rng);
            assert_eq!(child.len(), parent.len());
            assert_eq!(&child.instructions()[..3], &parent.instructions()[..3]);
        }
    }

    #[test]
    fn change_rewrites_at_most_one_position() {
        let mut rng = rng();
        let parent: Program = "lllll".parse().unwrap();
        for _ in 0..50 {
            let child = parent.mutate(&alphabet(), &rates(0.0, 0.0, 1.0), &mut rng);
            assert_eq!(child.len(), parent.len());
            let differing = child
                .instructions()
                .iter()
                .zip(parent.instructions())
                .filter(|(a, b)| a != b)
                .count();
            assert!(differing <= 1);
        }
    }

    #[test]
    fn empty_parent_can_only_grow_by_add() {
        let mut rng = rng();
        let parent = Program::empty();
        let grown = parent.mutate(&alphabet(), &rates(1.0, 1.0, 0.0), &mut rng);
        assert_eq!(grown.len(), 1);
        let unchanged = parent.mutate(&alphabet(), &rates(0.0, 1.0, 1.0), &mut rng);
        assert!(unchanged.is_empty());
    }

    #[test]
    fn empty_alphabet_always_yields_empty_program() {
        let mut rng = rng();
        let parent: Program = "lpiw".parse().unwrap();
        let child = parent.mutate(&[], &rates(1.0, 1.0, 1.0), &mut rng);
        assert!(child.is_empty());
    }
}
