//! Board layout loading.
//!
//! A board file is a rectangle of characters, one row per line: `'x'` marks
//! a food-bearing cell, `' '` an empty one. Anything else, ragged rows, or
//! an empty file is rejected here, before the simulation sees the board.

use std::path::Path;
use std::str::FromStr;

pub const FOOD_MARKER: char = 'x';
pub const EMPTY_MARKER: char = ' ';

/// A validated rectangular board description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    rows: usize,
    cols: usize,
    food: Vec<bool>,
}

impl BoardLayout {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn has_food_at(&self, row: usize, col: usize) -> bool {
        self.food[row * self.cols + col]
    }

    /// Number of food-bearing cells in the layout.
    pub fn food_cell_count(&self) -> usize {
        self.food.iter().filter(|&&f| f).count()
    }

    /// Load a layout from a text file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let layout = contents.parse()?;
        Ok(layout)
    }
}

impl FromStr for BoardLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = 0;
        let mut cols = 0;
        let mut food = Vec::new();

        for (index, line) in s.lines().enumerate() {
            let width = line.chars().count();
            if index == 0 {
                cols = width;
            } else if width != cols {
                return Err(format!(
                    "row {} is {} cells wide, expected {}",
                    index + 1,
                    width,
                    cols
                ));
            }

            for symbol in line.chars() {
                match symbol {
                    FOOD_MARKER => food.push(true),
                    EMPTY_MARKER => food.push(false),
                    other => {
                        return Err(format!(
                            "unrecognized board character {other:?} in row {}",
                            index + 1
                        ))
                    }
                }
            }
            rows += 1;
        }

        if rows == 0 || cols == 0 {
            return Err("board must have at least one row and one column".to_string());
        }

        Ok(BoardLayout { rows, cols, food })
    }
}
