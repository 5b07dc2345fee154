//! Statistics tracking for the simulation.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Running min/max/sum fold over one population metric.
#[derive(Debug, Clone)]
pub struct MetricRange {
    min: f32,
    max: f32,
    sum: f32,
    count: usize,
}

impl Default for MetricRange {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricRange {
    pub fn new() -> Self {
        MetricRange {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            sum: 0.0,
            count: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = MetricRange::new();
    }

    pub fn record(&mut self, value: f32) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
        self.sum += value;
        self.count += 1;
    }

    /// Minimum recorded value, or 0 when nothing was recorded.
    pub fn min(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.min
        }
    }

    /// Maximum recorded value, or 0 when nothing was recorded.
    pub fn max(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.max
        }
    }

    pub fn sum(&self) -> f32 {
        self.sum
    }

    pub fn mean(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f32
        }
    }

    fn summarize(&self) -> MetricSummary {
        MetricSummary {
            min: self.min(),
            mean: self.mean(),
            max: self.max(),
        }
    }
}

/// Aggregate statistics for one round.
#[derive(Debug, Clone, Default)]
pub struct RoundStats {
    /// Round the aggregates were collected after.
    pub round: u64,
    /// Live agents on the whole board.
    pub population: usize,
    /// Cells whose food is currently ready.
    pub food_cells: usize,
    pub program_len: MetricRange,
    pub energy: MetricRange,
    pub age: MetricRange,
}

impl RoundStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the aggregates for a fresh collection pass.
    pub fn reset(&mut self, round: u64) {
        self.round = round;
        self.population = 0;
        self.food_cells = 0;
        self.program_len.reset();
        self.energy.reset();
        self.age.reset();
    }

    pub fn observe_cell(&mut self, occupants: usize, has_food: bool) {
        self.population += occupants;
        if has_food {
            self.food_cells += 1;
        }
    }

    pub fn observe_agent(&mut self, program_len: f32, energy: f32, age: f32) {
        self.program_len.record(program_len);
        self.energy.record(energy);
        self.age.record(age);
    }

    /// Format the round's aggregates as a one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "R:{:5} | Pop:{:5} | Food:{:4} | len:{:.2}/{:.2}/{:.2} | energy:{:.2}/{:.2}/{:.2} | age:{:.2}/{:.2}/{:.2}",
            self.round,
            self.population,
            self.food_cells,
            self.program_len.min(),
            self.program_len.mean(),
            self.program_len.max(),
            self.energy.min(),
            self.energy.mean(),
            self.energy.max(),
            self.age.min(),
            self.age.mean(),
            self.age.max(),
        )
    }

    /// Freeze the aggregates into a serializable record.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            round: self.round,
            population: self.population,
            food_cells: self.food_cells,
            program_len: self.program_len.summarize(),
            energy: self.energy.summarize(),
            age: self.age.summarize(),
        }
    }
}

/// Min/mean/max triple of one metric, frozen for export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub min: f32,
    pub mean: f32,
    pub max: f32,
}

/// One frozen [`RoundStats`] record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub round: u64,
    pub population: usize,
    pub food_cells: usize,
    pub program_len: MetricSummary,
    pub energy: MetricSummary,
    pub age: MetricSummary,
}

/// Historical statistics series for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    pub snapshots: Vec<StatsSnapshot>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, snapshot: StatsSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Population over time.
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.round, s.population))
            .collect()
    }

    /// Save the history to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load a history from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_range_folds_min_mean_max() {
        let mut range = MetricRange::new();
        for value in [4.0, 1.0, 7.0] {
            range.record(value);
        }
        assert_eq!(range.min(), 1.0);
        assert_eq!(range.max(), 7.0);
        assert_eq!(range.mean(), 4.0);
        assert_eq!(range.sum(), 12.0);
    }

    #[test]
    fn empty_metric_range_reports_zeros() {
        let range = MetricRange::new();
        assert_eq!(range.min(), 0.0);
        assert_eq!(range.max(), 0.0);
        assert_eq!(range.mean(), 0.0);
    }

    #[test]
    fn round_stats_aggregate_cells_and_agents() {
        let mut stats = RoundStats::new();
        stats.reset(3);
        stats.observe_cell(2, true);
        stats.observe_cell(1, false);
        stats.observe_agent(4.0, 10.0, 1.0);
        stats.observe_agent(2.0, 6.0, 5.0);

        assert_eq!(stats.round, 3);
        assert_eq!(stats.population, 3);
        assert_eq!(stats.food_cells, 1);
        assert_eq!(stats.energy.min(), 6.0);
        assert_eq!(stats.energy.max(), 10.0);
        assert_eq!(stats.age.mean(), 3.0);
    }

    #[test]
    fn summary_reports_all_metrics() {
        let mut stats = RoundStats::new();
        stats.reset(1);
        stats.observe_cell(1, true);
        stats.observe_agent(3.0, 9.0, 2.0);

        let line = stats.summary();
        assert!(line.contains("Pop:"));
        assert!(line.contains("Food:"));
        assert!(line.contains("len:3.00/3.00/3.00"));
        assert!(line.contains("energy:9.00/9.00/9.00"));
        assert!(line.contains("age:2.00/2.00/2.00"));
    }

    #[test]
    fn history_records_and_serializes() {
        let mut history = StatsHistory::new();
        let mut stats = RoundStats::new();
        for round in 1..=4 {
            stats.reset(round);
            stats.observe_cell(round as usize, false);
            history.record(stats.snapshot());
        }

        assert_eq!(history.len(), 4);
        assert_eq!(history.population_series()[3], (4, 4));

        let json = serde_json::to_string(&history).unwrap();
        let loaded: StatsHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.len(), 4);
    }
}
