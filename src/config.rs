//! Run configuration: node and time budgets, the difficulty table and the
//! depth-first size gate.
//!
//! Everything has a default, so a JSON config file only needs the fields it
//! overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::error::{PuzzleError, Result};
use crate::heuristic::Heuristic;
use crate::search::{Algorithm, SearchLimits, DEFAULT_MAX_STEPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", s)
    }
}

/// Scramble length for each difficulty on one board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleMoves {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl ShuffleMoves {
    pub fn get(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Wall-clock budget per algorithm, in seconds. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeLimits {
    pub dfs_secs: Option<f64>,
    pub best_first_secs: Option<f64>,
    pub astar_secs: Option<f64>,
}

impl TimeLimits {
    fn secs_for(&self, algorithm: Algorithm) -> (&'static str, Option<f64>) {
        match algorithm {
            Algorithm::DepthFirst => ("dfs_secs", self.dfs_secs),
            Algorithm::GreedyBestFirst(_) => ("best_first_secs", self.best_first_secs),
            Algorithm::AStar(_) => ("astar_secs", self.astar_secs),
        }
    }

    /// Wall-clock budget for `algorithm`; negative, NaN or overflowing
    /// seconds are rejected.
    pub fn duration_for(&self, algorithm: Algorithm) -> Result<Option<Duration>> {
        let (field, secs) = self.secs_for(algorithm);
        secs.map(|secs| {
            Duration::try_from_secs_f64(secs)
                .map_err(|_| PuzzleError::InvalidTimeLimit { field, secs })
        })
        .transpose()
    }
}

impl Default for TimeLimits {
    fn default() -> Self {
        Self {
            dfs_secs: Some(20.0),
            best_first_secs: Some(60.0),
            astar_secs: Some(120.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_steps: usize,
    pub time_limits: TimeLimits,
    /// Board size to scramble lengths.
    pub shuffle: BTreeMap<usize, ShuffleMoves>,
    /// Largest board on which depth-first search is allowed.
    pub dfs_max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        let shuffle = BTreeMap::from([
            (3, ShuffleMoves { easy: 10, medium: 20, hard: 50 }),
            (4, ShuffleMoves { easy: 30, medium: 80, hard: 120 }),
            (5, ShuffleMoves { easy: 80, medium: 160, hard: 300 }),
        ]);
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            time_limits: TimeLimits::default(),
            shuffle,
            dfs_max_size: 3,
        }
    }
}

impl Config {
    /// Reads a JSON config, filling missing fields with defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for algorithm in [
            Algorithm::DepthFirst,
            Algorithm::GreedyBestFirst(Heuristic::Manhattan),
            Algorithm::AStar(Heuristic::Manhattan),
        ] {
            self.time_limits.duration_for(algorithm)?;
        }
        Ok(())
    }

    pub fn shuffle_moves(&self, size: usize, difficulty: Difficulty) -> Result<usize> {
        self.shuffle
            .get(&size)
            .map(|moves| moves.get(difficulty))
            .ok_or(PuzzleError::UnsupportedSize(size))
    }

    /// Rejects depth-first search on boards larger than `dfs_max_size`.
    ///
    /// The engine itself runs any algorithm on any size; this gate is for
    /// callers picking a configuration.
    pub fn check_algorithm(&self, algorithm: Algorithm, size: usize) -> Result<()> {
        if algorithm == Algorithm::DepthFirst && size > self.dfs_max_size {
            return Err(PuzzleError::AlgorithmNotPermitted {
                algorithm: algorithm.to_string(),
                size,
                limit: self.dfs_max_size,
            });
        }
        Ok(())
    }

    pub fn limits_for(&self, algorithm: Algorithm) -> Result<SearchLimits> {
        Ok(SearchLimits {
            time_limit: self.time_limits.duration_for(algorithm)?,
            max_steps: self.max_steps,
        })
    }
}
