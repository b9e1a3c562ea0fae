//! Sliding-tile (N-Puzzle) search engine.
//!
//! Builds solvable start boards by random walks from the goal and solves
//! them with depth-first, greedy best-first or A* search under node and
//! wall-clock budgets.

pub mod config;
pub mod error;
pub mod heuristic;
pub mod puzzle;
pub mod scramble;
pub mod search;
pub mod solvability;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use config::{Config, Difficulty};
pub use error::{PuzzleError, Result};
pub use heuristic::{heuristic, Heuristic};
pub use puzzle::{Board, Move};
pub use search::{solve, Algorithm, SearchLimits, SearchResult, Termination};
pub use solvability::is_solvable;

/// Scrambles `goal` with `shuffle_count` random slides from the thread RNG.
pub fn generate_start(goal: &Board, shuffle_count: usize) -> Result<Board> {
    scramble::scramble(goal, shuffle_count, &mut rand::thread_rng())
}

/// Reproducible [`generate_start`].
pub fn generate_start_with(goal: &Board, shuffle_count: usize, seed: u64) -> Result<Board> {
    scramble::scramble(goal, shuffle_count, &mut StdRng::seed_from_u64(seed))
}
