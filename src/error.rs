//! Error types for the N-Puzzle engine.
//!
//! Search outcomes such as running out of time or nodes are not errors; they
//! are reported through [`crate::search::Termination`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("invalid board size {0} (expected 2..={max})", max = crate::puzzle::MAX_SIZE)]
    InvalidSize(usize),

    #[error("invalid tiles: {0}")]
    InvalidTiles(String),

    #[error("board size mismatch: start is {start}x{start}, goal is {goal}x{goal}")]
    SizeMismatch { start: usize, goal: usize },

    #[error("scrambled board is not solvable (neighbor generation is broken)")]
    UnsolvableScramble,

    #[error("no shuffle table entry for a {0}x{0} board")]
    UnsupportedSize(usize),

    #[error("{algorithm} is not permitted on a {size}x{size} board (limit is {limit}x{limit})")]
    AlgorithmNotPermitted {
        algorithm: String,
        size: usize,
        limit: usize,
    },

    #[error("invalid time limit for {field}: {secs} seconds")]
    InvalidTimeLimit { field: &'static str, secs: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
