//! Remaining-cost estimates used by the informed search strategies.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PuzzleError, Result};
use crate::puzzle::{Board, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Sum of each tile's row and column distance from its goal cell.
    Manhattan,
    /// Number of tiles not on their goal cell.
    Misplaced,
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "manhattan"),
            Heuristic::Misplaced => write!(f, "misplaced"),
        }
    }
}

/// Goal cell of every tile value, built once per goal.
#[derive(Debug, Clone)]
pub(crate) struct GoalIndex {
    size: usize,
    position: Vec<usize>,
}

impl GoalIndex {
    pub(crate) fn new(goal: &Board) -> Self {
        let mut position = vec![0; goal.tiles().len()];
        for (idx, &tile) in goal.tiles().iter().enumerate() {
            position[tile as usize] = idx;
        }
        Self {
            size: goal.size(),
            position,
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn position_of(&self, tile: Tile) -> usize {
        self.position[tile as usize]
    }
}

impl Heuristic {
    /// Estimates slides left from `board` to the goal behind `index`.
    pub(crate) fn estimate(self, board: &Board, index: &GoalIndex) -> u32 {
        match self {
            Heuristic::Manhattan => manhattan(board, index),
            Heuristic::Misplaced => misplaced(board, index),
        }
    }
}

fn manhattan(board: &Board, index: &GoalIndex) -> u32 {
    let size = index.size();
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != 0)
        .map(|(idx, &tile)| {
            let target = index.position_of(tile);
            let (row, col) = (idx / size, idx % size);
            let (target_row, target_col) = (target / size, target % size);
            (row.abs_diff(target_row) + col.abs_diff(target_col)) as u32
        })
        .sum()
}

fn misplaced(board: &Board, index: &GoalIndex) -> u32 {
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(idx, &tile)| tile != 0 && index.position_of(tile) != idx)
        .count() as u32
}

/// Heuristic value of `board` against `goal`; searches build the goal table once.
pub fn heuristic(board: &Board, goal: &Board, kind: Heuristic) -> Result<u32> {
    if board.size() != goal.size() {
        return Err(PuzzleError::SizeMismatch {
            start: board.size(),
            goal: goal.size(),
        });
    }
    Ok(kind.estimate(board, &GoalIndex::new(goal)))
}
