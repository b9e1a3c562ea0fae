//! Goal-anchored random walks producing solvable start boards.

use log::{debug, error};
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

use crate::error::{PuzzleError, Result};
use crate::puzzle::{Board, Move};
use crate::solvability::is_solvable;

/// Walks `move_count` random slides away from `goal`.
///
/// A step never undoes the previous one unless that is the only option. The
/// result is solvable because every step is reversible; the final check only
/// guards neighbor generation.
pub fn scramble<R: Rng + ?Sized>(goal: &Board, move_count: usize, rng: &mut R) -> Result<Board> {
    let (board, _) = random_walk(goal, move_count, rng)?;

    if !is_solvable(&board, goal) {
        error!("scramble of {} moves produced an unsolvable board:\n{}", move_count, board);
        return Err(PuzzleError::UnsolvableScramble);
    }

    debug!("scrambled {}x{} board with {} moves", goal.size(), goal.size(), move_count);
    Ok(board)
}

fn random_walk<R: Rng + ?Sized>(
    goal: &Board,
    move_count: usize,
    rng: &mut R,
) -> Result<(Board, Vec<Move>)> {
    let mut current = goal.clone();
    let mut moves: Vec<Move> = Vec::with_capacity(move_count);

    for _ in 0..move_count {
        let successors = current.successors();
        let undo = moves.last().map(Move::opposite);
        let forward: SmallVec<[&(Move, Board); 4]> = successors
            .iter()
            .filter(|(mv, _)| Some(*mv) != undo)
            .collect();

        let step = if forward.is_empty() {
            successors.choose(rng)
        } else {
            forward.choose(rng).copied()
        };
        let (mv, next) = step
            .ok_or_else(|| PuzzleError::InvariantViolation("board has no neighbors".to_string()))?
            .clone();

        moves.push(mv);
        current = next;
    }

    Ok((current, moves))
}
