//! Depth-first search with a LIFO stack.

use log::trace;
use rustc_hash::FxHashSet;

use super::{Arena, Budget, SearchLimits, SearchResult, Termination};
use crate::puzzle::Board;

/// Explores the most recently generated board first.
///
/// Each board is expanded at most once. Neighbors are pushed in
/// up, down, left, right order, so the last of them is explored first.
pub(super) fn search(start: &Board, goal: &Board, limits: SearchLimits) -> SearchResult {
    let mut budget = Budget::start(limits);
    let mut arena = Arena::default();
    let mut visited: FxHashSet<Board> = FxHashSet::default();
    let mut stack = vec![arena.insert(start.clone(), None, 0)];

    while let Some(id) = stack.pop() {
        if let Some(stop) = budget.check(stack.len()) {
            return budget.finish(stop, None);
        }

        let board = arena.board(id);
        if board == goal {
            trace!("dfs generated {} nodes", arena.len());
            return budget.finish(Termination::Solved, Some(arena.path_to(id)));
        }
        if !visited.insert(board.clone()) {
            continue;
        }

        let neighbors = board.neighbors();
        let depth = arena.depth(id) + 1;
        for next in neighbors {
            if !visited.contains(&next) {
                stack.push(arena.insert(next, Some(id), depth));
            }
        }
    }

    budget.finish(Termination::Exhausted, None)
}
