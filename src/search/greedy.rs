//! Greedy best-first search ordered by the heuristic alone.

use log::trace;
use rustc_hash::FxHashSet;

use super::{Arena, Budget, PriorityFrontier, SearchLimits, SearchResult, Termination};
use crate::heuristic::{GoalIndex, Heuristic};
use crate::puzzle::Board;

pub(super) fn search(
    start: &Board,
    goal: &Board,
    heuristic: Heuristic,
    limits: SearchLimits,
) -> SearchResult {
    let mut budget = Budget::start(limits);
    let index = GoalIndex::new(goal);
    let mut arena = Arena::default();
    let mut visited: FxHashSet<Board> = FxHashSet::default();
    let mut frontier = PriorityFrontier::default();

    let root = arena.insert(start.clone(), None, 0);
    frontier.push((heuristic.estimate(start, &index), 0), root);

    while let Some(id) = frontier.pop() {
        if let Some(stop) = budget.check(frontier.len()) {
            return budget.finish(stop, None);
        }

        let board = arena.board(id);
        if board == goal {
            trace!("best-first generated {} nodes", arena.len());
            return budget.finish(Termination::Solved, Some(arena.path_to(id)));
        }
        if !visited.insert(board.clone()) {
            continue;
        }

        let neighbors = board.neighbors();
        let depth = arena.depth(id) + 1;
        for next in neighbors {
            if visited.contains(&next) {
                continue;
            }
            let h = heuristic.estimate(&next, &index);
            let child = arena.insert(next, Some(id), depth);
            frontier.push((h, 0), child);
        }
    }

    budget.finish(Termination::Exhausted, None)
}
