//! A* search ordered by `f = g + h`.

use log::trace;
use rustc_hash::FxHashMap;

use super::{Arena, Budget, PriorityFrontier, SearchLimits, SearchResult, Termination};
use crate::heuristic::{GoalIndex, Heuristic};
use crate::puzzle::Board;

/// Bookkeeping for the reopening discipline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Reopening {
    /// Boards re-queued because a strictly cheaper `g` reached them.
    reopened: usize,
    /// Popped entries whose `g` had already been beaten.
    stale_skipped: usize,
}

/// Finds a shortest path when `heuristic` is admissible.
///
/// Ties on `f` prefer the lower `h`, then the older entry. A board is
/// re-queued whenever a strictly cheaper `g` reaches it; queue entries
/// whose `g` has since been beaten are skipped when popped.
pub(super) fn search(
    start: &Board,
    goal: &Board,
    heuristic: Heuristic,
    limits: SearchLimits,
) -> SearchResult {
    let (result, reopening) = run(start, goal, heuristic, limits);
    trace!(
        "a* reopened {} boards, skipped {} stale entries",
        reopening.reopened,
        reopening.stale_skipped
    );
    result
}

fn run(
    start: &Board,
    goal: &Board,
    heuristic: Heuristic,
    limits: SearchLimits,
) -> (SearchResult, Reopening) {
    let mut budget = Budget::start(limits);
    let index = GoalIndex::new(goal);
    let mut arena = Arena::default();
    let mut best_g: FxHashMap<Board, u32> = FxHashMap::default();
    let mut frontier = PriorityFrontier::default();
    let mut reopening = Reopening::default();

    let h = heuristic.estimate(start, &index);
    let root = arena.insert(start.clone(), None, 0);
    best_g.insert(start.clone(), 0);
    frontier.push((h, h), root);

    while let Some(id) = frontier.pop() {
        if let Some(stop) = budget.check(frontier.len()) {
            return (budget.finish(stop, None), reopening);
        }

        let board = arena.board(id);
        let g = arena.depth(id);
        if board == goal {
            trace!("a* generated {} nodes, {} distinct", arena.len(), best_g.len());
            let path = arena.path_to(id);
            return (budget.finish(Termination::Solved, Some(path)), reopening);
        }
        if best_g.get(board).is_some_and(|&best| best < g) {
            reopening.stale_skipped += 1;
            continue;
        }

        let neighbors = board.neighbors();
        let next_g = g + 1;
        for next in neighbors {
            match best_g.get(&next) {
                Some(&best) if best <= next_g => continue,
                Some(_) => reopening.reopened += 1,
                None => {}
            }
            best_g.insert(next.clone(), next_g);
            let h = heuristic.estimate(&next, &index);
            let child = arena.insert(next, Some(id), next_g);
            frontier.push((next_g + h, h), child);
        }
    }

    (budget.finish(Termination::Exhausted, None), reopening)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Move;

    #[test]
    fn prefers_lower_h_on_equal_f() {
        let goal = Board::goal(3).unwrap();
        let start = goal.slide(Move::Up).and_then(|b| b.slide(Move::Left)).unwrap();

        let result = search(&start, &goal, Heuristic::Manhattan, SearchLimits::default());
        assert_eq!(result.termination, Termination::Solved);
        assert_eq!(result.path.as_ref().map(Vec::len), Some(3));
        // Start, its h=1 child, then the goal.
        assert_eq!(result.nodes_expanded, 3);
    }

    #[test]
    fn misplaced_also_finds_shortest_path() {
        let goal = Board::goal(3).unwrap();
        let mut start = goal.clone();
        for mv in [Move::Up, Move::Up, Move::Left, Move::Down, Move::Left] {
            start = start.slide(mv).unwrap();
        }

        let manhattan = search(&start, &goal, Heuristic::Manhattan, SearchLimits::default());
        let misplaced = search(&start, &goal, Heuristic::Misplaced, SearchLimits::default());
        assert_eq!(manhattan.path.unwrap().len(), misplaced.path.unwrap().len());
    }

    #[test]
    fn reopens_on_cheaper_g_and_skips_the_stale_entry() {
        // One board is first queued through a detour two slides too long. A
        // cheaper route re-queues it, and the old entry is popped and skipped.
        let goal = Board::goal(3).unwrap();
        let start = Board::new(3, vec![1, 2, 3, 4, 0, 7, 8, 5, 6]).unwrap();

        let (result, reopening) = run(&start, &goal, Heuristic::Manhattan, SearchLimits::default());
        assert_eq!(result.termination, Termination::Solved);
        assert_eq!(result.move_count(), Some(12));
        assert_eq!(
            reopening,
            Reopening {
                reopened: 1,
                stale_skipped: 1
            }
        );
        // Re-queueing on an equal g would add a second reopen and one more pop.
        assert_eq!(result.nodes_expanded, 45);
    }
}
