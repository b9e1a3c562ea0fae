//! End-to-end properties of the search engine: solvable scrambles, goal
//! short-circuit, budget enforcement, path validity and A* optimality.

use n_puzzle::{
    generate_start, generate_start_with, heuristic, is_solvable, solve, Algorithm, Board,
    Heuristic, Move, SearchLimits, Termination,
};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use test_log::test;

const ALL_ALGORITHMS: [Algorithm; 5] = [
    Algorithm::DepthFirst,
    Algorithm::GreedyBestFirst(Heuristic::Manhattan),
    Algorithm::GreedyBestFirst(Heuristic::Misplaced),
    Algorithm::AStar(Heuristic::Manhattan),
    Algorithm::AStar(Heuristic::Misplaced),
];

fn limits(max_steps: usize) -> SearchLimits {
    SearchLimits {
        time_limit: None,
        max_steps,
    }
}

/// Exact slide distance from every board reachable from `goal`.
fn distances_from(goal: &Board) -> HashMap<Board, usize> {
    let mut dist = HashMap::from([(goal.clone(), 0)]);
    let mut queue = VecDeque::from([goal.clone()]);
    while let Some(board) = queue.pop_front() {
        let d = dist[&board];
        for next in board.neighbors() {
            if !dist.contains_key(&next) {
                dist.insert(next.clone(), d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

fn assert_valid_path(path: &[Board], start: &Board, goal: &Board) {
    assert_eq!(path.first(), Some(start));
    assert_eq!(path.last(), Some(goal));
    for pair in path.windows(2) {
        assert!(
            pair[0].neighbors().contains(&pair[1]),
            "illegal step:\n{}->\n{}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn generated_starts_are_solvable() {
    for size in 3..=5 {
        let goal = Board::goal(size).unwrap();
        for moves in [0, 1, 10, 50, 300] {
            let start = generate_start(&goal, moves).unwrap();
            assert!(is_solvable(&start, &goal), "size {} moves {}", size, moves);
        }
        for seed in 0..20 {
            let start = generate_start_with(&goal, 37, seed).unwrap();
            assert!(is_solvable(&start, &goal));
        }
    }
}

#[test]
fn goal_short_circuits_every_algorithm() {
    for size in [2, 3, 4, 5] {
        let goal = Board::goal(size).unwrap();
        for algorithm in ALL_ALGORITHMS {
            let result = solve(&goal, &goal, algorithm, limits(1)).unwrap();
            assert_eq!(result.termination, Termination::Solved, "{}", algorithm);
            assert_eq!(result.path, Some(vec![goal.clone()]));
            assert_eq!(result.nodes_expanded, 1);
            assert_eq!(result.move_count(), Some(0));
        }
    }
}

#[test]
fn zero_budget_stops_after_one_node() {
    let goal = Board::goal(3).unwrap();
    let start = goal
        .slide(Move::Up)
        .and_then(|b| b.slide(Move::Left))
        .unwrap();

    for algorithm in ALL_ALGORITHMS {
        let result = solve(&start, &goal, algorithm, limits(0)).unwrap();
        assert_eq!(result.termination, Termination::MaxSteps, "{}", algorithm);
        assert!(result.path.is_none());
        assert_eq!(result.nodes_expanded, 1);
    }
}

#[test]
fn node_budget_is_never_exceeded_by_more_than_one() {
    let goal = Board::goal(4).unwrap();
    let start = generate_start_with(&goal, 120, 11).unwrap();

    for max_steps in [5, 50, 500] {
        for algorithm in ALL_ALGORITHMS {
            let result = solve(&start, &goal, algorithm, limits(max_steps)).unwrap();
            assert!(result.nodes_expanded <= max_steps + 1, "{}", algorithm);
            if result.termination == Termination::MaxSteps {
                assert_eq!(result.nodes_expanded, max_steps + 1);
            }
        }
    }
}

#[test]
fn elapsed_time_limit_is_reported() {
    let goal = Board::goal(5).unwrap();
    let start = generate_start_with(&goal, 300, 5).unwrap();
    let limits = SearchLimits {
        time_limit: Some(Duration::ZERO),
        max_steps: 10_000,
    };

    let result = solve(&start, &goal, Algorithm::DepthFirst, limits).unwrap();
    assert!(result.path.is_none());
    // Ten thousand pops cannot all fit in zero elapsed time; the first may.
    assert_eq!(result.termination, Termination::TimeLimit);
    assert!(result.nodes_expanded < 10_000);
}

#[test]
fn solution_paths_are_chains_of_slides() {
    let goal = Board::goal(3).unwrap();
    for seed in 0..10 {
        let start = generate_start_with(&goal, 20, seed).unwrap();
        for algorithm in ALL_ALGORITHMS {
            // DFS may pop every reachable board several times over.
            let result = solve(&start, &goal, algorithm, limits(usize::MAX)).unwrap();
            assert_eq!(result.termination, Termination::Solved, "{}", algorithm);
            assert_valid_path(result.path.as_ref().unwrap(), &start, &goal);
        }
    }
}

#[test]
fn astar_matches_exact_distance_on_straight_walk() {
    // Every slide moves a different tile one cell further from home, so the
    // Manhattan bound equals the walk length.
    let goal = Board::goal(3).unwrap();
    let walk = [Move::Up, Move::Up, Move::Left, Move::Left, Move::Down, Move::Down];
    let mut start = goal.clone();
    for (k, mv) in walk.iter().enumerate() {
        start = start.slide(*mv).unwrap();
        assert_eq!(heuristic(&start, &goal, Heuristic::Manhattan).unwrap(), k as u32 + 1);

        let result = solve(&start, &goal, Algorithm::AStar(Heuristic::Manhattan), limits(500_000))
            .unwrap();
        assert_eq!(result.path.as_ref().map(Vec::len), Some(k + 2));
    }
}

#[test]
fn astar_is_optimal_against_breadth_first_distances() {
    let goal = Board::goal(3).unwrap();
    let dist = distances_from(&goal);
    assert_eq!(dist.len(), 181_440);

    for seed in 0..10 {
        let start = generate_start_with(&goal, 30, seed).unwrap();
        let optimal = dist[&start];
        for h in [Heuristic::Manhattan, Heuristic::Misplaced] {
            let result = solve(&start, &goal, Algorithm::AStar(h), limits(500_000)).unwrap();
            assert_eq!(result.move_count(), Some(optimal), "seed {} {}", seed, h);
        }
    }
}

#[test]
fn greedy_is_never_shorter_than_astar() {
    let goal = Board::goal(3).unwrap();
    for seed in 100..130 {
        let start = generate_start_with(&goal, 50, seed).unwrap();
        for h in [Heuristic::Manhattan, Heuristic::Misplaced] {
            let greedy = solve(&start, &goal, Algorithm::GreedyBestFirst(h), limits(500_000))
                .unwrap();
            let astar = solve(&start, &goal, Algorithm::AStar(h), limits(500_000)).unwrap();
            if let (Some(g), Some(a)) = (greedy.move_count(), astar.move_count()) {
                assert!(g >= a, "seed {}: greedy {} < a* {}", seed, g, a);
            }
        }
    }
}

#[test]
fn unsolvable_start_exhausts_without_path() {
    let goal = Board::goal(2).unwrap();
    let start = Board::new(2, vec![1, 3, 2, 0]).unwrap();
    assert!(!is_solvable(&start, &goal));

    for algorithm in ALL_ALGORITHMS {
        let result = solve(&start, &goal, algorithm, limits(10_000)).unwrap();
        assert_eq!(result.termination, Termination::Exhausted, "{}", algorithm);
        assert!(result.path.is_none());
    }
}

#[test]
fn larger_boards_solve_with_astar() {
    let goal = Board::goal(4).unwrap();
    let start = generate_start_with(&goal, 30, 8).unwrap();
    let result = solve(&start, &goal, Algorithm::AStar(Heuristic::Manhattan), limits(500_000))
        .unwrap();
    assert_eq!(result.termination, Termination::Solved);
    let path = result.path.unwrap();
    assert!(path.len() <= 31);
    assert_valid_path(&path, &start, &goal);
}
