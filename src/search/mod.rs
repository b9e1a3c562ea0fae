//! Budget-bounded search strategies over puzzle boards.
//!
//! Every strategy pops one node at a time and applies the same checks, in
//! order: wall-clock limit, node budget, goal test. Nodes are kept in an
//! arena with parent links so the solution path is rebuilt only once.

mod astar;
mod dfs;
mod greedy;

use log::{debug, trace, warn};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::{Duration, Instant};

use crate::error::{PuzzleError, Result};
use crate::heuristic::Heuristic;
use crate::puzzle::Board;

/// Default ceiling on expanded nodes.
pub const DEFAULT_MAX_STEPS: usize = 500_000;

const PROGRESS_INTERVAL: usize = 50_000;

/// Search strategy, carrying the heuristic where one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    DepthFirst,
    GreedyBestFirst(Heuristic),
    AStar(Heuristic),
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::DepthFirst => "DFS",
            Algorithm::GreedyBestFirst(_) => "Best-First",
            Algorithm::AStar(_) => "A*",
        }
    }

    pub fn heuristic(&self) -> Option<Heuristic> {
        match *self {
            Algorithm::DepthFirst => None,
            Algorithm::GreedyBestFirst(h) | Algorithm::AStar(h) => Some(h),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.heuristic() {
            Some(h) => write!(f, "{} ({})", self.name(), h),
            None => write!(f, "{}", self.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub time_limit: Option<Duration>,
    /// Search stops once more than this many nodes have been expanded.
    pub max_steps: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            time_limit: None,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Solved,
    TimeLimit,
    MaxSteps,
    Exhausted,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::Solved => "solved",
            Termination::TimeLimit => "time limit reached",
            Termination::MaxSteps => "node budget exhausted",
            Termination::Exhausted => "search space exhausted",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Start to goal inclusive; present only when solved.
    pub path: Option<Vec<Board>>,
    /// Nodes popped from the frontier, including the one that ended the search.
    pub nodes_expanded: usize,
    pub termination: Termination,
    pub elapsed: Duration,
}

impl SearchResult {
    /// Slides in the solution, one less than the path length.
    pub fn move_count(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

/// Runs `algorithm` from `start` towards `goal`.
///
/// Running out of time or nodes is reported in the result; only boards of
/// different sizes are an error.
pub fn solve(
    start: &Board,
    goal: &Board,
    algorithm: Algorithm,
    limits: SearchLimits,
) -> Result<SearchResult> {
    if start.size() != goal.size() {
        return Err(PuzzleError::SizeMismatch {
            start: start.size(),
            goal: goal.size(),
        });
    }

    debug!(
        "{} on {}x{} board (max_steps={}, time_limit={:?})",
        algorithm,
        start.size(),
        start.size(),
        limits.max_steps,
        limits.time_limit
    );

    let result = match algorithm {
        Algorithm::DepthFirst => dfs::search(start, goal, limits),
        Algorithm::GreedyBestFirst(h) => greedy::search(start, goal, h, limits),
        Algorithm::AStar(h) => astar::search(start, goal, h, limits),
    };

    match result.termination {
        Termination::TimeLimit | Termination::MaxSteps => warn!(
            "{} stopped early: {} after {} nodes",
            algorithm, result.termination, result.nodes_expanded
        ),
        _ => debug!(
            "{} finished: {} after {} nodes in {:?}",
            algorithm, result.termination, result.nodes_expanded, result.elapsed
        ),
    }
    Ok(result)
}

pub(crate) type NodeId = usize;

struct Node {
    board: Board,
    parent: Option<NodeId>,
    depth: u32,
}

/// Every node generated by one search, linked to its parent.
#[derive(Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub(crate) fn insert(&mut self, board: Board, parent: Option<NodeId>, depth: u32) -> NodeId {
        self.nodes.push(Node {
            board,
            parent,
            depth,
        });
        self.nodes.len() - 1
    }

    pub(crate) fn board(&self, id: NodeId) -> &Board {
        &self.nodes[id].board
    }

    /// Slides from the root; the path cost `g` for A*.
    pub(crate) fn depth(&self, id: NodeId) -> u32 {
        self.nodes[id].depth
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn path_to(&self, id: NodeId) -> Vec<Board> {
        let mut path = Vec::with_capacity(self.nodes[id].depth as usize + 1);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            path.push(self.nodes[current].board.clone());
            cursor = self.nodes[current].parent;
        }
        path.reverse();
        path
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Ranked {
    rank: (u32, u32),
    seq: u64,
    node: NodeId,
}

/// Min-priority frontier; equal ranks pop in insertion order.
#[derive(Default)]
pub(crate) struct PriorityFrontier {
    heap: BinaryHeap<Reverse<Ranked>>,
    seq: u64,
}

impl PriorityFrontier {
    pub(crate) fn push(&mut self, rank: (u32, u32), node: NodeId) {
        self.heap.push(Reverse(Ranked {
            rank,
            seq: self.seq,
            node,
        }));
        self.seq += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse(ranked)| ranked.node)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Clock and node counter shared by all strategies.
pub(crate) struct Budget {
    started: Instant,
    limits: SearchLimits,
    nodes_expanded: usize,
}

impl Budget {
    pub(crate) fn start(limits: SearchLimits) -> Self {
        Self {
            started: Instant::now(),
            limits,
            nodes_expanded: 0,
        }
    }

    /// Counts one popped node, returning why the search must stop if it must.
    pub(crate) fn check(&mut self, frontier_len: usize) -> Option<Termination> {
        if let Some(limit) = self.limits.time_limit {
            if self.started.elapsed() > limit {
                return Some(Termination::TimeLimit);
            }
        }

        self.nodes_expanded += 1;
        if self.nodes_expanded > self.limits.max_steps {
            return Some(Termination::MaxSteps);
        }

        if self.nodes_expanded % PROGRESS_INTERVAL == 0 {
            trace!(
                "{} nodes expanded, frontier {}, {:?} elapsed",
                self.nodes_expanded,
                frontier_len,
                self.started.elapsed()
            );
        }
        None
    }

    pub(crate) fn finish(self, termination: Termination, path: Option<Vec<Board>>) -> SearchResult {
        SearchResult {
            path,
            nodes_expanded: self.nodes_expanded,
            termination,
            elapsed: self.started.elapsed(),
        }
    }
}
