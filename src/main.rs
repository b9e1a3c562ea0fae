//! Command-line front end: scrambles a board, solves it and reports the run.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use log::{info, warn};
use n_puzzle::{
    generate_start, generate_start_with, puzzle::moves_along, solve, Algorithm, Board, Config,
    Difficulty, Heuristic, SearchResult,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    /// Depth-first search (3x3 and smaller unless --force)
    Dfs,
    /// Greedy best-first search
    Greedy,
    /// A* search
    Astar,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    Misplaced,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Misplaced => Heuristic::Misplaced,
        }
    }
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser)]
#[command(name = "n-puzzle")]
#[command(about = "Scramble and solve a sliding-tile puzzle", long_about = None)]
struct Cli {
    /// Board side length
    #[arg(short, long, default_value_t = 3)]
    size: usize,

    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Medium)]
    difficulty: DifficultyArg,

    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Astar)]
    algorithm: AlgorithmArg,

    /// Ignored by DFS
    #[arg(long, value_enum, default_value_t = HeuristicArg::Manhattan)]
    heuristic: HeuristicArg,

    /// Seed for a reproducible scramble
    #[arg(long)]
    seed: Option<u64>,

    /// Override the node budget
    #[arg(long)]
    max_steps: Option<usize>,

    /// Override the time limit, in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// JSON config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run DFS even on boards above the configured size limit
    #[arg(long)]
    force: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    size: usize,
    algorithm: String,
    start: &'a Board,
    goal: &'a Board,
    termination: n_puzzle::Termination,
    moves: Option<Vec<n_puzzle::Move>>,
    nodes_expanded: usize,
    elapsed_ms: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let algorithm = match cli.algorithm {
        AlgorithmArg::Dfs => Algorithm::DepthFirst,
        AlgorithmArg::Greedy => Algorithm::GreedyBestFirst(cli.heuristic.into()),
        AlgorithmArg::Astar => Algorithm::AStar(cli.heuristic.into()),
    };

    if let Err(err) = config.check_algorithm(algorithm, cli.size) {
        if !cli.force {
            return Err(err).context("pick another algorithm or pass --force");
        }
        warn!("{}; continuing because of --force", err);
    }

    let shuffle = config.shuffle_moves(cli.size, cli.difficulty.into())?;
    let mut limits = config.limits_for(algorithm)?;
    if let Some(max_steps) = cli.max_steps {
        limits.max_steps = max_steps;
    }
    if let Some(secs) = cli.time_limit {
        limits.time_limit =
            Some(Duration::try_from_secs_f64(secs).context("invalid --time-limit")?);
    }

    let goal = Board::goal(cli.size)?;
    let start = match cli.seed {
        Some(seed) => generate_start_with(&goal, shuffle, seed)?,
        None => generate_start(&goal, shuffle)?,
    };

    info!(
        "Solving {}x{} ({}, {} shuffle moves) with {}",
        cli.size,
        cli.size,
        Difficulty::from(cli.difficulty),
        shuffle,
        algorithm
    );
    let result = solve(&start, &goal, algorithm, limits)?;

    if cli.json {
        print_json(&start, &goal, algorithm, &result)
    } else {
        print_text(&start, &goal, algorithm, &result)
    }
}

fn print_json(
    start: &Board,
    goal: &Board,
    algorithm: Algorithm,
    result: &SearchResult,
) -> anyhow::Result<()> {
    let moves = result.path.as_deref().map(moves_along).transpose()?;
    let report = Report {
        size: start.size(),
        algorithm: algorithm.to_string(),
        start,
        goal,
        termination: result.termination,
        moves,
        nodes_expanded: result.nodes_expanded,
        elapsed_ms: result.elapsed.as_secs_f64() * 1000.0,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(
    start: &Board,
    goal: &Board,
    algorithm: Algorithm,
    result: &SearchResult,
) -> anyhow::Result<()> {
    println!("{}\n{}", "Start:".bold(), styled(start));
    println!("{}\n{}", "Goal:".bold(), styled(goal));

    match &result.path {
        Some(path) => {
            let moves = moves_along(path)?;
            println!("{} found a solution with {} moves", algorithm, moves.len());
            let mut board = start.clone();
            for mv in moves {
                board = board
                    .slide(mv)
                    .context("solution path contains an illegal move")?;
                println!("{}\n{}", mv.to_string().cyan(), styled(&board));
            }
        }
        None => println!(
            "{}",
            format!("No solution found within budget ({})", result.termination).red()
        ),
    }

    println!(
        "Nodes expanded: {} | Time: {:.3}s | Result: {}",
        result.nodes_expanded,
        result.elapsed.as_secs_f64(),
        result.termination
    );
    Ok(())
}

/// Board grid with the blank highlighted.
fn styled(board: &Board) -> String {
    board
        .to_string()
        .lines()
        .map(|line| {
            line.split(' ')
                .map(|cell| {
                    if cell.trim() == "." {
                        cell.magenta().bold().to_string()
                    } else {
                        cell.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
