//! CLI entry point for the burrow solver.
//!
//! Usage:
//!   burrow-solver solve <puzzle> [options]
//!   burrow-solver solve --stdin [options]
//!
//! The puzzle is either a JSON layout (`{"roomSize": 2, "placements": [...]}`)
//! or the ASCII burrow diagram.
//!
//! Options:
//!   --unfold                Splice in the two extra rows (room size 2 -> 4)
//!   --max-expansions <n>    Give up after n expanded states
//!   --show-path             Include the move sequence in the output
//!   --debug                 Verbose logging on stderr

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use burrow_solver::{
    parse_diagram, solve, Board, BurrowConfig, BurrowError, BurrowResult, Move, SolverConfig,
    SolverResult,
};

#[derive(Parser)]
#[command(name = "burrow-solver")]
#[command(about = "Minimum-energy solver for the amphipod burrow puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log search progress to stderr
    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the cheapest way to sort a burrow
    Solve {
        /// Path to a puzzle file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read puzzle from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Unfold a room size 2 burrow into the room size 4 variant
        #[arg(long)]
        unfold: bool,

        /// Maximum states to expand before giving up
        #[arg(long)]
        max_expansions: Option<usize>,

        /// Include the optimal move sequence in the output
        #[arg(long)]
        show_path: bool,
    },
}

/// Output format for a solve run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    move_count: usize,
    states_expanded: usize,
    states_discovered: usize,
    time_elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<Move>>,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> BurrowResult<String> {
    if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(path) = file {
        Ok(fs::read_to_string(path)?)
    } else {
        Err(BurrowError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "must provide either a file path or --stdin",
        )))
    }
}

/// JSON layouts start with `{`, anything else is treated as a diagram
fn load_board(content: &str, unfold: bool) -> BurrowResult<Board> {
    let board = if content.trim_start().starts_with('{') {
        let config: BurrowConfig = serde_json::from_str(content)?;
        Board::from_config(&config)?
    } else {
        parse_diagram(content)?
    };

    if unfold {
        board.unfold()
    } else {
        Ok(board)
    }
}

fn format_result(result: &BurrowResult<SolverResult>, show_path: bool) -> SolveOutput {
    match result {
        Ok(result) => SolveOutput {
            solved: true,
            cost: Some(result.cost),
            reason: None,
            move_count: result.moves.len(),
            states_expanded: result.states_expanded,
            states_discovered: result.states_discovered,
            time_elapsed_ms: result.time_elapsed_ms,
            moves: show_path.then(|| result.moves.clone()),
        },
        Err(e) => SolveOutput {
            solved: false,
            cost: None,
            reason: Some(e.to_string()),
            move_count: 0,
            states_expanded: match e {
                BurrowError::NoSolution { states_expanded } => *states_expanded,
                BurrowError::ExpansionLimit { limit } => *limit,
                _ => 0,
            },
            states_discovered: 0,
            time_elapsed_ms: 0,
            moves: None,
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            unfold,
            max_expansions,
            show_path,
        } => {
            let board = match read_input(file, stdin).and_then(|content| load_board(&content, unfold))
            {
                Ok(board) => board,
                Err(e) => {
                    error!("{}", e);
                    process::exit(1);
                }
            };
            info!("Loaded burrow:\n{}", board);

            let config = SolverConfig { max_expansions };
            let result = solve(&board, &config);
            match &result {
                Ok(solution) => info!(
                    cost = solution.cost,
                    moves = solution.moves.len(),
                    "Solved in {} ms",
                    solution.time_elapsed_ms
                ),
                Err(e) => error!("{}", e),
            }

            let output = format_result(&result, show_path);
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize output: {}", e);
                    process::exit(1);
                }
            }

            if output.solved {
                process::exit(0);
            } else {
                process::exit(1);
            }
        }
    }
}
