//! Best-first (A*) search for the cheapest way to sort a burrow.
//!
//! The frontier is ordered by energy spent so far plus the heuristic estimate.
//! A visited memo keyed by the board's canonical key remembers the cheapest
//! cost each state was reached at; successors that do not beat it are dropped,
//! and frontier entries that were beaten after being pushed are skipped when
//! popped. Each memo entry also records the move that produced it, which is
//! enough to rebuild the winning move sequence.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, trace};

use crate::cost::heuristic;
use crate::error::{BurrowError, BurrowResult};
use crate::executor::execute_move;
use crate::moves::legal_moves;
use crate::puzzle::{Board, Move};

/// Expansions between progress log lines
const PROGRESS_INTERVAL: usize = 50_000;

/// Configuration for the solver
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Give up after this many expansions (unbounded when `None`)
    pub max_expansions: Option<usize>,
}

/// Result of a successful search
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverResult {
    /// Minimum total energy
    pub cost: u32,
    /// One cheapest move sequence
    pub moves: Vec<Move>,
    pub states_expanded: usize,
    pub states_discovered: usize,
    pub time_elapsed_ms: u64,
}

/// Memo entry: cheapest known cost and the step that achieved it
#[derive(Debug)]
struct Visit {
    cost: u32,
    via: Option<(String, Move)>,
}

/// A frontier entry. Ordered so that `BinaryHeap` pops the lowest priority
/// first, and the earliest pushed among equals.
#[derive(Debug)]
struct SearchFrame {
    priority: u32,
    sequence: u64,
    cost: u32,
    board: Board,
}

impl PartialEq for SearchFrame {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl Eq for SearchFrame {}

impl Ord for SearchFrame {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for SearchFrame {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Walk the memo back from a solved state to the start
fn reconstruct_path(visited: &HashMap<String, Visit>, mut key: String) -> Vec<Move> {
    let mut moves = Vec::new();
    while let Some((parent, mv)) = visited.get(&key).and_then(|visit| visit.via.as_ref()) {
        moves.push(*mv);
        key = parent.clone();
    }
    moves.reverse();
    moves
}

/// Find the minimum energy needed to sort `board`.
///
/// Fails with `NoSolution` when the frontier runs dry, or `ExpansionLimit`
/// when `config.max_expansions` is reached first.
pub fn solve(board: &Board, config: &SolverConfig) -> BurrowResult<SolverResult> {
    let start_time = Instant::now();

    let mut frontier: BinaryHeap<SearchFrame> = BinaryHeap::new();
    let mut visited: HashMap<String, Visit> = HashMap::new();
    let mut sequence: u64 = 0;
    let mut states_expanded: usize = 0;

    visited.insert(board.canonical_key(), Visit { cost: 0, via: None });
    frontier.push(SearchFrame {
        priority: heuristic(board),
        sequence,
        cost: 0,
        board: board.clone(),
    });

    debug!(
        room_size = board.room_size(),
        pods = board.pod_count(),
        estimate = heuristic(board),
        "starting search"
    );

    while let Some(frame) = frontier.pop() {
        let key = frame.board.canonical_key();

        // Superseded by a cheaper path pushed later
        if visited
            .get(&key)
            .is_some_and(|visit| visit.cost < frame.cost)
        {
            continue;
        }

        if frame.board.is_solved() {
            let moves = reconstruct_path(&visited, key);
            let time_elapsed_ms = start_time.elapsed().as_millis() as u64;
            debug!(
                cost = frame.cost,
                moves = moves.len(),
                states_expanded,
                states_discovered = visited.len(),
                time_elapsed_ms,
                "search finished"
            );
            return Ok(SolverResult {
                cost: frame.cost,
                moves,
                states_expanded,
                states_discovered: visited.len(),
                time_elapsed_ms,
            });
        }

        if let Some(limit) = config.max_expansions {
            if states_expanded >= limit {
                return Err(BurrowError::ExpansionLimit { limit });
            }
        }

        states_expanded += 1;
        if states_expanded % PROGRESS_INTERVAL == 0 {
            debug!(
                states_expanded,
                frontier = frontier.len(),
                best_priority = frame.priority,
                "search progress"
            );
        }
        trace!(cost = frame.cost, priority = frame.priority, %key, "expanding");

        for mv in legal_moves(&frame.board) {
            let mut next = frame.board.clone();
            let cost = frame.cost + execute_move(&mut next, &mv);
            let next_key = next.canonical_key();

            if visited
                .get(&next_key)
                .is_some_and(|visit| cost >= visit.cost)
            {
                continue;
            }

            visited.insert(
                next_key,
                Visit {
                    cost,
                    via: Some((key.clone(), mv)),
                },
            );
            sequence += 1;
            frontier.push(SearchFrame {
                priority: cost + heuristic(&next),
                sequence,
                cost,
                board: next,
            });
        }
    }

    debug!(states_expanded, "frontier exhausted");
    Err(BurrowError::NoSolution { states_expanded })
}

/// Minimum energy needed to sort `board`, with no expansion limit
pub fn minimum_cost(board: &Board) -> BurrowResult<u32> {
    solve(board, &SolverConfig::default()).map(|result| result.cost)
}
