//! Applying moves to a board.
//!
//! Moves handed to this module are expected to come from the move generator.
//! Moving out of an empty cell or into an occupied one means the engine is
//! broken, so those cases panic instead of returning an error.

use crate::cost::move_cost;
use crate::puzzle::{Board, Move};

/// Result of replaying a move sequence
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub board: Board,
    pub total_cost: u32,
    pub solved: bool,
}

/// Move one pod in place and return the energy spent
pub fn execute_move(board: &mut Board, mv: &Move) -> u32 {
    assert_ne!(mv.from, mv.to, "move must change position: {}", mv);

    let pod = board
        .slot_mut(mv.from)
        .and_then(Option::take)
        .unwrap_or_else(|| panic!("no pod to move at {}", mv.from));

    let target = board
        .slot_mut(mv.to)
        .unwrap_or_else(|| panic!("move target {} is outside the burrow", mv.to));
    assert!(target.is_none(), "move target {} is occupied", mv.to);
    *target = Some(pod);

    move_cost(pod, mv)
}

/// Apply a sequence of moves to a copy of `board`
pub fn replay(board: &Board, moves: &[Move]) -> ReplayResult {
    let mut board = board.clone();
    let total_cost: u32 = moves.iter().map(|mv| execute_move(&mut board, mv)).sum();
    let solved = board.is_solved();

    ReplayResult {
        board,
        total_cost,
        solved,
    }
}

/// Does the move sequence solve the board?
pub fn verify_solution(board: &Board, moves: &[Move]) -> bool {
    replay(board, moves).solved
}
