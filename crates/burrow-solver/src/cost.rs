//! Move costs and the remaining-cost estimate that orders the search frontier.

use crate::puzzle::{Board, Flavor, Move, ROOM_COUNT, ROOM_EXITS};

/// Steps taken by a move: out of the source room, along the hallway, into
/// the destination room.
pub fn move_steps(mv: &Move) -> u32 {
    let lateral = mv.from.column().abs_diff(mv.to.column());
    (mv.from.depth() + lateral + mv.to.depth()) as u32
}

pub fn move_cost(flavor: Flavor, mv: &Move) -> u32 {
    flavor.unit_cost() * move_steps(mv)
}

/// Estimate of the energy still needed to solve the board.
///
/// Each pod that still has to move is charged for the shortest trip it could
/// possibly take on its own: up to the hallway, across to its room's exit and
/// one step in. A pod already in its room but sitting above a foreign pod has
/// to step out, aside and back. Pods never share steps, so the sum never
/// overshoots the true remaining cost, and a solved board scores zero.
pub fn heuristic(board: &Board) -> u32 {
    let mut total = 0;

    for room in 0..ROOM_COUNT {
        let slots = board.room(room);
        for (slot, pod) in slots.iter().enumerate() {
            let Some(pod) = *pod else {
                continue;
            };
            let target = pod.target_room();
            let steps = if target != room {
                2 * target.abs_diff(room) + slot + 2
            } else if slots[slot + 1..].iter().any(|below| *below != Some(pod)) {
                slot + 4
            } else {
                0
            };
            total += pod.unit_cost() * steps as u32;
        }
    }

    for (index, slot) in board.hallway().iter().enumerate() {
        if let Some(pod) = *slot {
            let steps = ROOM_EXITS[pod.target_room()].abs_diff(index) + 1;
            total += pod.unit_cost() * steps as u32;
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Placement, Position};

    #[test]
    fn test_move_steps() {
        let across = Move::new(Position::hallway(0), Position::hallway(10));
        assert_eq!(move_steps(&across), 10);

        let room_to_room = Move::new(Position::room(3, 1), Position::room(0, 1));
        assert_eq!(move_steps(&room_to_room), 10);

        let out = Move::new(Position::room(1, 0), Position::hallway(3));
        assert_eq!(move_steps(&out), 2);
    }

    #[test]
    fn test_move_cost_scales_with_flavor() {
        let mv = Move::new(Position::room(2, 0), Position::hallway(5));
        assert_eq!(move_cost(Flavor::A, &mv), 2);
        assert_eq!(move_cost(Flavor::D, &mv), 2000);
    }

    #[test]
    fn test_heuristic_zero_when_solved() {
        assert_eq!(heuristic(&Board::solved(2).unwrap()), 0);
        assert_eq!(heuristic(&Board::solved(4).unwrap()), 0);
    }

    #[test]
    fn test_heuristic_matches_single_trip() {
        // A lone A at hallway 9 needs 7 steps across and 1 down at minimum
        let board = Board::new(2, &[Placement::new(Flavor::A, Position::hallway(9))]).unwrap();
        assert_eq!(heuristic(&board), 8);

        // B in room 3 slot 1: 2 up, 4 across, 1 down
        let board = Board::new(2, &[Placement::new(Flavor::B, Position::room(3, 1))]).unwrap();
        assert_eq!(heuristic(&board), 70);
    }

    #[test]
    fn test_heuristic_charges_blocking_pod() {
        let board = Board::new(
            2,
            &[
                Placement::new(Flavor::A, Position::room(0, 0)),
                Placement::new(Flavor::B, Position::room(0, 1)),
            ],
        )
        .unwrap();
        // A: 1 up, 1 aside, 1 back, 1 down. B: 2 up, 2 across, 1 down.
        assert_eq!(heuristic(&board), 4 + 50);
    }

    #[test]
    fn test_heuristic_is_idempotent() {
        let board = Board::new(
            4,
            &[
                Placement::new(Flavor::D, Position::room(0, 3)),
                Placement::new(Flavor::C, Position::hallway(10)),
            ],
        )
        .unwrap();
        assert_eq!(heuristic(&board), heuristic(&board));
    }
}
