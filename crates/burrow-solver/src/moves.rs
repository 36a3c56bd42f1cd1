//! Legal move generation.
//!
//! Besides the movement rules, two pruning rules keep the branching factor
//! small: pods that are already home for good never move, and a pod that can
//! walk straight into its room does so instead of stopping in the hallway.

use smallvec::SmallVec;

use crate::puzzle::{is_exit, Board, Move, Position, HALLWAY_LEN, ROOM_EXITS};

pub type MoveList = SmallVec<[Move; 32]>;

/// Room slot a pod of `room`'s flavor would drop into, if the room accepts it
/// and the hallway from `column` to the room's exit is free.
fn direct_entry(board: &Board, room: usize, column: usize) -> Option<Position> {
    if !board.is_open(room) || !board.is_path_clear(column, ROOM_EXITS[room]) {
        return None;
    }
    board
        .deepest_free_slot(room)
        .map(|slot| Position::room(room, slot))
}

/// Hallway cells a pod leaving through `exit` can stop on
fn hallway_stops(board: &Board, exit: usize) -> impl Iterator<Item = usize> + '_ {
    let hallway = board.hallway();
    let left = (0..exit).rev().take_while(move |&i| hallway[i].is_none());
    let right = (exit + 1..HALLWAY_LEN).take_while(move |&i| hallway[i].is_none());
    left.chain(right).filter(|&i| !is_exit(i))
}

/// Moves out of unsolved rooms. Only the topmost pod of each room may leave.
pub fn room_moves(board: &Board, moves: &mut MoveList) {
    for room in board.unsolved_rooms() {
        let exit = ROOM_EXITS[room];
        if board.hallway()[exit].is_some() {
            continue;
        }
        let Some(slot) = board.exposed_slot(room) else {
            continue;
        };
        let from = Position::room(room, slot);
        let Some(pod) = board.get(from) else {
            continue;
        };

        let target = pod.target_room();
        if target != room {
            if let Some(to) = direct_entry(board, target, exit) {
                moves.push(Move::new(from, to));
                continue;
            }
        }

        moves.extend(
            hallway_stops(board, exit).map(|index| Move::new(from, Position::hallway(index))),
        );
    }
}

/// Moves from the hallway into a pod's own room
pub fn hallway_moves(board: &Board, moves: &mut MoveList) {
    for (index, slot) in board.hallway().iter().enumerate() {
        let Some(pod) = slot else {
            continue;
        };
        if let Some(to) = direct_entry(board, pod.target_room(), index) {
            moves.push(Move::new(Position::hallway(index), to));
        }
    }
}

/// All legal single-pod moves from this board
pub fn legal_moves(board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    room_moves(board, &mut moves);
    hallway_moves(board, &mut moves);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Flavor, Placement};

    fn board(room_size: usize, pods: &[(Flavor, Position)]) -> Board {
        let placements: Vec<Placement> = pods
            .iter()
            .map(|&(flavor, position)| Placement::new(flavor, position))
            .collect();
        Board::new(room_size, &placements).unwrap()
    }

    #[test]
    fn test_pod_at_home_does_not_move() {
        let board = board(2, &[(Flavor::A, Position::room(0, 1))]);
        assert!(legal_moves(&board).is_empty());
    }

    #[test]
    fn test_hallway_pod_goes_home() {
        let board = board(2, &[(Flavor::A, Position::hallway(0))]);
        let moves = legal_moves(&board);

        assert_eq!(moves.len(), 1);
        assert_eq!(
            moves[0],
            Move::new(Position::hallway(0), Position::room(0, 1))
        );
    }

    #[test]
    fn test_direct_room_to_room() {
        // A in room 1 with room 0 open and the path clear: no hallway stops
        let board = board(2, &[(Flavor::A, Position::room(1, 1))]);
        let moves = legal_moves(&board);

        assert_eq!(moves.len(), 1);
        assert_eq!(
            moves[0],
            Move::new(Position::room(1, 1), Position::room(0, 1))
        );
    }

    #[test]
    fn test_only_exposed_pod_moves() {
        // A above B in room 0; room 0 is not open for A, so A takes hallway stops
        let board = board(
            2,
            &[(Flavor::A, Position::room(0, 0)), (Flavor::B, Position::room(0, 1))],
        );
        let moves = legal_moves(&board);

        // Non-exit cells: 0, 1, 3, 5, 7, 9, 10
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| m.from == Position::room(0, 0)));
        assert!(moves
            .iter()
            .all(|m| matches!(m.to, Position::Hallway { index } if !is_exit(index))));
    }

    #[test]
    fn test_direct_entry_ignores_stuck_hallway_pods() {
        let board = board(
            2,
            &[
                (Flavor::B, Position::room(0, 1)),
                (Flavor::D, Position::hallway(1)),
                (Flavor::A, Position::hallway(5)),
            ],
        );
        let moves = legal_moves(&board);

        // D is walled off from room 3 by the A, and the A cannot enter room 0
        // while the B is inside. The B walks straight into room 1.
        assert_eq!(moves.len(), 1);
        assert_eq!(
            moves[0],
            Move::new(Position::room(0, 1), Position::room(1, 1))
        );
    }

    #[test]
    fn test_blocked_path_falls_back_to_stops() {
        let board = board(
            2,
            &[
                (Flavor::D, Position::room(0, 1)),
                (Flavor::B, Position::hallway(5)),
            ],
        );
        let moves = legal_moves(&board);

        // D cannot reach room 3 past the B at cell 5. The B has an open room
        // and a clear path to exit 4, so it goes home.
        let from_room: Vec<_> = moves
            .iter()
            .filter(|m| m.from == Position::room(0, 1))
            .map(|m| m.to)
            .collect();
        assert_eq!(
            from_room,
            vec![
                Position::hallway(1),
                Position::hallway(0),
                Position::hallway(3),
            ]
        );
        assert!(moves.contains(&Move::new(Position::hallway(5), Position::room(1, 1))));
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn test_closed_room_blocks_hallway_pod() {
        let board = board(
            2,
            &[(Flavor::A, Position::hallway(0)), (Flavor::B, Position::room(0, 1))],
        );
        let moves = legal_moves(&board);

        assert!(moves.iter().all(|m| m.from != Position::hallway(0)));
        // B leaves room 0 straight into room 1
        assert_eq!(
            moves.as_slice(),
            &[Move::new(Position::room(0, 1), Position::room(1, 1))]
        );
    }

    #[test]
    fn test_never_enters_below_a_pod() {
        // Bypasses the packing check: A sits on slot 0 with slot 1 empty
        let mut board = Board::empty(2).unwrap();
        board.place(Flavor::A, Position::room(0, 0)).unwrap();
        board.place(Flavor::A, Position::hallway(10)).unwrap();

        let moves = legal_moves(&board);
        assert!(moves.iter().all(|m| m.to != Position::room(0, 1)));
        assert!(moves.iter().all(|m| m.from != Position::hallway(10)));
    }

    #[test]
    fn test_deep_room_fills_back_first() {
        let mut board = board(
            4,
            &[(Flavor::A, Position::room(0, 3)), (Flavor::A, Position::hallway(0))],
        );
        let moves = legal_moves(&board);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, Position::room(0, 2));

        board.place(Flavor::B, Position::room(0, 2)).unwrap();
        assert!(legal_moves(&board)
            .iter()
            .all(|m| m.from != Position::hallway(0)));
    }
}
