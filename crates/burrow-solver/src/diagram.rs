//! Reading and drawing the ASCII burrow diagram:
//!
//! ```text
//! #############
//! #...........#
//! ###B#C#B#D###
//!   #A#D#C#A#
//!   #########
//! ```

use std::fmt;

use crate::error::{BurrowError, BurrowResult};
use crate::puzzle::{Board, Flavor, Position, HALLWAY_LEN, ROOM_COUNT};

/// Character columns of the four rooms in a diagram line
const ROOM_COLUMNS: [usize; ROOM_COUNT] = [3, 5, 7, 9];

fn malformed(line: usize, reason: impl Into<String>) -> BurrowError {
    BurrowError::MalformedDiagram {
        line,
        reason: reason.into(),
    }
}

fn parse_cell(cell: Option<char>, line: usize) -> BurrowResult<Option<Flavor>> {
    match cell {
        Some('.') => Ok(None),
        Some(c) => Flavor::try_from(c)
            .map(Some)
            .map_err(|_| malformed(line, format!("unexpected character {:?}", c))),
        None => Err(malformed(line, "line too short")),
    }
}

/// Parse a diagram into a board. The number of room lines (2 or 4) sets the
/// room size; pods drawn in the hallway are kept.
pub fn parse_diagram(text: &str) -> BurrowResult<Board> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end()))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let Some(&(hall_line, hallway)) = lines.get(1) else {
        return Err(malformed(lines.len() + 1, "missing hallway line"));
    };
    let hallway: Vec<char> = hallway.chars().collect();
    if hallway.len() != HALLWAY_LEN + 2 || hallway[0] != '#' || hallway[HALLWAY_LEN + 1] != '#' {
        return Err(malformed(hall_line, "hallway must be 11 cells between walls"));
    }

    let room_rows: Vec<(usize, &str)> = lines[2..]
        .iter()
        .take_while(|(_, line)| line.chars().any(|c| c != '#' && c != ' '))
        .copied()
        .collect();
    let room_size = room_rows.len();
    let mut board = Board::empty(room_size).map_err(|_| {
        malformed(
            hall_line + 1,
            format!("expected 2 or 4 room lines, found {}", room_size),
        )
    })?;

    for (index, &cell) in hallway[1..=HALLWAY_LEN].iter().enumerate() {
        if let Some(flavor) = parse_cell(Some(cell), hall_line)? {
            board.place(flavor, Position::hallway(index))?;
        }
    }

    for (slot, &(line, row)) in room_rows.iter().enumerate() {
        let cells: Vec<char> = row.chars().collect();
        for (room, &column) in ROOM_COLUMNS.iter().enumerate() {
            if let Some(flavor) = parse_cell(cells.get(column).copied(), line)? {
                board.place(flavor, Position::room(room, slot))?;
            }
        }
    }

    board.check_packed()?;
    Ok(board)
}

fn cell(slot: &Option<Flavor>) -> char {
    slot.map_or('.', Flavor::as_char)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#############")?;
        let hallway: String = self.hallway().iter().map(cell).collect();
        writeln!(f, "#{}#", hallway)?;

        for slot in 0..self.room_size() {
            let row: Vec<String> = (0..ROOM_COUNT)
                .map(|room| cell(&self.room(room)[slot]).to_string())
                .collect();
            if slot == 0 {
                writeln!(f, "###{}###", row.join("#"))?;
            } else {
                writeln!(f, "  #{}#", row.join("#"))?;
            }
        }
        write!(f, "  #########")
    }
}
