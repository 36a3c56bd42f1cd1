//! Burrow representation: pods, positions, rooms and the hallway.
//!
//! The layout types deserialize directly from the JSON accepted by the CLI.
//! Room slots are numbered from the hallway down: slot 0 sits right below the
//! exit, slot `room_size - 1` is the back wall.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{BurrowError, BurrowResult};

pub const ROOM_COUNT: usize = 4;
pub const HALLWAY_LEN: usize = 11;

/// Hallway cells directly above rooms 0..3
pub const ROOM_EXITS: [usize; ROOM_COUNT] = [2, 4, 6, 8];

/// Pods spliced into slots 1 and 2 of each room when a burrow is unfolded
const UNFOLDED_ROWS: [[Flavor; 2]; ROOM_COUNT] = [
    [Flavor::D, Flavor::D],
    [Flavor::C, Flavor::B],
    [Flavor::B, Flavor::A],
    [Flavor::A, Flavor::C],
];

/// Check whether a hallway cell is an exit (never a resting place)
pub fn is_exit(index: usize) -> bool {
    ROOM_EXITS.contains(&index)
}

/// Amphipod flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Flavor {
    A,
    B,
    C,
    D,
}

impl Flavor {
    pub const ALL: [Flavor; ROOM_COUNT] = [Flavor::A, Flavor::B, Flavor::C, Flavor::D];

    /// Energy spent per step
    pub fn unit_cost(self) -> u32 {
        match self {
            Flavor::A => 1,
            Flavor::B => 10,
            Flavor::C => 100,
            Flavor::D => 1000,
        }
    }

    /// Index of the room this flavor belongs in
    pub fn target_room(self) -> usize {
        match self {
            Flavor::A => 0,
            Flavor::B => 1,
            Flavor::C => 2,
            Flavor::D => 3,
        }
    }

    /// The flavor a room is reserved for.
    ///
    /// # Panics
    /// Panics if `room >= ROOM_COUNT`.
    pub fn for_room(room: usize) -> Flavor {
        Self::ALL[room]
    }

    pub fn as_char(self) -> char {
        match self {
            Flavor::A => 'A',
            Flavor::B => 'B',
            Flavor::C => 'C',
            Flavor::D => 'D',
        }
    }
}

impl TryFrom<char> for Flavor {
    type Error = BurrowError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Flavor::A),
            'B' => Ok(Flavor::B),
            'C' => Ok(Flavor::C),
            'D' => Ok(Flavor::D),
            _ => Err(BurrowError::InvalidFlavor(c)),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A cell of the burrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Position {
    Room { room: usize, slot: usize },
    Hallway { index: usize },
}

impl Position {
    pub fn room(room: usize, slot: usize) -> Self {
        Position::Room { room, slot }
    }

    pub fn hallway(index: usize) -> Self {
        Position::Hallway { index }
    }

    /// Hallway column of this position (room slots map to their exit)
    pub fn column(self) -> usize {
        match self {
            Position::Room { room, .. } => ROOM_EXITS[room],
            Position::Hallway { index } => index,
        }
    }

    /// Steps between this position and the hallway
    pub fn depth(self) -> usize {
        match self {
            Position::Room { slot, .. } => slot + 1,
            Position::Hallway { .. } => 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Room { room, slot } => write!(f, "room {} slot {}", room, slot),
            Position::Hallway { index } => write!(f, "hallway {}", index),
        }
    }
}

/// Relocation of a single pod
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// A pod in a JSON layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub flavor: Flavor,
    pub position: Position,
}

impl Placement {
    pub fn new(flavor: Flavor, position: Position) -> Self {
        Self { flavor, position }
    }
}

/// The complete starting layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurrowConfig {
    #[serde(rename = "roomSize")]
    pub room_size: usize,
    pub placements: Vec<Placement>,
}

/// Rooms plus hallway. Cloning copies every slot, so a clone can be mutated
/// without touching the board it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    room_size: usize,
    rooms: [Vec<Option<Flavor>>; ROOM_COUNT],
    hallway: [Option<Flavor>; HALLWAY_LEN],
}

impl Board {
    /// Create a board with no pods
    pub fn empty(room_size: usize) -> BurrowResult<Self> {
        if room_size != 2 && room_size != 4 {
            return Err(BurrowError::InvalidRoomSize(room_size));
        }
        Ok(Self {
            room_size,
            rooms: std::array::from_fn(|_| vec![None; room_size]),
            hallway: [None; HALLWAY_LEN],
        })
    }

    /// Create a board from a list of placements
    pub fn new(room_size: usize, placements: &[Placement]) -> BurrowResult<Self> {
        let mut board = Self::empty(room_size)?;
        for placement in placements {
            board.place(placement.flavor, placement.position)?;
        }
        board.check_packed()?;
        Ok(board)
    }

    /// Rooms fill from the back wall: an occupied slot must not sit above an
    /// empty one.
    pub fn check_packed(&self) -> BurrowResult<()> {
        for (room, slots) in self.rooms.iter().enumerate() {
            if let Some(slot) = slots
                .windows(2)
                .position(|pair| pair[0].is_some() && pair[1].is_none())
            {
                return Err(BurrowError::FloatingPod(Position::room(room, slot)));
            }
        }
        Ok(())
    }

    pub fn from_config(config: &BurrowConfig) -> BurrowResult<Self> {
        Self::new(config.room_size, &config.placements)
    }

    /// Create a board with every room filled with its own flavor
    pub fn solved(room_size: usize) -> BurrowResult<Self> {
        let mut board = Self::empty(room_size)?;
        for (room, slots) in board.rooms.iter_mut().enumerate() {
            slots.fill(Some(Flavor::for_room(room)));
        }
        Ok(board)
    }

    /// Put a pod on an empty, valid cell. Room packing is only checked by
    /// `new` and `check_packed`.
    pub fn place(&mut self, flavor: Flavor, position: Position) -> BurrowResult<()> {
        if let Position::Hallway { index } = position {
            if index < HALLWAY_LEN && is_exit(index) {
                return Err(BurrowError::RestingOnExit(index));
            }
        }
        let slot = self
            .slot_mut(position)
            .ok_or(BurrowError::OutOfBounds(position))?;
        if slot.is_some() {
            return Err(BurrowError::DuplicatePosition(position));
        }
        *slot = Some(flavor);
        Ok(())
    }

    pub fn room_size(&self) -> usize {
        self.room_size
    }

    pub fn room(&self, room: usize) -> &[Option<Flavor>] {
        &self.rooms[room]
    }

    pub fn hallway(&self) -> &[Option<Flavor>; HALLWAY_LEN] {
        &self.hallway
    }

    /// Pod at a position (`None` for empty or out-of-range cells)
    pub fn get(&self, position: Position) -> Option<Flavor> {
        match position {
            Position::Room { room, slot } => self
                .rooms
                .get(room)
                .and_then(|slots| slots.get(slot))
                .copied()
                .flatten(),
            Position::Hallway { index } => self.hallway.get(index).copied().flatten(),
        }
    }

    pub(crate) fn slot_mut(&mut self, position: Position) -> Option<&mut Option<Flavor>> {
        match position {
            Position::Room { room, slot } => {
                self.rooms.get_mut(room).and_then(|slots| slots.get_mut(slot))
            }
            Position::Hallway { index } => self.hallway.get_mut(index),
        }
    }

    /// Count pods anywhere on the board
    pub fn pod_count(&self) -> usize {
        self.rooms
            .iter()
            .flatten()
            .chain(self.hallway.iter())
            .filter(|slot| slot.is_some())
            .count()
    }

    /// Every slot of every room holds that room's flavor
    pub fn is_solved(&self) -> bool {
        self.rooms.iter().enumerate().all(|(room, slots)| {
            let flavor = Flavor::for_room(room);
            slots.iter().all(|slot| *slot == Some(flavor))
        })
    }

    /// A room is open when every occupant already belongs there.
    ///
    /// The room queries below take a room index and panic if it is not below
    /// `ROOM_COUNT`.
    pub fn is_open(&self, room: usize) -> bool {
        let flavor = Flavor::for_room(room);
        self.rooms[room]
            .iter()
            .all(|slot| slot.map_or(true, |pod| pod == flavor))
    }

    /// Topmost occupied slot of a room
    pub fn exposed_slot(&self, room: usize) -> Option<usize> {
        self.rooms[room].iter().position(|slot| slot.is_some())
    }

    /// Deepest empty slot a pod can reach from the exit, i.e. the one right
    /// above the topmost pod
    pub fn deepest_free_slot(&self, room: usize) -> Option<usize> {
        match self.exposed_slot(room) {
            Some(top) => top.checked_sub(1),
            None => Some(self.room_size - 1),
        }
    }

    fn is_room_unsolved(&self, room: usize) -> bool {
        let flavor = Flavor::for_room(room);
        match self.exposed_slot(room) {
            Some(top) => self.rooms[room][top..]
                .iter()
                .any(|slot| *slot != Some(flavor)),
            None => false,
        }
    }

    /// Rooms holding a pod that still has to leave. Scanning from the topmost
    /// pod to the back wall, a gap or a foreign flavor flags the room.
    pub fn unsolved_rooms(&self) -> SmallVec<[usize; ROOM_COUNT]> {
        (0..ROOM_COUNT)
            .filter(|&room| self.is_room_unsolved(room))
            .collect()
    }

    /// Hallway cells after `from` up to and including `to` are all empty
    pub fn is_path_clear(&self, from: usize, to: usize) -> bool {
        let cells = if from < to {
            &self.hallway[from + 1..=to]
        } else {
            &self.hallway[to..from]
        };
        cells.iter().all(|slot| slot.is_none())
    }

    /// Memo key: rooms in order (slot 0 first), then the hallway. One
    /// character per slot, `.` for empty.
    pub fn canonical_key(&self) -> String {
        let mut key = String::with_capacity(ROOM_COUNT * self.room_size + HALLWAY_LEN);
        for slot in self.rooms.iter().flatten().chain(self.hallway.iter()) {
            key.push(slot.map_or('.', Flavor::as_char));
        }
        key
    }

    /// Build the deep variant: slot 0 stays on top, slot 1 moves to the back
    /// wall and the fixed rows are inserted between them. A room whose back
    /// slot is empty would leave the inserted pods floating and is rejected.
    pub fn unfold(&self) -> BurrowResult<Board> {
        if self.room_size != 2 {
            return Err(BurrowError::CannotUnfold(self.room_size));
        }
        let mut unfolded = Board::empty(4)?;
        for (room, slots) in unfolded.rooms.iter_mut().enumerate() {
            let [upper, lower] = UNFOLDED_ROWS[room];
            *slots = vec![
                self.rooms[room][0],
                Some(upper),
                Some(lower),
                self.rooms[room][1],
            ];
        }
        unfolded.hallway = self.hallway;
        unfolded.check_packed()?;
        Ok(unfolded)
    }
}
