use thiserror::Error;

use crate::puzzle::Position;

#[derive(Error, Debug)]
pub enum BurrowError {
    #[error("Invalid flavor {0:?}: expected one of A, B, C, D")]
    InvalidFlavor(char),

    #[error("Invalid room size {0}: rooms hold 2 or 4 pods")]
    InvalidRoomSize(usize),

    #[error("Position {0} is outside the burrow")]
    OutOfBounds(Position),

    #[error("Two pods placed at {0}")]
    DuplicatePosition(Position),

    #[error("Pod placed on the exit above a room (hallway {0})")]
    RestingOnExit(usize),

    #[error("Pod at {0} floats above an empty slot")]
    FloatingPod(Position),

    #[error("Malformed diagram at line {line}: {reason}")]
    MalformedDiagram { line: usize, reason: String },

    #[error("Only a room size 2 burrow can be unfolded (got {0})")]
    CannotUnfold(usize),

    #[error("No solution: frontier exhausted after {states_expanded} expansions")]
    NoSolution { states_expanded: usize },

    #[error("Search stopped after reaching the limit of {limit} expansions")]
    ExpansionLimit { limit: usize },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BurrowResult<T> = Result<T, BurrowError>;
