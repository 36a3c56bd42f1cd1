//! Minimum-energy solver for the amphipod burrow puzzle.
//!
//! Four rooms of depth 2 or 4 sit below an 11-cell hallway. Pods of flavors
//! A to D must be sorted into their rooms, each step costing 1, 10, 100 or
//! 1000 energy depending on flavor. The solver runs an A* search over board
//! states and returns the cheapest total energy together with one optimal
//! move sequence.

pub mod cost;
pub mod diagram;
pub mod error;
pub mod executor;
pub mod moves;
pub mod puzzle;
pub mod solver;

// Re-export main types
pub use cost::{heuristic, move_cost, move_steps};
pub use diagram::parse_diagram;
pub use error::{BurrowError, BurrowResult};
pub use executor::{execute_move, replay, verify_solution, ReplayResult};
pub use moves::{legal_moves, MoveList};
pub use puzzle::{
    Board, BurrowConfig, Flavor, Move, Placement, Position, HALLWAY_LEN, ROOM_COUNT, ROOM_EXITS,
};
pub use solver::{minimum_cost, solve, SolverConfig, SolverResult};
