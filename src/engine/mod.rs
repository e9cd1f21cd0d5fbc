//! Engine module: the 4x4 board, the slide/merge transformation, and the
//! random tile source used between turns.
//!
//! - `Board` holds the grid with structural queries and checked cell access.
//! - `ops` applies a `Move` to a board (compact, merge, compact per line).
//! - `TileSpawner` picks where the next tile lands and what it is worth.

pub mod ops;
pub mod spawn;
pub mod state;

pub use ops::{apply, shift, MoveOutcome};
pub use spawn::TileSpawner;
pub use state::{Board, Move, SIZE};
