//! twenty48 core crate - fundamental types for the 2048 engine.

mod board;
mod direction;
mod grid;
mod state;
mod tile;

pub use board::{Board, BoardError, EmptyCells};
pub use direction::{Direction, ParseDirectionError};
pub use grid::ValueGrid;
pub use state::{GameStatus, Phase};
pub use tile::{can_merge, is_valid_value, MergeSource, Position, Tile, TileId, MAX_TILE_VALUE};
