//! Tile and position definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Board;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Step by (dr, dc), or None when the result leaves the board.
    #[inline(always)]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row < 0 || col < 0 || row >= Board::SIZE as i8 || col >= Board::SIZE as i8 {
            return None;
        }
        Some(Self::new(row as u8, col as u8))
    }

    pub fn in_bounds(self) -> bool {
        (self.row as usize) < Board::SIZE && (self.col as usize) < Board::SIZE
    }

    pub fn is_corner(self) -> bool {
        let last = (Board::SIZE - 1) as u8;
        (self.row == 0 || self.row == last) && (self.col == 0 || self.col == last)
    }

    pub fn is_edge(self) -> bool {
        let last = (Board::SIZE - 1) as u8;
        self.row == 0 || self.row == last || self.col == 0 || self.col == last
    }

    /// Every cell, row-major.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..Board::SIZE as u8)
            .flat_map(|row| (0..Board::SIZE as u8).map(move |col| Self::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Arena key for a tile. Allocated by the owning board, never reused within it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two tiles consumed by a merge, with where it stood before the move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MergeSource {
    pub id: TileId,
    pub position: Position,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub position: Position,
    #[serde(default)]
    pub previous_position: Option<Position>,
    #[serde(default)]
    pub merged_from: Option<[MergeSource; 2]>,
    #[serde(default)]
    pub is_new: bool,
}

impl Tile {
    pub fn new(id: TileId, value: u32, position: Position) -> Self {
        Self {
            id,
            value,
            position,
            previous_position: None,
            merged_from: None,
            is_new: false,
        }
    }

    pub fn spawned(mut self) -> Self {
        self.is_new = true;
        self
    }

    pub fn is_merged(&self) -> bool {
        self.merged_from.is_some()
    }

    /// Drop per-move annotations ahead of the next move.
    pub fn clear_annotations(&mut self) {
        self.previous_position = None;
        self.merged_from = None;
        self.is_new = false;
    }
}

/// Largest tile a 4x4 board can build: 2^17, with every cell holding a
/// distinct power and a spawned 4.
pub const MAX_TILE_VALUE: u32 = 1 << 17;

/// Legal tile value: a power of two in `2..=MAX_TILE_VALUE`.
pub fn is_valid_value(value: u32) -> bool {
    (2..=MAX_TILE_VALUE).contains(&value) && value.is_power_of_two()
}

/// Two tiles of `value` may merge without leaving the legal range.
pub fn can_merge(value: u32) -> bool {
    value < MAX_TILE_VALUE
}
