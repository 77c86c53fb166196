//! board representation - tile arena keyed by TileId plus a position index
//! ids come from a per-board counter, so clones keep allocating fresh ones

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use thiserror::Error;

use crate::tile::{can_merge, is_valid_value, MergeSource, Position, Tile, TileId};

/// Empty cells in row-major order. Never spills: a board has at most 16.
pub type EmptyCells = SmallVec<[Position; Board::CELLS]>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position {0} is off the board")]
    OutOfBounds(Position),
    #[error("position {0} is already occupied")]
    Occupied(Position),
    #[error("tile value {0} is not a power of two in 2..=131072")]
    InvalidValue(u32),
    #[error("tile id {0} appears twice")]
    DuplicateId(TileId),
}

/// 4x4 2048 board.
/// `tiles` owns the tile records; `cells` maps each position to the id standing on it.
/// The two are kept in lockstep by every mutating method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    tiles: FxHashMap<TileId, Tile>,
    cells: [[Option<TileId>; Board::SIZE]; Board::SIZE],
    next_id: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            tiles: FxHashMap::default(),
            cells: [[None; Board::SIZE]; Board::SIZE],
            next_id: 0,
        }
    }
}

impl Board {
    pub const SIZE: usize = 4;
    pub const CELLS: usize = Self::SIZE * Self::SIZE;

    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a row-major value grid, 0 meaning empty.
    pub fn from_rows(rows: [[u32; Board::SIZE]; Board::SIZE]) -> Result<Self, BoardError> {
        let mut board = Self::new();
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value != 0 {
                    board.insert(Position::new(row as u8, col as u8), value)?;
                }
            }
        }
        Ok(board)
    }

    /// Rebuild an arena from tile records, keeping their ids and annotations.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, BoardError> {
        let mut board = Self::new();
        for tile in tiles {
            if !tile.position.in_bounds() {
                return Err(BoardError::OutOfBounds(tile.position));
            }
            if !is_valid_value(tile.value) {
                return Err(BoardError::InvalidValue(tile.value));
            }
            if board.tiles.contains_key(&tile.id) {
                return Err(BoardError::DuplicateId(tile.id));
            }
            if board.cell(tile.position).is_some() {
                return Err(BoardError::Occupied(tile.position));
            }
            board.next_id = board.next_id.max(tile.id.0 + 1);
            board.place(tile);
        }
        Ok(board)
    }

    #[inline(always)]
    fn cell(&self, pos: Position) -> Option<TileId> {
        self.cells[pos.row as usize][pos.col as usize]
    }

    #[inline(always)]
    fn cell_mut(&mut self, pos: Position) -> &mut Option<TileId> {
        &mut self.cells[pos.row as usize][pos.col as usize]
    }

    fn alloc_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }

    fn place(&mut self, tile: Tile) {
        *self.cell_mut(tile.position) = Some(tile.id);
        self.tiles.insert(tile.id, tile);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.tiles.len() == Self::CELLS
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        Self::CELLS - self.tiles.len()
    }

    pub fn get(&self, pos: Position) -> Option<&Tile> {
        if !pos.in_bounds() {
            return None;
        }
        self.cell(pos).and_then(|id| self.tiles.get(&id))
    }

    /// Value at `pos`, 0 when empty.
    pub fn value_at(&self, pos: Position) -> u32 {
        self.get(pos).map_or(0, |tile| tile.value)
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        pos.in_bounds() && self.cell(pos).is_some()
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains_key(&id)
    }

    /// Tiles in arena order (unspecified).
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Tiles in row-major order.
    pub fn tiles_sorted(&self) -> Vec<&Tile> {
        Position::all().filter_map(|pos| self.get(pos)).collect()
    }

    pub fn empty_cells(&self) -> EmptyCells {
        Position::all().filter(|&pos| self.cell(pos).is_none()).collect()
    }

    /// Add a fresh tile. Its id is allocated from this board.
    pub fn insert(&mut self, pos: Position, value: u32) -> Result<TileId, BoardError> {
        if !pos.in_bounds() {
            return Err(BoardError::OutOfBounds(pos));
        }
        if !is_valid_value(value) {
            return Err(BoardError::InvalidValue(value));
        }
        if self.cell(pos).is_some() {
            return Err(BoardError::Occupied(pos));
        }
        let id = self.alloc_id();
        self.place(Tile::new(id, value, pos));
        Ok(id)
    }

    /// Insert and flag the tile as spawned this turn.
    pub fn spawn(&mut self, pos: Position, value: u32) -> Result<TileId, BoardError> {
        let id = self.insert(pos, value)?;
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.is_new = true;
        }
        Ok(id)
    }

    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let tile = self.tiles.remove(&id)?;
        *self.cell_mut(tile.position) = None;
        Some(tile)
    }

    /// Slide a tile to an empty cell, recording where it came from.
    /// Returns false if the tile is missing, already there, or `to` is taken.
    pub fn move_tile(&mut self, id: TileId, to: Position) -> bool {
        if !to.in_bounds() || self.cell(to).is_some() {
            return false;
        }
        let Some(tile) = self.tiles.get_mut(&id) else {
            return false;
        };
        let from = tile.position;
        if from == to {
            return false;
        }
        tile.previous_position = Some(from);
        tile.position = to;
        *self.cell_mut(from) = None;
        *self.cell_mut(to) = Some(id);
        true
    }

    /// Replace `source` and `target` with one new tile of their summed value
    /// on `target`'s cell. The result gets a fresh id.
    /// Returns `None`, leaving the board as is, when the values differ or
    /// the sum would leave the legal range.
    pub fn merge_into(&mut self, source: TileId, target: TileId) -> Option<TileId> {
        if source == target {
            return None;
        }
        let (a, b) = (self.tiles.get(&source)?.value, self.tiles.get(&target)?.value);
        if a != b || !can_merge(a) {
            return None;
        }
        let src = self.remove(source)?;
        let dst = self.remove(target)?;
        let id = self.alloc_id();
        let mut merged = Tile::new(id, src.value * 2, dst.position);
        merged.merged_from = Some([
            MergeSource {
                id: src.id,
                position: src.position,
            },
            MergeSource {
                id: dst.id,
                position: dst.position,
            },
        ]);
        self.place(merged);
        Some(id)
    }

    pub fn clear_annotations(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.clear_annotations();
        }
    }

    /// Drop every tile. The id counter keeps running.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.cells = [[None; Self::SIZE]; Self::SIZE];
    }

    /// First maximal tile in row-major order.
    pub fn max_tile(&self) -> Option<&Tile> {
        self.tiles_sorted()
            .into_iter()
            .fold(None, |best: Option<&Tile>, tile| match best {
                Some(b) if b.value >= tile.value => Some(b),
                _ => Some(tile),
            })
    }

    pub fn max_value(&self) -> u32 {
        self.tiles.values().map(|t| t.value).max().unwrap_or(0)
    }

    pub fn total_value(&self) -> u64 {
        self.tiles.values().map(|t| t.value as u64).sum()
    }

    /// Any tile equal to its right or down neighbour and still below the cap.
    pub fn has_adjacent_equal(&self) -> bool {
        self.tiles.values().filter(|t| can_merge(t.value)).any(|tile| {
            [(0, 1), (1, 0)].into_iter().any(|(dr, dc)| {
                tile.position
                    .offset(dr, dc)
                    .and_then(|pos| self.get(pos))
                    .is_some_and(|n| n.value == tile.value)
            })
        })
    }

    /// Row-major value grid, 0 meaning empty.
    pub fn values(&self) -> [[u32; Board::SIZE]; Board::SIZE] {
        let mut grid = [[0u32; Self::SIZE]; Self::SIZE];
        for tile in self.tiles.values() {
            grid[tile.position.row as usize][tile.position.col as usize] = tile.value;
        }
        grid
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.tiles_sorted().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tiles: Vec<Tile> = Vec::deserialize(deserializer)?;
        Board::from_tiles(tiles).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.values() {
            for value in row {
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
