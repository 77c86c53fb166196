//! Dense value snapshot of a board for fast evaluation

use crate::{Board, Position};

/// Row-major value grid, 0 for empty cells.
/// Use for eval/heuristics - tile identity is not kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueGrid {
    values: [[u32; Board::SIZE]; Board::SIZE],
    occupied: usize,
}

impl ValueGrid {
    pub fn new(board: &Board) -> Self {
        Self {
            values: board.values(),
            occupied: board.len(),
        }
    }

    #[inline(always)]
    pub fn at(&self, pos: Position) -> u32 {
        self.values[pos.row as usize][pos.col as usize]
    }

    #[inline(always)]
    pub fn empty_count(&self) -> usize {
        Board::CELLS - self.occupied
    }

    pub fn row(&self, row: usize) -> [u32; Board::SIZE] {
        self.values[row]
    }

    pub fn column(&self, col: usize) -> [u32; Board::SIZE] {
        let mut line = [0u32; Board::SIZE];
        for (row, value) in line.iter_mut().enumerate() {
            *value = self.values[row][col];
        }
        line
    }

    /// Every row then every column, each read top-to-bottom or left-to-right.
    pub fn lines(&self) -> impl Iterator<Item = [u32; Board::SIZE]> + '_ {
        (0..Board::SIZE)
            .map(|r| self.row(r))
            .chain((0..Board::SIZE).map(|c| self.column(c)))
    }
}

impl From<&Board> for ValueGrid {
    fn from(board: &Board) -> Self {
        Self::new(board)
    }
}
