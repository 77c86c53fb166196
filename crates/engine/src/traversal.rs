//! Cell visiting order for a move.
//!
//! Cells nearest the destination wall are visited first, so a sliding tile
//! only ever meets tiles that have already settled this move.

use twenty48_core::{Board, Direction, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Traversal {
    pub rows: [u8; Board::SIZE],
    pub cols: [u8; Board::SIZE],
}

impl Traversal {
    pub fn for_direction(direction: Direction) -> Self {
        let (dr, dc) = direction.vector();
        Self {
            rows: axis_order(dr),
            cols: axis_order(dc),
        }
    }

    /// Positions in visiting order: rows outer, columns inner.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.rows
            .iter()
            .flat_map(move |&row| self.cols.iter().map(move |&col| Position::new(row, col)))
    }
}

fn axis_order(component: i8) -> [u8; Board::SIZE] {
    let mut order = [0u8; Board::SIZE];
    for (i, slot) in order.iter_mut().enumerate() {
        *slot = i as u8;
    }
    if component == 1 {
        order.reverse();
    }
    order
}

/// Walk from `from` along `direction` while cells are empty.
/// Returns the last empty cell reached (or `from` itself) and the first
/// cell beyond it, `None` when that would be off the board.
pub fn farthest_position(
    board: &Board,
    from: Position,
    direction: Direction,
) -> (Position, Option<Position>) {
    let (dr, dc) = direction.vector();
    let mut farthest = from;
    loop {
        match farthest.offset(dr, dc) {
            Some(next) if !board.is_occupied(next) => farthest = next,
            next => return (farthest, next),
        }
    }
}
