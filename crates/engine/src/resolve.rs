use twenty48_core::{can_merge, Board, Direction};

use crate::traversal::{farthest_position, Traversal};

/// Result of sliding a board one way, before any tile is spawned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub board: Board,
    pub moved: bool,
    pub score_gain: u32,
}

/// Resolve a move against a copy of `board`. The input is left untouched.
pub fn resolve(board: &Board, direction: Direction) -> Resolution {
    let mut next = board.clone();
    let (moved, score_gain) = resolve_mut(&mut next, direction);
    Resolution {
        board: next,
        moved,
        score_gain,
    }
}

/// Resolve a move in place, returns (moved, score gained from merges).
/// Clears last move's annotations first, then visits cells in traversal order.
/// A tile produced by a merge this move never merges again, and tiles at
/// the value cap never merge.
pub fn resolve_mut(board: &mut Board, direction: Direction) -> (bool, u32) {
    board.clear_annotations();

    let traversal = Traversal::for_direction(direction);
    let mut moved = false;
    let mut score_gain = 0u32;

    for pos in traversal.positions() {
        let Some(tile) = board.get(pos) else {
            continue;
        };
        let (id, value) = (tile.id, tile.value);
        let (farthest, next) = farthest_position(board, pos, direction);

        let target = next
            .and_then(|p| board.get(p))
            .filter(|other| other.value == value && can_merge(value) && !other.is_merged())
            .map(|other| other.id);

        match target {
            Some(target) => {
                if board.merge_into(id, target).is_some() {
                    score_gain += value * 2;
                    moved = true;
                }
            }
            None => {
                if board.move_tile(id, farthest) {
                    moved = true;
                }
            }
        }
    }

    (moved, score_gain)
}

/// Directions that would change `board`, in `Direction::ALL` order.
pub fn legal_directions(board: &Board) -> impl Iterator<Item = Direction> + '_ {
    Direction::ALL
        .into_iter()
        .filter(move |&dir| resolve(board, dir).moved)
}
