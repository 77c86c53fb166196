use rand::Rng;
use twenty48_core::{Board, Position, TileId};

/// Value of a freshly spawned tile: 4 with probability `four_probability`, else 2.
pub fn spawn_value<R: Rng + ?Sized>(rng: &mut R, four_probability: f64) -> u32 {
    if rng.gen::<f64>() < four_probability {
        4
    } else {
        2
    }
}

/// Drop one new tile into a uniformly chosen empty cell.
/// Returns `None` without touching the board when it is full.
pub fn spawn_random<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    four_probability: f64,
) -> Option<TileId> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }
    let pos: Position = empty[rng.gen_range(0..empty.len())];
    let value = spawn_value(rng, four_probability);
    board.spawn(pos, value).ok()
}
