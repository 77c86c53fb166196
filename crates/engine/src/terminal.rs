use twenty48_core::{Board, GameStatus};

pub fn is_won(board: &Board, win_value: u32) -> bool {
    board.tiles().any(|tile| tile.value >= win_value)
}

/// Full board with no equal orthogonal neighbours.
pub fn is_game_over(board: &Board) -> bool {
    board.is_full() && !board.has_adjacent_equal()
}

pub fn evaluate_status(board: &Board, win_value: u32) -> GameStatus {
    GameStatus::new(is_won(board, win_value), is_game_over(board))
}
