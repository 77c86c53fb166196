use twenty48_core::{Board, Direction};
use twenty48_engine::{resolve, Game};
use twenty48_eval::{evaluate, EvalWeights};

/// Single-ply greedy move picker.
/// Every direction is resolved on a copy of the board (no spawn) and the
/// resulting position scored; the live board is never touched.
#[derive(Clone, Debug, Default)]
pub struct MoveAdvisor {
    pub weights: EvalWeights,
}

impl MoveAdvisor {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    /// Best direction, or `None` when no direction changes the board.
    /// Ties go to the earliest direction in `Direction::ALL`.
    pub fn suggest_move(&self, board: &Board) -> Option<Direction> {
        self.rank_moves(board)
            .into_iter()
            .fold(None, |best: Option<(Direction, f32)>, (dir, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((dir, score)),
            })
            .map(|(dir, _)| dir)
    }

    pub fn suggest_for(&self, game: &Game) -> Option<Direction> {
        self.suggest_move(game.board())
    }

    /// Scores of every direction that moves, in `Direction::ALL` order.
    pub fn rank_moves(&self, board: &Board) -> Vec<(Direction, f32)> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| {
                let res = resolve(board, dir);
                res.moved
                    .then(|| (dir, evaluate(&res.board, res.score_gain, &self.weights)))
            })
            .collect()
    }
}
