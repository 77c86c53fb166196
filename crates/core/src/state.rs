//! Game status flags and the move lifecycle phase.

use serde::{Deserialize, Serialize};

/// Advisory terminal flags. Neither one blocks further moves.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct GameStatus {
    pub won: bool,
    pub game_over: bool,
}

impl GameStatus {
    pub fn new(won: bool, game_over: bool) -> Self {
        Self { won, game_over }
    }
}

/// `Resolving` spans the window between a resolved slide and its spawn step.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    Resolving,
}
