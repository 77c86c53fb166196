//! Batch self-play: one advisor-driven game per seed.

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use twenty48_engine::{EngineError, Game, GameConfig};

use crate::autoplay::{AutoPlayer, StopReason};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub score: u32,
    pub max_tile: u32,
    pub moves: usize,
    pub won: bool,
    pub reason: StopReason,
}

pub fn play_game(
    config: &GameConfig,
    seed: u64,
    player: &AutoPlayer,
    max_moves: Option<usize>,
) -> Result<GameSummary, EngineError> {
    let mut game = Game::new(config.clone(), seed)?;
    let run = player.run(&mut game, max_moves);
    Ok(GameSummary {
        seed,
        score: game.score(),
        max_tile: game.board().max_value(),
        moves: run.moves,
        won: game.status().won,
        reason: run.reason,
    })
}

/// Results come back in `seeds` order.
pub fn play_games(
    config: &GameConfig,
    seeds: &[u64],
    player: &AutoPlayer,
    max_moves: Option<usize>,
) -> Result<Vec<GameSummary>, EngineError> {
    config.validate()?;

    #[cfg(feature = "rayon")]
    let results = seeds
        .par_iter()
        .map(|&seed| play_game(config, seed, player, max_moves))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let results = seeds
        .iter()
        .map(|&seed| play_game(config, seed, player, max_moves))
        .collect();

    results
}
