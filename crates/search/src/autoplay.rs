//! Advisor-driven auto play without timers: the host decides when to step.

use log::debug;
use serde::{Deserialize, Serialize};
use twenty48_core::Direction;
use twenty48_engine::{Game, MoveOutcome};

use crate::advisor::MoveAdvisor;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    GameOver,
    Won,
    NoMove,
    MoveLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoStep {
    Moved {
        direction: Direction,
        outcome: MoveOutcome,
    },
    /// A phased move is still pending; nothing was done.
    Busy,
    Stopped(StopReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoRun {
    pub moves: usize,
    pub reason: StopReason,
}

#[derive(Clone, Debug)]
pub struct AutoPlayer {
    pub advisor: MoveAdvisor,
    /// Stop once the win tile appears instead of playing on.
    pub stop_on_win: bool,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self {
            advisor: MoveAdvisor::default(),
            stop_on_win: true,
        }
    }
}

impl AutoPlayer {
    pub fn new(advisor: MoveAdvisor, stop_on_win: bool) -> Self {
        Self {
            advisor,
            stop_on_win,
        }
    }

    pub fn step(&self, game: &mut Game) -> AutoStep {
        if game.is_resolving() {
            return AutoStep::Busy;
        }
        let status = game.status();
        if status.game_over {
            return AutoStep::Stopped(StopReason::GameOver);
        }
        if self.stop_on_win && status.won {
            return AutoStep::Stopped(StopReason::Won);
        }
        match self.advisor.suggest_for(game) {
            Some(direction) => {
                let outcome = game.apply_move(direction);
                debug!("auto {direction}: +{} -> {}", outcome.score_gain, game.score());
                AutoStep::Moved { direction, outcome }
            }
            None => AutoStep::Stopped(StopReason::NoMove),
        }
    }

    /// Step until the game stops or `max_moves` moves have been made.
    pub fn run(&self, game: &mut Game, max_moves: Option<usize>) -> AutoRun {
        let mut moves = 0;
        loop {
            if max_moves.is_some_and(|limit| moves >= limit) {
                return AutoRun {
                    moves,
                    reason: StopReason::MoveLimit,
                };
            }
            match self.step(game) {
                AutoStep::Moved { .. } => moves += 1,
                AutoStep::Busy => {
                    game.finish_move();
                }
                AutoStep::Stopped(reason) => return AutoRun { moves, reason },
            }
        }
    }
}
