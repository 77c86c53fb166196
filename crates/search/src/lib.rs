//! twenty48 search crate - greedy move advisor and auto play.

mod advisor;
mod autoplay;
mod selfplay;

pub use advisor::MoveAdvisor;
pub use autoplay::{AutoPlayer, AutoRun, AutoStep, StopReason};
pub use selfplay::{play_game, play_games, GameSummary};
