//! twenty48-engine - 2048 move resolution and game session.
//!
//! `resolve` is the one slide/merge algorithm; `Game` wraps it with spawning,
//! scoring and terminal detection for a live board.

pub mod best;
pub mod config;
pub mod error;
pub mod game;
pub mod resolve;
pub mod spawn;
pub mod terminal;
pub mod traversal;

pub use best::BestScore;
pub use config::GameConfig;
pub use error::EngineError;
pub use game::{Game, MoveOutcome};
pub use resolve::{legal_directions, resolve, resolve_mut, Resolution};
pub use spawn::{spawn_random, spawn_value};
pub use terminal::{evaluate_status, is_game_over, is_won};
pub use traversal::{farthest_position, Traversal};
