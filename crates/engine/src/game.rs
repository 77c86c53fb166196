//! Live game session: owns the board, score and rng for one player.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use twenty48_core::{Board, Direction, GameStatus, Phase, Tile};

use crate::best::BestScore;
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::resolve::{resolve, Resolution};
use crate::spawn::spawn_random;
use crate::terminal::evaluate_status;

/// What a move request did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub moved: bool,
    pub score_gain: u32,
    pub won: bool,
    pub game_over: bool,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    score: u32,
    best: BestScore,
    status: GameStatus,
    phase: Phase,
    config: GameConfig,
    rng: StdRng,
}

impl Game {
    /// New game with the configured number of starting tiles.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::start(config, seed))
    }

    pub fn classic(seed: u64) -> Self {
        Self::start(GameConfig::classic(), seed)
    }

    /// Resume from an existing board. Nothing is spawned.
    pub fn from_board(
        board: Board,
        score: u32,
        config: GameConfig,
        seed: u64,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let status = evaluate_status(&board, config.win_value);
        Ok(Self {
            board,
            score,
            best: BestScore::new(score),
            status,
            phase: Phase::Idle,
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn start(config: GameConfig, seed: u64) -> Self {
        let mut game = Self {
            board: Board::new(),
            score: 0,
            best: BestScore::default(),
            status: GameStatus::default(),
            phase: Phase::Idle,
            config,
            rng: StdRng::seed_from_u64(seed),
        };
        game.spawn_initial();
        game
    }

    fn spawn_initial(&mut self) {
        for _ in 0..self.config.initial_tiles {
            spawn_random(&mut self.board, &mut self.rng, self.config.four_probability);
        }
        self.status = evaluate_status(&self.board, self.config.win_value);
    }

    fn noop_outcome(&self) -> MoveOutcome {
        MoveOutcome {
            moved: false,
            score_gain: 0,
            won: self.status.won,
            game_over: self.status.game_over,
        }
    }

    /// Resolve, spawn and evaluate in one step.
    /// Ignored (no-op outcome) while a phased move is still resolving.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.phase == Phase::Resolving {
            debug!("move {direction} ignored while resolving");
            return self.noop_outcome();
        }
        let mut outcome = self.begin_move(direction);
        if outcome.moved {
            let status = self.finish_move();
            outcome.won = status.won;
            outcome.game_over = status.game_over;
        }
        outcome
    }

    /// First half of a move: slide, merge and score.
    /// On a real move the game enters `Resolving` until `finish_move`;
    /// the returned flags are the ones from before this move.
    pub fn begin_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.phase == Phase::Resolving {
            debug!("move {direction} ignored while resolving");
            return self.noop_outcome();
        }

        let Resolution {
            board,
            moved,
            score_gain,
        } = resolve(&self.board, direction);
        if !moved {
            // annotations belong to the previous move whether or not this one slides
            self.board.clear_annotations();
            return self.noop_outcome();
        }

        self.board = board;
        self.score = self.score.saturating_add(score_gain);
        if self.best.observe(self.score) {
            debug!("new best score {}", self.score);
        }
        self.phase = Phase::Resolving;
        debug!(
            "resolved {direction}: +{score_gain}, score {}, {} tiles",
            self.score,
            self.board.len()
        );

        MoveOutcome {
            moved: true,
            score_gain,
            won: self.status.won,
            game_over: self.status.game_over,
        }
    }

    /// Second half of a move: spawn one tile and re-evaluate terminal flags.
    /// Does nothing when no move is pending.
    pub fn finish_move(&mut self) -> GameStatus {
        if self.phase == Phase::Idle {
            return self.status;
        }

        spawn_random(&mut self.board, &mut self.rng, self.config.four_probability);

        let before = self.status;
        self.status = evaluate_status(&self.board, self.config.win_value);
        if self.status.won && !before.won {
            info!(
                "reached {} with score {}",
                self.config.win_value, self.score
            );
        }
        if self.status.game_over && !before.game_over {
            info!(
                "game over: score {}, max tile {}",
                self.score,
                self.board.max_value()
            );
        }
        self.phase = Phase::Idle;
        self.status
    }

    /// Start over. Best score carries across.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.status = GameStatus::default();
        self.phase = Phase::Idle;
        self.spawn_initial();
        info!("new game, best score {}", self.best.get());
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current tiles in row-major order.
    pub fn tiles(&self) -> Vec<&Tile> {
        self.board.tiles_sorted()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best.get()
    }

    /// Feed a persisted best score back in. Lower values are ignored.
    pub fn restore_best_score(&mut self, value: u32) {
        self.best.observe(value);
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_resolving(&self) -> bool {
        self.phase == Phase::Resolving
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty48_core::Position;

    fn game_from(rows: [[u32; 4]; 4]) -> Game {
        let board = Board::from_rows(rows).expect("valid rows");
        Game::from_board(board, 0, GameConfig::classic(), 7).expect("valid game")
    }

    #[test]
    fn test_new_game_has_initial_tiles() {
        let game = Game::classic(1);
        assert_eq!(game.board().len(), 2);
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.tiles().iter().all(|t| t.is_new));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig::classic().with_win_value(3);
        assert!(Game::new(config, 0).is_err());
    }

    #[test]
    fn test_apply_move_scores_and_spawns() {
        let mut game = game_from([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
        let outcome = game.apply_move(Direction::Left);
        assert!(outcome.moved);
        assert_eq!(outcome.score_gain, 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.best_score(), 4);
        // two tiles after the merge plus one spawn
        assert_eq!(game.board().len(), 3);
        assert_eq!(game.phase(), Phase::Idle);
        let row = game.board().values()[0];
        assert_eq!(&row[..2], &[4, 4]);
    }

    #[test]
    fn test_noop_move_changes_nothing() {
        let mut game = game_from([[4, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = game.board().clone();
        let outcome = game.apply_move(Direction::Left);
        assert!(!outcome.moved);
        assert_eq!(outcome.score_gain, 0);
        assert_eq!(game.board(), &before);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_noop_move_clears_last_annotations() {
        use twenty48_core::{MergeSource, TileId};

        // state right after a move: a merged 4 in the corner and a fresh spawn
        let mut merged = Tile::new(TileId(2), 4, Position::new(0, 0));
        merged.merged_from = Some([
            MergeSource { id: TileId(0), position: Position::new(0, 1) },
            MergeSource { id: TileId(1), position: Position::new(0, 0) },
        ]);
        let spawned = Tile::new(TileId(3), 2, Position::new(1, 0)).spawned();
        let board = Board::from_tiles(vec![merged, spawned]).expect("valid tiles");
        let mut game =
            Game::from_board(board, 4, GameConfig::classic(), 7).expect("valid game");

        let outcome = game.apply_move(Direction::Left);
        assert!(!outcome.moved);
        assert_eq!(game.score(), 4);
        assert_eq!(game.board().len(), 2);
        assert!(game
            .tiles()
            .iter()
            .all(|t| !t.is_new && !t.is_merged() && t.previous_position.is_none()));
    }

    #[test]
    fn test_noop_while_resolving_keeps_annotations() {
        let mut game = game_from([[0, 0, 2, 2], [0; 4], [0; 4], [0; 4]]);
        assert!(game.begin_move(Direction::Left).moved);
        let before = game.board().clone();
        assert!(!game.apply_move(Direction::Left).moved);
        assert_eq!(game.board(), &before);
        assert!(game.tiles()[0].is_merged());
    }

    #[test]
    fn test_capped_tiles_end_the_game() {
        use twenty48_core::MAX_TILE_VALUE;
        let m = MAX_TILE_VALUE;
        let game = game_from([
            [m, m, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(game.status().won);
        assert!(game.status().game_over);
    }

    #[test]
    fn test_resolving_ignores_moves() {
        let mut game = game_from([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let first = game.begin_move(Direction::Left);
        assert!(first.moved);
        assert!(game.is_resolving());
        let snapshot = game.board().clone();

        assert!(!game.apply_move(Direction::Right).moved);
        assert!(!game.begin_move(Direction::Down).moved);
        assert_eq!(game.board(), &snapshot);

        game.finish_move();
        assert!(!game.is_resolving());
        assert_eq!(game.board().len(), 2);
        assert!(game.apply_move(Direction::Right).moved);
    }

    #[test]
    fn test_finish_move_when_idle_is_noop() {
        let mut game = game_from([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = game.board().clone();
        game.finish_move();
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_win_reported_but_play_continues() {
        let mut game = game_from([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let outcome = game.apply_move(Direction::Left);
        assert!(outcome.won);
        assert!(!outcome.game_over);
        assert!(game.status().won);
        assert!(game.board().values()[0][0] == 2048);

        // row 0 holds at most two tiles, so sliding right always moves
        assert!(game.apply_move(Direction::Right).moved);
        assert!(game.status().won);
    }

    #[test]
    fn test_reset_keeps_best() {
        let mut game = game_from([[8, 8, 0, 0], [0; 4], [0; 4], [0; 4]]);
        game.apply_move(Direction::Left);
        assert_eq!(game.best_score(), 16);
        game.reset();
        assert_eq!(game.score(), 0);
        assert_eq!(game.best_score(), 16);
        assert_eq!(game.board().len(), 2);
        assert_eq!(game.status(), GameStatus::default());
    }

    #[test]
    fn test_restore_best_never_lowers() {
        let mut game = Game::classic(3);
        game.restore_best_score(500);
        game.restore_best_score(200);
        assert_eq!(game.best_score(), 500);
    }

    #[test]
    fn test_from_board_evaluates_status() {
        let game = game_from([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(game.status().game_over);
        assert!(game.board().get(Position::new(0, 0)).is_some());
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = Game::classic(99);
        let mut b = Game::classic(99);
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down].repeat(5) {
            assert_eq!(a.apply_move(dir), b.apply_move(dir));
        }
        assert_eq!(a.board().values(), b.board().values());
    }
}
