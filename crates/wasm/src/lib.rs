//! twenty48-wasm - WebAssembly entry points and bindings for browser hosts.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use twenty48_core::{Board, Direction, GameStatus, Position, Tile};
use twenty48_engine::{EngineError, Game, GameConfig, MoveOutcome};
use twenty48_eval::{evaluate, EvalBreakdown, EvalWeights};
use twenty48_search::MoveAdvisor;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Tile as seen by the renderer.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsTile {
    pub id: u32,
    pub value: u32,
    pub row: u8,
    pub col: u8,
    pub previous_row: Option<u8>,
    pub previous_col: Option<u8>,
    /// Ids of the two tiles this one replaced.
    pub merged_from: Option<[u32; 2]>,
    pub is_new: bool,
}

impl From<&Tile> for JsTile {
    fn from(t: &Tile) -> Self {
        Self {
            id: t.id.0,
            value: t.value,
            row: t.position.row,
            col: t.position.col,
            previous_row: t.previous_position.map(|p| p.row),
            previous_col: t.previous_position.map(|p| p.col),
            merged_from: t.merged_from.map(|[a, b]| [a.id.0, b.id.0]),
            is_new: t.is_new,
        }
    }
}

/// Minimal tile shape accepted from the host.
#[derive(Deserialize)]
pub struct JsCell {
    pub row: u8,
    pub col: u8,
    pub value: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsMoveOutcome {
    pub moved: bool,
    pub score_gain: u32,
    pub won: bool,
    pub game_over: bool,
}

impl From<MoveOutcome> for JsMoveOutcome {
    fn from(o: MoveOutcome) -> Self {
        Self {
            moved: o.moved,
            score_gain: o.score_gain,
            won: o.won,
            game_over: o.game_over,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsGameStatus {
    pub won: bool,
    pub game_over: bool,
}

impl From<GameStatus> for JsGameStatus {
    fn from(s: GameStatus) -> Self {
        Self {
            won: s.won,
            game_over: s.game_over,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct JsRankedMove {
    pub direction: String,
    pub score: f32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsEvalBreakdown {
    pub score_gain: u32,
    pub empty_cells: u32,
    pub monotonicity: u32,
    pub corner: u32,
    pub merge_potential: u32,
    pub total: f32,
}

#[wasm_bindgen]
pub struct JsGame {
    inner: Game,
    advisor: MoveAdvisor,
}

#[wasm_bindgen]
impl JsGame {
    /// Classic game. Without a seed the host's `Math.random` picks one.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> Self {
        Self {
            inner: Game::classic(seed_or_random(seed)),
            advisor: MoveAdvisor::default(),
        }
    }

    /// Resume from 16 row-major values, 0 for an empty cell.
    #[wasm_bindgen(js_name = fromValues)]
    pub fn from_values(values: &[u32], score: u32, seed: Option<f64>) -> Result<JsGame, JsError> {
        if values.len() != Board::CELLS {
            return Err(JsError::new(&format!(
                "expected {} values, got {}",
                Board::CELLS,
                values.len()
            )));
        }
        let mut rows = [[0u32; Board::SIZE]; Board::SIZE];
        for (i, &value) in values.iter().enumerate() {
            rows[i / Board::SIZE][i % Board::SIZE] = value;
        }
        let board = Board::from_rows(rows).map_err(EngineError::from)?;
        let inner = Game::from_board(board, score, GameConfig::classic(), seed_or_random(seed))?;
        Ok(Self {
            inner,
            advisor: MoveAdvisor::default(),
        })
    }

    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, direction: &str) -> Result<JsValue, JsError> {
        let dir = parse_direction(direction)?;
        to_js(&JsMoveOutcome::from(self.inner.apply_move(dir)))
    }

    #[wasm_bindgen(js_name = beginMove)]
    pub fn begin_move(&mut self, direction: &str) -> Result<JsValue, JsError> {
        let dir = parse_direction(direction)?;
        to_js(&JsMoveOutcome::from(self.inner.begin_move(dir)))
    }

    /// Spawn step of a phased move. Returns `{won, gameOver}` after the spawn.
    #[wasm_bindgen(js_name = finishMove)]
    pub fn finish_move(&mut self) -> Result<JsValue, JsError> {
        to_js(&JsGameStatus::from(self.inner.finish_move()))
    }

    #[wasm_bindgen(js_name = suggestMove)]
    pub fn suggest_move(&self) -> Option<String> {
        self.advisor
            .suggest_for(&self.inner)
            .map(|dir| dir.as_str().to_string())
    }

    #[wasm_bindgen(js_name = rankMoves)]
    pub fn rank_moves(&self) -> Result<JsValue, JsError> {
        let ranked: Vec<JsRankedMove> = self
            .advisor
            .rank_moves(self.inner.board())
            .into_iter()
            .map(|(dir, score)| JsRankedMove {
                direction: dir.as_str().to_string(),
                score,
            })
            .collect();
        to_js(&ranked)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn tiles(&self) -> Result<JsValue, JsError> {
        let tiles: Vec<JsTile> = self.inner.tiles().into_iter().map(JsTile::from).collect();
        to_js(&tiles)
    }

    /// Row-major cell values, 0 for empty.
    pub fn values(&self) -> Vec<u32> {
        self.inner.board().values().concat()
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.inner.score()
    }

    #[wasm_bindgen(getter, js_name = bestScore)]
    pub fn best_score(&self) -> u32 {
        self.inner.best_score()
    }

    /// Hand back a persisted best score. Lower values are ignored.
    #[wasm_bindgen(js_name = setBestScore)]
    pub fn set_best_score(&mut self, value: u32) {
        self.inner.restore_best_score(value);
    }

    #[wasm_bindgen(getter)]
    pub fn won(&self) -> bool {
        self.inner.status().won
    }

    #[wasm_bindgen(getter, js_name = gameOver)]
    pub fn game_over(&self) -> bool {
        self.inner.status().game_over
    }

    #[wasm_bindgen(getter, js_name = isResolving)]
    pub fn is_resolving(&self) -> bool {
        self.inner.is_resolving()
    }
}

/// Heuristic value of a position given as `[{row, col, value}, ...]`.
#[wasm_bindgen(js_name = evaluateBoard)]
pub fn evaluate_board(tiles: JsValue) -> Result<f32, JsError> {
    let board = board_from_cells(tiles)?;
    Ok(evaluate(&board, 0, &EvalWeights::default()))
}

/// Per-term heuristic breakdown for a position, plus the weighted total.
#[wasm_bindgen(js_name = explainBoard)]
pub fn explain_board(tiles: JsValue) -> Result<JsValue, JsError> {
    let board = board_from_cells(tiles)?;
    let weights = EvalWeights::default();
    let terms = EvalBreakdown::of(&board, 0);
    to_js(&JsEvalBreakdown {
        score_gain: terms.score_gain,
        empty_cells: terms.empty_cells,
        monotonicity: terms.monotonicity,
        corner: terms.corner,
        merge_potential: terms.merge_potential,
        total: terms.weighted(&weights),
    })
}

fn board_from_cells(tiles: JsValue) -> Result<Board, JsError> {
    let cells: Vec<JsCell> =
        serde_wasm_bindgen::from_value(tiles).map_err(|e| JsError::new(&e.to_string()))?;
    let mut board = Board::new();
    for cell in cells {
        board
            .insert(Position::new(cell.row, cell.col), cell.value)
            .map_err(EngineError::from)?;
    }
    Ok(board)
}

fn parse_direction(direction: &str) -> Result<Direction, EngineError> {
    Ok(direction.parse::<Direction>()?)
}

fn seed_or_random(seed: Option<f64>) -> u64 {
    match seed {
        Some(seed) => seed as u64,
        None => (js_sys::Math::random() * (1u64 << 53) as f64) as u64,
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}
