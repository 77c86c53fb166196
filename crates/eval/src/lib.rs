//! twenty48 eval crate - heuristics for board evaluation.
//!
//! A board's score is a weighted sum of five terms: merge gain, free cells,
//! row/column monotonicity, where the largest tile sits, and how many
//! equal neighbours are lined up for the next merge.

use serde::{Deserialize, Serialize};
use twenty48_core::{Board, Position, ValueGrid};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub score_gain: f32,
    pub empty_cells: f32,
    pub monotonicity: f32,
    pub corner: f32,
    pub merge_potential: f32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            score_gain: 10.0,
            empty_cells: 100.0,
            monotonicity: 50.0,
            corner: 30.0,
            merge_potential: 20.0,
        }
    }
}

/// Unweighted terms, exposed so hosts can show why a move was picked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalBreakdown {
    pub score_gain: u32,
    pub empty_cells: u32,
    pub monotonicity: u32,
    pub corner: u32,
    pub merge_potential: u32,
}

impl EvalBreakdown {
    pub fn of(board: &Board, score_gain: u32) -> Self {
        let grid = ValueGrid::new(board);
        Self {
            score_gain,
            empty_cells: grid.empty_count() as u32,
            monotonicity: monotonicity(&grid),
            corner: corner_bonus(board),
            merge_potential: merge_potential(&grid),
        }
    }

    pub fn weighted(&self, weights: &EvalWeights) -> f32 {
        self.score_gain as f32 * weights.score_gain
            + self.empty_cells as f32 * weights.empty_cells
            + self.monotonicity as f32 * weights.monotonicity
            + self.corner as f32 * weights.corner
            + self.merge_potential as f32 * weights.merge_potential
    }
}

/// Score a board reached by a move that gained `score_gain` points.
pub fn evaluate(board: &Board, score_gain: u32, weights: &EvalWeights) -> f32 {
    EvalBreakdown::of(board, score_gain).weighted(weights)
}

/// Sum over all rows and columns of max(non-decreasing pairs, non-increasing pairs).
/// Only pairs of two occupied, directly adjacent cells count.
pub fn monotonicity(grid: &ValueGrid) -> u32 {
    grid.lines().map(|line| line_monotonicity(&line)).sum()
}

fn line_monotonicity(line: &[u32]) -> u32 {
    let mut increasing = 0u32;
    let mut decreasing = 0u32;
    for pair in line.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a == 0 || b == 0 {
            continue;
        }
        if a <= b {
            increasing += 1;
        }
        if a >= b {
            decreasing += 1;
        }
    }
    increasing.max(decreasing)
}

/// 100 when the largest tile is in a corner, 50 on an edge, 0 otherwise.
/// With several largest tiles, the one `Board::max_tile` returns is used.
pub fn corner_bonus(board: &Board) -> u32 {
    match board.max_tile().map(|tile| tile.position) {
        Some(pos) if pos.is_corner() => 100,
        Some(pos) if pos.is_edge() => 50,
        _ => 0,
    }
}

/// Equal orthogonal neighbours, counted from both sides.
pub fn merge_potential(grid: &ValueGrid) -> u32 {
    let mut count = 0u32;
    for pos in Position::all() {
        let value = grid.at(pos);
        if value == 0 {
            continue;
        }
        for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            if let Some(neighbour) = pos.offset(dr, dc) {
                if grid.at(neighbour) == value {
                    count += 1;
                }
            }
        }
    }
    count
}
