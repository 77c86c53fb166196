use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use twenty48_search::GameSummary;

/// Aggregate over a batch of self-played games.
#[derive(Debug, Serialize)]
pub struct Report {
    pub games: usize,
    pub mean_score: f64,
    pub best_score: u32,
    pub win_rate: f64,
    pub mean_moves: f64,
    /// Max tile reached -> number of games.
    pub max_tiles: BTreeMap<u32, usize>,
}

impl Report {
    pub fn from_summaries(summaries: &[GameSummary]) -> Self {
        let games = summaries.len();
        let mut max_tiles = BTreeMap::new();
        for s in summaries {
            *max_tiles.entry(s.max_tile).or_insert(0) += 1;
        }
        let denom = games.max(1) as f64;
        Self {
            games,
            mean_score: summaries.iter().map(|s| s.score as f64).sum::<f64>() / denom,
            best_score: summaries.iter().map(|s| s.score).max().unwrap_or(0),
            win_rate: summaries.iter().filter(|s| s.won).count() as f64 / denom,
            mean_moves: summaries.iter().map(|s| s.moves as f64).sum::<f64>() / denom,
            max_tiles,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "games:      {}", self.games)?;
        writeln!(f, "mean score: {:.1}", self.mean_score)?;
        writeln!(f, "best score: {}", self.best_score)?;
        writeln!(f, "win rate:   {:.1}%", self.win_rate * 100.0)?;
        writeln!(f, "mean moves: {:.1}", self.mean_moves)?;
        writeln!(f, "max tile:")?;
        for (tile, count) in self.max_tiles.iter().rev() {
            let share = *count as f64 / self.games.max(1) as f64 * 100.0;
            writeln!(f, "  {tile:>6}  {count:>5}  {share:5.1}%")?;
        }
        Ok(())
    }
}
