mod report;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use serde::Serialize;
use twenty48_engine::GameConfig;
use twenty48_search::{play_games, AutoPlayer, GameSummary, MoveAdvisor};

use report::Report;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Play 2048 games with the greedy move advisor and summarise the results"
)]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 100, value_name = "N")]
    games: usize,

    /// Seed of the first game; game i uses seed + i (defaults to wall clock)
    #[arg(long, value_name = "S")]
    seed: Option<u64>,

    /// Stop each game after this many moves
    #[arg(long, value_name = "M")]
    max_moves: Option<usize>,

    /// Keep playing past the win tile instead of stopping
    #[arg(long)]
    keep_playing: bool,

    /// Tile value that counts as a win
    #[arg(long, default_value_t = 2048, value_name = "V")]
    win_value: u32,

    /// Print per-game results and the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: &'a Report,
    games: &'a [GameSummary],
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let base_seed = match cli.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before unix epoch")?
            .as_secs(),
    };
    let seeds: Vec<u64> = (0..cli.games as u64)
        .map(|i| base_seed.wrapping_add(i))
        .collect();

    let config = GameConfig::classic().with_win_value(cli.win_value);
    let player = AutoPlayer::new(MoveAdvisor::default(), !cli.keep_playing);

    info!(
        "playing {} game(s) from seed {base_seed}, win at {}",
        cli.games, config.win_value
    );
    let summaries = play_games(&config, &seeds, &player, cli.max_moves)
        .context("invalid game configuration")?;
    for s in &summaries {
        debug!(
            "seed {}: score {}, max tile {}, {} moves, {:?}",
            s.seed, s.score, s.max_tile, s.moves, s.reason
        );
    }

    let report = Report::from_summaries(&summaries);
    if cli.json {
        let out = JsonOutput {
            summary: &report,
            games: &summaries,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{report}");
    }
    info!(
        "Completed: mean score {:.1}, best {}, win rate {:.1}%",
        report.mean_score,
        report.best_score,
        report.win_rate * 100.0
    );
    Ok(())
}
