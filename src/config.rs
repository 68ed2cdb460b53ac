//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::entities::Difficulty;

const LEADERBOARD_FILE: &str = ".neon_invaders_leaderboard.json";

#[derive(Debug, Parser)]
#[command(name = "neon_invaders")]
#[command(about = "Neon arcade shooter for the terminal")]
pub struct Cli {
    /// Seed the RNG for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Leaderboard file (defaults to ~/.neon_invaders_leaderboard.json)
    #[arg(long)]
    pub leaderboard: Option<PathBuf>,

    /// Write tracing output to this file; filter with RUST_LOG
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Skip the menus and start at this difficulty (1-5)
    #[arg(long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,
}

impl Cli {
    pub fn leaderboard_path(&self) -> PathBuf {
        self.leaderboard.clone().unwrap_or_else(default_leaderboard_path)
    }
}

fn default_leaderboard_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(LEADERBOARD_FILE)
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, String> {
    let level: u8 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number between 1 and 5"))?;
    Difficulty::new(level).map_err(|err| err.to_string())
}
