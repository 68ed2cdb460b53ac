use std::path::PathBuf;

use clap::Parser;
use neon_invaders::config::Cli;
use neon_invaders::entities::Difficulty;

#[test]
fn defaults_leave_everything_unset() {
    let cli = Cli::try_parse_from(["neon_invaders"]).unwrap();
    assert_eq!(cli.seed, None);
    assert_eq!(cli.difficulty, None);
    assert_eq!(cli.log_file, None);
    assert!(cli
        .leaderboard_path()
        .ends_with(".neon_invaders_leaderboard.json"));
}

#[test]
fn parses_all_flags() {
    let cli = Cli::try_parse_from([
        "neon_invaders",
        "--seed",
        "7",
        "--difficulty",
        "3",
        "--leaderboard",
        "/tmp/board.json",
        "--log-file",
        "game.log",
    ])
    .unwrap();
    assert_eq!(cli.seed, Some(7));
    assert_eq!(cli.difficulty, Some(Difficulty::new(3).unwrap()));
    assert_eq!(cli.leaderboard_path(), PathBuf::from("/tmp/board.json"));
    assert_eq!(cli.log_file, Some(PathBuf::from("game.log")));
}

#[test]
fn rejects_out_of_range_difficulty() {
    assert!(Cli::try_parse_from(["neon_invaders", "--difficulty", "6"]).is_err());
    assert!(Cli::try_parse_from(["neon_invaders", "--difficulty", "hard"]).is_err());
}
