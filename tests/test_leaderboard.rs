use std::fs;

use neon_invaders::entities::Difficulty;
use neon_invaders::leaderboard::{corrupt_path, Leaderboard, LeaderboardError};

fn difficulty(level: u8) -> Difficulty {
    Difficulty::new(level).unwrap()
}

fn names(board: &Leaderboard) -> Vec<&str> {
    board.all().iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn entries_sorted_by_score_descending() {
    let mut board = Leaderboard::new();
    board.submit_at("low", 10, difficulty(1), 1).unwrap();
    board.submit_at("high", 500, difficulty(3), 2).unwrap();
    board.submit_at("mid", 120, difficulty(2), 3).unwrap();
    assert_eq!(names(&board), ["high", "mid", "low"]);
}

#[test]
fn ties_keep_submission_order_and_duplicates_are_kept() {
    let mut board = Leaderboard::new();
    board.submit_at("first", 100, difficulty(1), 1).unwrap();
    board.submit_at("second", 100, difficulty(1), 2).unwrap();
    board.submit_at("first", 100, difficulty(1), 3).unwrap();
    assert_eq!(names(&board), ["first", "second", "first"]);
    assert_eq!(board.all()[2].timestamp, 3);
}

#[test]
fn long_names_are_truncated() {
    let mut board = Leaderboard::new();
    let entry = board
        .submit_at("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 1, difficulty(1), 0)
        .unwrap();
    assert_eq!(entry.name, "ABCDEFGHIJKLMNOPQRST");
}

#[test]
fn blank_names_are_rejected() {
    let mut board = Leaderboard::new();
    assert!(matches!(
        board.submit_at("   ", 1, difficulty(1), 0),
        Err(LeaderboardError::EmptyName)
    ));
    assert!(board.is_empty());
}

#[test]
fn submit_stamps_current_time() {
    let mut board = Leaderboard::new();
    let entry = board.submit("now", 1, difficulty(1)).unwrap();
    assert!(entry.timestamp > 1_600_000_000_000);
}

#[test]
fn top_is_bounded_by_length() {
    let mut board = Leaderboard::new();
    for i in 0..12u32 {
        board.submit_at(&format!("p{i}"), i * 10, difficulty(1), u64::from(i)).unwrap();
    }
    assert_eq!(board.top(10).len(), 10);
    assert_eq!(board.top(10)[0].score, 110);
    assert_eq!(board.top(50).len(), 12);
    assert_eq!(board.all().len(), 12);
}

#[test]
fn save_then_load_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores").join("board.json");

    let mut board = Leaderboard::new();
    board.submit_at("b", 20, difficulty(2), 1).unwrap();
    board.submit_at("a", 30, difficulty(5), 2).unwrap();
    board.save(&path).unwrap();

    let loaded = Leaderboard::load(&path).unwrap();
    assert_eq!(loaded, board);
}

#[test]
fn saved_file_is_plain_json_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");

    let mut board = Leaderboard::new();
    board.submit_at("Ada", 15, difficulty(3), 99).unwrap();
    board.save(&path).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "name": "Ada", "score": 15, "difficulty": 3, "timestamp": 99 }])
    );
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let board = Leaderboard::load(&dir.path().join("nope.json")).unwrap();
    assert!(board.is_empty());
}

#[test]
fn unsorted_file_is_sorted_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");
    fs::write(
        &path,
        r#"[
            {"name": "x", "score": 5, "difficulty": 1, "timestamp": 1},
            {"name": "y", "score": 50, "difficulty": 1, "timestamp": 2}
        ]"#,
    )
    .unwrap();

    let board = Leaderboard::load(&path).unwrap();
    assert_eq!(names(&board), ["y", "x"]);
}

#[test]
fn corrupt_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");

    fs::write(&path, "not json").unwrap();
    assert!(matches!(Leaderboard::load(&path), Err(LeaderboardError::Parse { .. })));

    fs::write(&path, r#"[{"name": "x", "score": 5, "difficulty": 9, "timestamp": 1}]"#).unwrap();
    assert!(matches!(Leaderboard::load(&path), Err(LeaderboardError::Parse { .. })));
}

#[test]
fn open_keeps_a_corrupt_file_out_of_the_way() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");
    let original = r#"[{"name": "alice", "score": 900, "difficulty": 2, "timestamp": 1},"#;
    fs::write(&path, original).unwrap();

    let mut board = Leaderboard::open(&path).unwrap();
    assert!(board.is_empty());
    board.submit_at("bob", 5, difficulty(1), 2).unwrap();
    board.save(&path).unwrap();

    assert_eq!(fs::read_to_string(corrupt_path(&path)).unwrap(), original);
    assert_eq!(names(&Leaderboard::load(&path).unwrap()), ["bob"]);
}

#[test]
fn open_reads_a_valid_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");

    let mut board = Leaderboard::new();
    board.submit_at("a", 30, difficulty(5), 1).unwrap();
    board.save(&path).unwrap();

    assert_eq!(Leaderboard::open(&path).unwrap(), board);
    assert!(!corrupt_path(&path).exists());
}

#[test]
fn open_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Leaderboard::open(&dir.path().join("nope.json")).unwrap().is_empty());
}

#[test]
fn corrupt_path_appends_suffix() {
    assert_eq!(
        corrupt_path(std::path::Path::new("/tmp/board.json")),
        std::path::PathBuf::from("/tmp/board.json.corrupt")
    );
}
