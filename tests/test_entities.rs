use neon_invaders::entities::*;
use neon_invaders::error::GameError;

fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect { x, y, width, height }
}

#[test]
fn rect_overlap_is_strict() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0)));
    assert!(a.overlaps(&rect(-5.0, -5.0, 30.0, 30.0))); // containment
    assert!(!a.overlaps(&rect(10.0, 0.0, 10.0, 10.0))); // shared edge
    assert!(!a.overlaps(&rect(0.0, 10.0, 10.0, 10.0)));
    assert!(!a.overlaps(&rect(50.0, 50.0, 10.0, 10.0)));
}

#[test]
fn difficulty_accepts_one_through_five() {
    for level in 1..=5 {
        assert_eq!(Difficulty::new(level).map(Difficulty::level), Ok(level));
    }
    assert_eq!(Difficulty::new(0), Err(GameError::InvalidDifficulty(0)));
    assert_eq!(Difficulty::new(6), Err(GameError::InvalidDifficulty(6)));
}

#[test]
fn score_table_matches_multiplier() {
    let table: Vec<(f64, u32, u32)> = Difficulty::all()
        .map(|d| (d.score_multiplier(), d.enemy_points(), d.boss_points()))
        .collect();
    assert_eq!(
        table,
        vec![
            (1.0, 10, 100),
            (1.25, 12, 125),
            (1.5, 15, 150),
            (1.75, 17, 175),
            (2.0, 20, 200),
        ]
    );
    for d in Difficulty::all() {
        assert_eq!(d.enemy_points(), (10.0 * d.score_multiplier()).floor() as u32);
        assert_eq!(d.boss_points(), (10.0 * d.score_multiplier() * 10.0).floor() as u32);
    }
}

#[test]
fn difficulty_labels() {
    let labels: Vec<&str> = Difficulty::all().map(Difficulty::label).collect();
    assert_eq!(labels, ["ROOKIE", "WARRIOR", "LEGEND", "NIGHTMARE", "IMPOSSIBLE"]);
}

#[test]
fn difficulty_serde_rejects_out_of_range() {
    let d: Difficulty = serde_json::from_str("4").unwrap();
    assert_eq!(d.level(), 4);
    assert_eq!(serde_json::to_string(&d).unwrap(), "4");
    assert!(serde_json::from_str::<Difficulty>("7").is_err());
}

#[test]
fn bullet_leaves_player_top_centre() {
    let player = Player::default();
    let bullet = Bullet::fired_by(&player);
    assert_eq!(bullet.x, 700.0);
    assert_eq!(bullet.y, 1100.0);
    assert_eq!((bullet.width, bullet.height, bullet.speed), (10.0, 20.0, 8.0));
}

#[test]
fn input_defaults_to_nothing_held() {
    let input = InputState::default();
    assert!(!input.left && !input.right && !input.fire && !input.fast_fall && !input.quit);
}
