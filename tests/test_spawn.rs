use neon_invaders::compute::init_state;
use neon_invaders::constants::*;
use neon_invaders::entities::*;
use neon_invaders::spawn::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn difficulty(level: u8) -> Difficulty {
    Difficulty::new(level).unwrap()
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Fresh session with its opening enemy removed.
fn quiet_state(level: u8) -> SessionState {
    let mut s = init_state(difficulty(level), &mut rng(1));
    s.enemies.clear();
    s.boss_threshold = 1.0e9;
    s
}

// ── Thresholds ────────────────────────────────────────────────────────────────

#[test]
fn enemy_threshold_at_start_of_run() {
    assert_eq!(enemy_spawn_threshold(0, difficulty(1)), 128.0);
    assert_eq!(enemy_spawn_threshold(0, difficulty(5)), 120.0);
}

#[test]
fn enemy_threshold_shrinks_with_score() {
    assert_eq!(enemy_spawn_threshold(5_000, difficulty(1)), 108.0);
    assert_eq!(enemy_spawn_threshold(125, difficulty(1)), 127.5);
}

#[test]
fn enemy_threshold_is_floored_per_difficulty() {
    assert_eq!(enemy_spawn_threshold(50_000, difficulty(1)), 77.0);
    assert_eq!(enemy_spawn_threshold(50_000, difficulty(5)), 65.0);
}

#[test]
fn boss_threshold_stays_in_window() {
    let mut r = rng(7);
    for _ in 0..1_000 {
        let t = roll_boss_threshold(&mut r);
        assert!((2700.0..4500.0).contains(&t), "threshold {t} out of range");
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

#[test]
fn spawned_enemy_starts_above_top_edge_inside_width() {
    let mut r = rng(3);
    for _ in 0..500 {
        let e = spawn_enemy(&mut r, PLAYFIELD_WIDTH, difficulty(3));
        assert!(e.x >= 0.0 && e.x < PLAYFIELD_WIDTH - ENEMY_SIZE);
        assert_eq!(e.y, -ENEMY_SIZE);
        assert!(!e.is_boss);
        assert_eq!(e.health, None);
    }
}

#[test]
fn enemy_speed_scales_with_difficulty() {
    let mut r = rng(11);
    for level in 1..=5u8 {
        let d = f64::from(level);
        let low = 0.3 * d * 0.4;
        let high = 0.8 * d * 0.4;
        for _ in 0..200 {
            let e = spawn_enemy(&mut r, PLAYFIELD_WIDTH, difficulty(level));
            assert!(e.speed >= low && e.speed < high, "speed {} at level {level}", e.speed);
        }
    }
}

#[test]
fn spawned_boss_is_three_times_larger_with_five_health() {
    let b = spawn_boss(&mut rng(5), PLAYFIELD_WIDTH, difficulty(2));
    assert!(b.is_boss);
    assert_eq!(b.health, Some(5));
    assert_eq!(b.width, 120.0);
    assert_eq!(b.height, 120.0);
    assert_eq!(b.y, -120.0);
    assert!(b.x >= 0.0 && b.x < PLAYFIELD_WIDTH - 120.0);
}

#[test]
fn spawned_heart_has_fixed_speed() {
    let h = spawn_heart(&mut rng(5), PLAYFIELD_WIDTH);
    assert_eq!(h.y, -30.0);
    assert_eq!(h.speed, 1.5);
    assert!(h.x >= 0.0 && h.x < PLAYFIELD_WIDTH - 30.0);
}

#[test]
fn same_seed_same_spawn() {
    let a = spawn_enemy(&mut rng(99), PLAYFIELD_WIDTH, difficulty(4));
    let b = spawn_enemy(&mut rng(99), PLAYFIELD_WIDTH, difficulty(4));
    assert_eq!(a, b);
}

// ── run_spawners ──────────────────────────────────────────────────────────────

#[test]
fn enemy_spawns_once_counter_exceeds_threshold() {
    let mut s = quiet_state(1);
    s.enemy_timer = 127;
    run_spawners(&mut s, &mut rng(2));
    assert!(s.enemies.is_empty(), "128 is not above the threshold");
    assert_eq!(s.enemy_timer, 128);

    run_spawners(&mut s, &mut rng(2));
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemy_timer, 0);
}

#[test]
fn higher_score_spawns_sooner() {
    let mut s = quiet_state(1);
    s.score = 5_000;
    s.enemy_timer = 108;
    run_spawners(&mut s, &mut rng(2));
    assert_eq!(s.enemies.len(), 1);
}

#[test]
fn boss_spawn_rerolls_threshold() {
    let mut s = quiet_state(1);
    s.boss_threshold = 10.0;
    s.boss_timer = 10;

    let events = run_spawners(&mut s, &mut rng(8));
    assert_eq!(events, vec![FrameEvent::BossSpawned]);
    assert_eq!(s.bosses().count(), 1);
    assert_eq!(s.boss_timer, 0);
    assert!(s.boss_threshold >= 2700.0 && s.boss_threshold < 4500.0);
}

#[test]
fn heart_spawns_after_1800_frames() {
    let mut s = quiet_state(1);
    s.heart_timer = HEART_SPAWN_FRAMES - 1;
    run_spawners(&mut s, &mut rng(4));
    assert!(s.hearts.is_empty());

    run_spawners(&mut s, &mut rng(4));
    assert_eq!(s.hearts.len(), 1);
    assert_eq!(s.heart_timer, 0);
}

#[test]
fn timers_advance_independently() {
    let mut s = quiet_state(3);
    s.enemy_timer = 10;
    s.boss_timer = 20;
    s.heart_timer = 30;
    run_spawners(&mut s, &mut rng(4));
    assert_eq!((s.enemy_timer, s.boss_timer, s.heart_timer), (11, 21, 31));
}
