/// Spawn scheduler: frame-counted timers that decide when enemies, bosses
/// and hearts enter the playfield.
///
/// All randomness flows through the injected `rng`; every draw is a fresh
/// uniform sample in `[0, 1)`.

use rand::Rng;
use tracing::debug;

use crate::constants::{
    BOSS_HEALTH, BOSS_SIZE, BOSS_SPAWN_MIN, BOSS_SPAWN_SPREAD, ENEMY_BASE_SPEED, ENEMY_SIZE,
    ENEMY_SPAWN_BASE, ENEMY_SPAWN_FLOOR_BASE, ENEMY_SPAWN_SCORE_DIVISOR,
    ENEMY_SPEED_DIFFICULTY_FACTOR, ENEMY_SPEED_SPREAD, HEART_SIZE, HEART_SPAWN_FRAMES,
};
use crate::entities::{Difficulty, Enemy, FrameEvent, Heart, SessionState};

// ── Thresholds ───────────────────────────────────────────────────────────────

/// Frames between regular enemy spawns.  Shrinks as score and difficulty
/// rise, never below a difficulty-dependent floor.
pub fn enemy_spawn_threshold(score: u32, difficulty: Difficulty) -> f64 {
    let d = f64::from(difficulty.level());
    let scaled = ENEMY_SPAWN_BASE - f64::from(score) / ENEMY_SPAWN_SCORE_DIVISOR - d * 2.0;
    let floor = ENEMY_SPAWN_FLOOR_BASE - d * 3.0;
    scaled.max(floor)
}

/// Roll the number of frames until the next boss (2700..4500).
pub fn roll_boss_threshold(rng: &mut impl Rng) -> f64 {
    BOSS_SPAWN_MIN + rng.gen::<f64>() * BOSS_SPAWN_SPREAD
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn random_x(rng: &mut impl Rng, playfield_width: f64, entity_width: f64) -> f64 {
    rng.gen::<f64>() * (playfield_width - entity_width)
}

fn random_enemy_speed(rng: &mut impl Rng, difficulty: Difficulty) -> f64 {
    (ENEMY_BASE_SPEED + rng.gen::<f64>() * ENEMY_SPEED_SPREAD)
        * f64::from(difficulty.level())
        * ENEMY_SPEED_DIFFICULTY_FACTOR
}

/// A regular enemy just above the top edge.  Draws x first, then speed.
pub fn spawn_enemy(rng: &mut impl Rng, playfield_width: f64, difficulty: Difficulty) -> Enemy {
    let x = random_x(rng, playfield_width, ENEMY_SIZE);
    let speed = random_enemy_speed(rng, difficulty);
    Enemy {
        x,
        y: -ENEMY_SIZE,
        width: ENEMY_SIZE,
        height: ENEMY_SIZE,
        speed,
        is_boss: false,
        health: None,
    }
}

/// A boss: three times the size of a regular enemy, same speed formula.
pub fn spawn_boss(rng: &mut impl Rng, playfield_width: f64, difficulty: Difficulty) -> Enemy {
    let x = random_x(rng, playfield_width, BOSS_SIZE);
    let speed = random_enemy_speed(rng, difficulty);
    Enemy {
        x,
        y: -BOSS_SIZE,
        width: BOSS_SIZE,
        height: BOSS_SIZE,
        speed,
        is_boss: true,
        health: Some(BOSS_HEALTH),
    }
}

pub fn spawn_heart(rng: &mut impl Rng, playfield_width: f64) -> Heart {
    Heart::at(random_x(rng, playfield_width, HEART_SIZE))
}

// ── Per-frame scheduling ─────────────────────────────────────────────────────

/// Advance all three spawn timers by one frame, inserting whatever is due.
/// Order: enemy, boss, heart.
pub fn run_spawners(state: &mut SessionState, rng: &mut impl Rng) -> Vec<FrameEvent> {
    let mut events = Vec::new();

    state.enemy_timer += 1;
    if f64::from(state.enemy_timer) > enemy_spawn_threshold(state.score, state.difficulty) {
        let enemy = spawn_enemy(rng, state.width, state.difficulty);
        debug!(x = enemy.x, speed = enemy.speed, frame = state.frame, "enemy spawned");
        state.enemies.push(enemy);
        state.enemy_timer = 0;
    }

    state.boss_timer += 1;
    if f64::from(state.boss_timer) > state.boss_threshold {
        let boss = spawn_boss(rng, state.width, state.difficulty);
        debug!(x = boss.x, speed = boss.speed, frame = state.frame, "boss spawned");
        state.enemies.push(boss);
        state.boss_timer = 0;
        state.boss_threshold = roll_boss_threshold(rng);
        events.push(FrameEvent::BossSpawned);
    }

    state.heart_timer += 1;
    if state.heart_timer > HEART_SPAWN_FRAMES {
        let heart = spawn_heart(rng, state.width);
        debug!(x = heart.x, frame = state.frame, "heart spawned");
        state.hearts.push(heart);
        state.heart_timer = 0;
    }

    events
}
