/// Pure game-logic functions.
///
/// Public entry points take an immutable reference to the current
/// `SessionState` (and, where needed, an RNG handle) and return a brand-new
/// `SessionState`.  The per-phase helpers used by `tick` mutate a working
/// copy in place and report what happened as `FrameEvent`s.

use std::mem;

use rand::Rng;
use tracing::{debug, info};

use crate::constants::{
    FAST_FALL_FACTOR, FIRE_COOLDOWN_FRAMES, MAX_LIVES, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
    STARTING_LIVES,
};
use crate::entities::{
    Bounded, Bullet, Difficulty, FrameEvent, GameStatus, InputState, Player, SessionState,
};
use crate::spawn::{roll_boss_threshold, run_spawners, spawn_enemy};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state for a session: player centred near the bottom,
/// three lives, one regular enemy already on its way down.
pub fn init_state(difficulty: Difficulty, rng: &mut impl Rng) -> SessionState {
    let first_enemy = spawn_enemy(rng, PLAYFIELD_WIDTH, difficulty);
    let boss_threshold = roll_boss_threshold(rng);
    info!(difficulty = difficulty.level(), label = difficulty.label(), "session started");

    SessionState {
        player: Player::default(),
        bullets: Vec::new(),
        enemies: vec![first_enemy],
        hearts: Vec::new(),
        score: 0,
        lives: STARTING_LIVES,
        status: GameStatus::Playing,
        difficulty,
        frame: 0,
        enemy_timer: 0,
        boss_timer: 0,
        boss_threshold,
        heart_timer: 0,
        fire_cooldown: 0,
        width: PLAYFIELD_WIDTH,
        height: PLAYFIELD_HEIGHT,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &SessionState) -> SessionState {
    let x = (state.player.x - state.player.speed).max(0.0);
    SessionState {
        player: Player { x, ..state.player.clone() },
        ..state.clone()
    }
}

pub fn move_player_right(state: &SessionState) -> SessionState {
    let max_x = state.width - state.player.width;
    let x = (state.player.x + state.player.speed).min(max_x);
    SessionState {
        player: Player { x, ..state.player.clone() },
        ..state.clone()
    }
}

/// End the session early with the current score, as if the last life was
/// lost.  A session that is already over is returned unchanged.
pub fn quit(state: &SessionState) -> (SessionState, Option<FrameEvent>) {
    let mut next = state.clone();
    let event = end_session(&mut next);
    (next, event)
}

// ── Per-frame phases ─────────────────────────────────────────────────────────

/// Fixed-rate fire: while held, one bullet every `FIRE_COOLDOWN_FRAMES`
/// starting on the first held frame.  Releasing clears the cooldown.
pub fn update_fire_control(state: &mut SessionState, fire_held: bool) {
    if !fire_held {
        state.fire_cooldown = 0;
        return;
    }

    state.fire_cooldown -= 1;
    if state.fire_cooldown <= 0 {
        state.bullets.push(Bullet::fired_by(&state.player));
        state.fire_cooldown = FIRE_COOLDOWN_FRAMES;
    }
}

/// Integrate bullets, hearts and enemies by one frame.
///
/// Bullets already past the top and hearts already past the bottom expire
/// before moving.  Fast-fall only speeds up enemies.
pub fn advance_entities(state: &mut SessionState, fast_fall: bool) {
    state.bullets.retain(|b| b.y > 0.0);
    for bullet in &mut state.bullets {
        bullet.y -= bullet.speed;
    }

    let height = state.height;
    state.hearts.retain(|h| h.y < height);
    for heart in &mut state.hearts {
        heart.y += heart.speed;
    }

    let factor = if fast_fall { FAST_FALL_FACTOR } else { 1.0 };
    for enemy in &mut state.enemies {
        enemy.y += enemy.speed * factor;
    }
}

/// Bullet × enemy.  Each bullet credits at most one hit: the first enemy
/// it overlaps in insertion order.  The bullet is consumed by any hit.
pub fn resolve_bullet_hits(state: &mut SessionState) -> Vec<FrameEvent> {
    let mut events = Vec::new();
    let mut surviving = Vec::with_capacity(state.bullets.len());

    for bullet in mem::take(&mut state.bullets) {
        let bounds = bullet.bounds();
        let Some(index) = state
            .enemies
            .iter()
            .position(|enemy| bounds.overlaps(&enemy.bounds()))
        else {
            surviving.push(bullet);
            continue;
        };

        let enemy = &mut state.enemies[index];
        if enemy.is_boss {
            let health = enemy.health.unwrap_or(1).saturating_sub(1);
            enemy.health = Some(health);
            if health > 0 {
                debug!(health, "boss hit");
                events.push(FrameEvent::BossDamaged { health });
                continue;
            }
            let points = state.difficulty.boss_points();
            state.enemies.remove(index);
            state.score = state.score.saturating_add(points);
            info!(points, score = state.score, "boss defeated");
            events.push(FrameEvent::BossDefeated { points });
        } else {
            let points = state.difficulty.enemy_points();
            state.enemies.remove(index);
            state.score = state.score.saturating_add(points);
            events.push(FrameEvent::EnemyDestroyed { points });
        }
    }

    state.bullets = surviving;
    events
}

/// Heart × player: +1 life (capped), heart removed either way.
pub fn collect_hearts(state: &mut SessionState) -> Vec<FrameEvent> {
    let mut events = Vec::new();
    let player = state.player.bounds();
    let mut remaining = Vec::with_capacity(state.hearts.len());

    for heart in mem::take(&mut state.hearts) {
        if player.overlaps(&heart.bounds()) {
            state.lives = (state.lives + 1).min(MAX_LIVES);
            events.push(FrameEvent::HeartCollected { lives: state.lives });
        } else {
            remaining.push(heart);
        }
    }

    state.hearts = remaining;
    events
}

/// Enemy × player and enemy × bottom edge: each costs one life and removes
/// the enemy.  The frame lives first reach zero ends the session.
pub fn resolve_enemy_breaches(state: &mut SessionState) -> Vec<FrameEvent> {
    let mut events = Vec::new();
    let player = state.player.bounds();
    let height = state.height;
    let mut remaining = Vec::with_capacity(state.enemies.len());

    for enemy in mem::take(&mut state.enemies) {
        let touched_player = player.overlaps(&enemy.bounds());
        if !touched_player && enemy.y <= height {
            remaining.push(enemy);
            continue;
        }

        // Enemies breaching after the last life are removed silently.
        if state.lives == 0 {
            continue;
        }
        state.lives -= 1;
        debug!(lives = state.lives, touched_player, "life lost");
        events.push(FrameEvent::LifeLost { lives: state.lives });
        if state.lives == 0 {
            events.extend(end_session(state));
        }
    }

    state.enemies = remaining;
    events
}

/// Flip to `GameOver` once; later calls are no-ops.
fn end_session(state: &mut SessionState) -> Option<FrameEvent> {
    if state.status != GameStatus::Playing {
        return None;
    }
    state.status = GameStatus::GameOver;
    info!(final_score = state.score, frame = state.frame, "game over");
    Some(FrameEvent::GameOver { final_score: state.score })
}

// ── Per-frame tick (RNG injected) ──────────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (tests use a seeded RNG).
///
/// A finished session is returned unchanged with no events.
pub fn tick(
    state: &SessionState,
    input: &InputState,
    rng: &mut impl Rng,
) -> (SessionState, Vec<FrameEvent>) {
    if !state.is_running() {
        return (state.clone(), Vec::new());
    }

    let mut next = state.clone();
    next.frame += 1;

    if input.quit {
        let events = end_session(&mut next).into_iter().collect();
        return (next, events);
    }

    // ── 1. Player input ──────────────────────────────────────────────────────
    if input.left {
        next = move_player_left(&next);
    }
    if input.right {
        next = move_player_right(&next);
    }
    update_fire_control(&mut next, input.fire);

    // ── 2. Spawning ──────────────────────────────────────────────────────────
    let mut events = run_spawners(&mut next, rng);

    // ── 3. Movement ──────────────────────────────────────────────────────────
    advance_entities(&mut next, input.fast_fall);

    // ── 4. Collisions, fixed order ───────────────────────────────────────────
    events.extend(resolve_bullet_hits(&mut next));
    events.extend(collect_hearts(&mut next));
    events.extend(resolve_enemy_breaches(&mut next));

    (next, events)
}
