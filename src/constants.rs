/// Hand-tuned gameplay constants.  World units are canvas pixels; the
/// simulation is paced at one step per frame (60 FPS).

// ── Playfield ────────────────────────────────────────────────────────────────

pub const PLAYFIELD_WIDTH: f64 = 1360.0;
pub const PLAYFIELD_HEIGHT: f64 = 1200.0;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_START_X: f64 = 680.0;
pub const PLAYER_START_Y: f64 = 1100.0;
pub const PLAYER_SIZE: f64 = 50.0;
pub const PLAYER_SPEED: f64 = 5.0;

pub const STARTING_LIVES: u32 = 3;
pub const MAX_LIVES: u32 = 9;

// ── Bullets ──────────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: f64 = 10.0;
pub const BULLET_HEIGHT: f64 = 20.0;
pub const BULLET_SPEED: f64 = 8.0;

/// Frames between shots while fire is held (≈500 ms).
pub const FIRE_COOLDOWN_FRAMES: i32 = 30;

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: f64 = 40.0;
pub const BOSS_SIZE: f64 = ENEMY_SIZE * 3.0;
pub const BOSS_HEALTH: u32 = 5;

pub const ENEMY_BASE_SPEED: f64 = 0.3;
pub const ENEMY_SPEED_SPREAD: f64 = 0.5;
pub const ENEMY_SPEED_DIFFICULTY_FACTOR: f64 = 0.4;

/// While fast-fall is held, enemies descend this many times faster.
pub const FAST_FALL_FACTOR: f64 = 2.0;

// ── Spawn cadence (frames) ───────────────────────────────────────────────────

pub const ENEMY_SPAWN_BASE: f64 = 130.0;
pub const ENEMY_SPAWN_SCORE_DIVISOR: f64 = 250.0;
pub const ENEMY_SPAWN_FLOOR_BASE: f64 = 80.0;

/// ~45 s at 60 FPS.
pub const BOSS_SPAWN_MIN: f64 = 2700.0;
/// Random extra delay on top of `BOSS_SPAWN_MIN` (up to ~30 s).
pub const BOSS_SPAWN_SPREAD: f64 = 1800.0;

/// ~30 s at 60 FPS.
pub const HEART_SPAWN_FRAMES: u32 = 1800;
pub const HEART_SIZE: f64 = 30.0;
pub const HEART_SPEED: f64 = 1.5;

// ── Scoring ──────────────────────────────────────────────────────────────────

pub const ENEMY_POINTS: u32 = 10;
pub const BOSS_POINTS_FACTOR: u32 = 10;

// ── Leaderboard ──────────────────────────────────────────────────────────────

pub const MAX_NAME_LEN: usize = 20;
pub const LEADERBOARD_TOP: usize = 10;
