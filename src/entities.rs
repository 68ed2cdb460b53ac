/// All game entity types: pure data, no game rules.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOSS_POINTS_FACTOR, BULLET_HEIGHT, BULLET_SPEED, BULLET_WIDTH, ENEMY_POINTS, HEART_SIZE,
    HEART_SPEED, PLAYER_SIZE, PLAYER_SPEED, PLAYER_START_X, PLAYER_START_Y,
};
use crate::error::GameError;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in world pixels.  `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Strict overlap test; rectangles that merely touch do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Anything that occupies space on the playfield.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

// ── Difficulty ───────────────────────────────────────────────────────────────

/// Selected difficulty, 1 (ROOKIE) to 5 (IMPOSSIBLE).  Fixed for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self, GameError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(GameError::InvalidDifficulty(level))
        }
    }

    /// Every selectable level, easiest first.
    pub fn all() -> impl Iterator<Item = Difficulty> {
        (Self::MIN..=Self::MAX).map(Difficulty)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Reward factor: 1.0 at level 1, +0.25 per level above it.
    pub fn score_multiplier(self) -> f64 {
        1.0 + f64::from(self.0 - 1) * 0.25
    }

    /// `floor(10 * multiplier)` points for a regular enemy.
    pub fn enemy_points(self) -> u32 {
        // multiplier == (level + 3) / 4, kept in integers so flooring is exact
        ENEMY_POINTS * (u32::from(self.0) + 3) / 4
    }

    /// `floor(10 * multiplier * 10)` points for a boss.
    pub fn boss_points(self) -> u32 {
        ENEMY_POINTS * BOSS_POINTS_FACTOR * (u32::from(self.0) + 3) / 4
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "ROOKIE",
            2 => "WARRIOR",
            3 => "LEGEND",
            4 => "NIGHTMARE",
            _ => "IMPOSSIBLE",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> u8 {
        difficulty.0
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Session status ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Keys held during one frame.  Copied into the simulation at the start of
/// every step; the shell owns the live key map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Doubles enemy descent speed while held.
    pub fast_fall: bool,
    pub quit: bool,
}

// ── Frame events ─────────────────────────────────────────────────────────────

/// Notable things that happened during one simulation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    EnemyDestroyed { points: u32 },
    BossDamaged { health: u32 },
    BossDefeated { points: u32 },
    BossSpawned,
    HeartCollected { lives: u32 },
    LifeLost { lives: u32 },
    /// Terminal event: emitted exactly once per session.
    GameOver { final_score: u32 },
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            speed: PLAYER_SPEED,
        }
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// A player shot travelling straight up.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

impl Bullet {
    /// A bullet leaving the top-centre of `player`.
    pub fn fired_by(player: &Player) -> Self {
        Self {
            x: player.x + player.width / 2.0 - BULLET_WIDTH / 2.0,
            y: player.y,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            speed: BULLET_SPEED,
        }
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Pixels per frame, downward.
    pub speed: f64,
    pub is_boss: bool,
    /// Remaining hits; `Some` only for bosses.
    pub health: Option<u32>,
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

// ── Pickups ──────────────────────────────────────────────────────────────────

/// Falling pickup that restores one life.
#[derive(Clone, Debug, PartialEq)]
pub struct Heart {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

impl Heart {
    pub fn at(x: f64) -> Self {
        Self {
            x,
            y: -HEART_SIZE,
            width: HEART_SIZE,
            height: HEART_SIZE,
            speed: HEART_SPEED,
        }
    }
}

impl Bounded for Heart {
    fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

// ── Master session state ─────────────────────────────────────────────────────

/// Everything the simulation knows about one play-through.  Cloneable so
/// `compute::tick` can return a fresh copy without mutating its input.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    /// Insertion order is the bullet tie-break order.
    pub enemies: Vec<Enemy>,
    pub hearts: Vec<Heart>,
    pub score: u32,
    /// Always within `0..=MAX_LIVES`.
    pub lives: u32,
    pub status: GameStatus,
    pub difficulty: Difficulty,
    pub frame: u64,
    pub enemy_timer: u32,
    pub boss_timer: u32,
    /// Frames the boss timer must exceed; re-rolled after every boss.
    pub boss_threshold: f64,
    pub heart_timer: u32,
    pub fire_cooldown: i32,
    pub width: f64,
    pub height: f64,
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn bosses(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_boss)
    }
}
