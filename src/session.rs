//! Screen lifecycle around the simulation.
//!
//! `menu → difficulty → playing → game over → menu`.  The difficulty screen
//! can go back to the menu, and the game-over screen can return to the menu
//! without recording a score.  Calls that do not apply to the current
//! screen are ignored.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::constants::{LEADERBOARD_TOP, MAX_NAME_LEN};
use crate::entities::{Difficulty, FrameEvent, InputState};
use crate::leaderboard::{Leaderboard, LeaderboardError};
use crate::simulation::Simulation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Difficulty,
    Playing,
    GameOver,
}

/// Name and score of the most recently submitted run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastPlayer {
    pub name: String,
    pub score: u32,
}

pub struct Session {
    screen: Screen,
    simulation: Option<Simulation>,
    difficulty: Difficulty,
    final_score: u32,
    name_input: String,
    last_player: Option<LastPlayer>,
    show_all_scores: bool,
    /// Seeds each new simulation so a seeded session replays exactly.
    seeder: StdRng,
}

impl Session {
    pub fn new(seed: Option<u64>) -> Self {
        let seeder = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            screen: Screen::Menu,
            simulation: None,
            difficulty: Difficulty::default(),
            final_score: 0,
            name_input: String::new(),
            last_player: None,
            show_all_scores: false,
            seeder,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    // ── Menu ─────────────────────────────────────────────────────────────────

    pub fn start_game(&mut self) {
        if self.screen == Screen::Menu {
            self.final_score = 0;
            self.transition(Screen::Difficulty);
        }
    }

    /// Switch between the top 10 and the full table.  Ignored while the
    /// board has no more than 10 entries.
    pub fn toggle_show_all_scores(&mut self, leaderboard: &Leaderboard) {
        if leaderboard.len() > LEADERBOARD_TOP {
            self.show_all_scores = !self.show_all_scores;
        }
    }

    pub fn show_all_scores(&self) -> bool {
        self.show_all_scores
    }

    pub fn last_player(&self) -> Option<&LastPlayer> {
        self.last_player.as_ref()
    }

    // ── Difficulty ───────────────────────────────────────────────────────────

    pub fn choose_difficulty(&mut self, difficulty: Difficulty) {
        if self.screen != Screen::Difficulty {
            return;
        }
        self.difficulty = difficulty;
        self.simulation = Some(Simulation::seeded(difficulty, self.seeder.gen()));
        self.transition(Screen::Playing);
    }

    /// Last selected difficulty (level 1 until one is chosen).
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    // ── Playing ──────────────────────────────────────────────────────────────

    /// Advance the live simulation by one frame.  A `GameOver` event moves
    /// the session to the game-over screen.
    pub fn step(&mut self, input: &InputState) -> Vec<FrameEvent> {
        if self.screen != Screen::Playing {
            return Vec::new();
        }
        let Some(simulation) = self.simulation.as_mut() else {
            return Vec::new();
        };

        let events = simulation.step(input);
        if let Some(final_score) = events.iter().find_map(|event| match event {
            FrameEvent::GameOver { final_score } => Some(*final_score),
            _ => None,
        }) {
            self.final_score = final_score;
            self.transition(Screen::GameOver);
        }
        events
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.simulation.as_ref()
    }

    // ── Game over ────────────────────────────────────────────────────────────

    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Append a typed character; input stops growing at 20 characters.
    pub fn push_name_char(&mut self, c: char) {
        if self.screen == Screen::GameOver
            && !c.is_control()
            && self.name_input.chars().count() < MAX_NAME_LEN
        {
            self.name_input.push(c);
        }
    }

    pub fn pop_name_char(&mut self) {
        if self.screen == Screen::GameOver {
            self.name_input.pop();
        }
    }

    /// Record the finished run and return to the menu.  A blank name is
    /// rejected and the session stays on the game-over screen.
    pub fn submit_score(&mut self, leaderboard: &mut Leaderboard) -> Result<(), LeaderboardError> {
        if self.screen != Screen::GameOver {
            return Ok(());
        }
        let entry = leaderboard.submit(&self.name_input, self.final_score, self.difficulty)?;
        self.last_player = Some(LastPlayer { name: entry.name.clone(), score: entry.score });
        self.back_to_menu();
        Ok(())
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    pub fn back_to_menu(&mut self) {
        if matches!(self.screen, Screen::Difficulty | Screen::GameOver) {
            self.name_input.clear();
            self.simulation = None;
            self.transition(Screen::Menu);
        }
    }

    fn transition(&mut self, to: Screen) {
        info!(from = ?self.screen, to = ?to, "screen change");
        self.screen = to;
    }
}
