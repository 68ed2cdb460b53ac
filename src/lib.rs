//! Neon Invaders: a single-screen arcade shooter.
//!
//! The simulation (`entities`, `spawn`, `compute`, `simulation`) is pure
//! and deterministic given an RNG.  `session`, `leaderboard` and `config`
//! form the shell the terminal binary drives.

pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod leaderboard;
pub mod session;
pub mod simulation;
pub mod spawn;

pub use entities::{Difficulty, FrameEvent, InputState, SessionState};
pub use error::GameError;
pub use simulation::Simulation;
