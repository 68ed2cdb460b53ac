//! Error types for the game core.

use thiserror::Error;

/// Errors raised when building game values from untrusted input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Difficulty must be one of the five selectable levels.
    #[error("invalid difficulty {0}: expected a value between 1 and 5")]
    InvalidDifficulty(u8),
}
