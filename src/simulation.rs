//! Owning wrapper around the pure step function.
//!
//! `Simulation` is the single writer of a session's state.  The shell feeds
//! it one `InputState` per frame and reads back a `&SessionState` snapshot
//! for drawing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::compute::{init_state, quit, tick};
use crate::entities::{Difficulty, FrameEvent, InputState, SessionState};

pub struct Simulation<R: Rng = StdRng> {
    state: SessionState,
    rng: R,
}

impl Simulation<StdRng> {
    /// Start a session seeded from OS entropy.
    pub fn start(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_entropy())
    }

    /// Start a reproducible session.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(difficulty: Difficulty, mut rng: R) -> Self {
        let state = init_state(difficulty, &mut rng);
        Self { state, rng }
    }

    /// Advance one frame.  Returns at most one `GameOver` per session; once
    /// the session has ended every further step is a no-op.
    pub fn step(&mut self, input: &InputState) -> Vec<FrameEvent> {
        let (next, events) = tick(&self.state, input, &mut self.rng);
        self.state = next;
        events
    }

    /// Force the session to end now.  `None` if it had already ended.
    pub fn quit(&mut self) -> Option<FrameEvent> {
        let (next, event) = quit(&self.state);
        self.state = next;
        event
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    /// Read-only view for the render adapter.
    pub fn snapshot(&self) -> &SessionState {
        &self.state
    }
}
