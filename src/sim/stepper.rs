//! Fixed timestep driver
//!
//! Turns variable frame deltas into a whole number of `SIM_DT` ticks so the
//! simulation stays deterministic regardless of frame rate.

use super::state::GameSession;
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Frame-time accumulator
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame delta and call `step` once per whole tick it covers
    ///
    /// Returns the number of ticks run (at most `MAX_SUBSTEPS`).
    pub fn advance(&mut self, frame_dt: f32, mut step: impl FnMut(f32)) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator %= SIM_DT;
        }
        substeps
    }

    /// Drive a session for one frame; one-shot inputs apply to the first tick only
    pub fn drive(&mut self, session: &mut GameSession, input: &TickInput, frame_dt: f32) -> u32 {
        let mut input = input.clone();
        self.advance(frame_dt, |dt| {
            tick(session, &input, dt);
            input.pause = false;
        })
    }

    /// Fraction of a tick waiting in the accumulator (for render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
