//! Player controller
//!
//! Input is buffered: a requested heading is held until the cell one step
//! that way is open, then committed. Pressing a direction slightly before an
//! intersection therefore turns exactly at the intersection.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::maze::Maze;
use super::motion::{self, Direction, Step};
use crate::consts::PLAYER_ANIMATION_SPEED;
use crate::{cell_center, cell_of, is_grid_aligned};

/// Read-only view of the player used by adversary targeting
pub trait PlayerView {
    /// Cell the player currently occupies
    fn grid_cell(&self) -> IVec2;
}

/// The player-controlled agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Continuous position in cell units
    pub pos: Vec2,
    /// Current heading, `None` while stopped
    pub direction: Option<Direction>,
    /// Buffered heading waiting for an open cell
    pub requested: Option<Direction>,
    /// Mouth animation phase (render only)
    pub animation_phase: f32,
    /// Cell the player respawns on
    pub start: IVec2,
    /// Cells per second
    pub speed: f32,
}

impl Player {
    pub fn new(start: IVec2, speed: f32) -> Self {
        Self {
            pos: cell_center(start),
            direction: None,
            requested: None,
            animation_phase: 0.0,
            start,
            speed,
        }
    }

    /// Back to the start cell, stopped, with no pending request
    pub fn reset(&mut self) {
        self.pos = cell_center(self.start);
        self.direction = None;
        self.requested = None;
    }

    /// Buffer a heading from a unit delta; any other delta clears the buffer
    pub fn set_direction(&mut self, dx: i32, dy: i32) {
        self.requested = Direction::from_delta(dx, dy);
    }

    /// Buffer a heading
    pub fn request(&mut self, dir: Direction) {
        self.requested = Some(dir);
    }

    /// Turns are taken on a cell center; reversing or starting from rest is always allowed
    fn can_turn(&self, want: Direction) -> bool {
        match self.direction {
            None => true,
            Some(current) => current.is_parallel(want) || is_grid_aligned(self.pos),
        }
    }

    /// Commit the buffered heading if the turn is allowed and the way is open
    fn try_turn(&mut self, maze: &Maze) {
        let Some(want) = self.requested else {
            return;
        };
        if !self.can_turn(want) {
            return;
        }
        let next = cell_of(self.pos + want.vec());
        if maze.can_move_to(next.x, next.y) {
            let perpendicular = self.direction.is_none_or(|d| !d.is_parallel(want));
            if perpendicular {
                self.pos = cell_center(cell_of(self.pos));
            }
            self.direction = Some(want);
            self.requested = None;
        }
    }

    /// Advance one tick
    ///
    /// Motion stops on every cell center it reaches, where the buffered turn is
    /// retried before the rest of the tick's distance is spent.
    pub fn update(&mut self, dt: f32, maze: &Maze) {
        self.animation_phase += PLAYER_ANIMATION_SPEED * dt;

        let mut budget = self.speed * dt;
        loop {
            self.try_turn(maze);
            let Some(dir) = self.direction else {
                break;
            };
            if budget <= 0.0 {
                break;
            }

            let (step, left) = motion::advance(&mut self.pos, dir, budget, maze);
            motion::wrap_x(&mut self.pos, maze.width());
            budget = left;
            if step == Step::Blocked {
                log::trace!("Player stopped at wall {:?}", cell_of(self.pos));
                self.direction = None;
            }
        }
    }
}

impl PlayerView for Player {
    fn grid_cell(&self) -> IVec2 {
        cell_of(self.pos)
    }
}
