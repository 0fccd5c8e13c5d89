//! Adversary AI
//!
//! Each adversary runs a small mode machine (chase, scatter, frightened,
//! eaten), picks a target cell from its mode, and on every cell center turns
//! toward (or, when frightened, away from) that target. Outside frightened
//! mode an adversary never reverses unless it is boxed in.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::maze::Maze;
use super::motion::{self, Direction, Step};
use super::player::PlayerView;
use crate::consts::FRIGHTENED_BLINK_THRESHOLD;
use crate::settings::Settings;
use crate::{cell_center, cell_of, is_grid_aligned};

/// Behavior mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdversaryMode {
    /// Head for the player's cell
    #[default]
    Chase,
    /// Head for the home corner
    Scatter,
    /// Wander erratically at reduced speed; can be eaten
    Frightened,
    /// Head back to the start cell
    Eaten,
}

/// The four reference adversaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Personality {
    Red,
    Pink,
    Cyan,
    Orange,
}

impl Personality {
    pub const ALL: [Personality; 4] = [
        Personality::Red,
        Personality::Pink,
        Personality::Cyan,
        Personality::Orange,
    ];

    /// Body color as a CSS hex string
    pub fn color(&self) -> &'static str {
        match self {
            Personality::Red => "#ff0000",
            Personality::Pink => "#ffb8ff",
            Personality::Cyan => "#00ffff",
            Personality::Orange => "#ffb852",
        }
    }

    /// Start cell in the reference maze
    pub fn start_cell(&self) -> IVec2 {
        match self {
            Personality::Red => IVec2::new(13, 11),
            Personality::Pink => IVec2::new(13, 13),
            Personality::Cyan => IVec2::new(12, 13),
            Personality::Orange => IVec2::new(14, 13),
        }
    }

    /// Scatter corner in the reference maze
    pub fn home_corner(&self) -> IVec2 {
        match self {
            Personality::Red => IVec2::new(25, 0),
            Personality::Pink => IVec2::new(2, 0),
            Personality::Cyan => IVec2::new(25, 22),
            Personality::Orange => IVec2::new(2, 22),
        }
    }
}

/// A pursuing adversary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub personality: Personality,
    /// Continuous position in cell units
    pub pos: Vec2,
    pub direction: Direction,
    pub mode: AdversaryMode,
    /// Frightened countdown (seconds left)
    pub mode_timer: f32,
    /// Time since the last chase/scatter flip
    pub cycle_timer: f32,
    /// Cell the adversary is steering toward this tick
    pub target: IVec2,
    pub start: IVec2,
    /// Scatter destination
    pub home_corner: IVec2,
    /// Base speed (cells per second)
    pub speed: f32,
    pub frightened_speed_factor: f32,
    pub frightened_duration: f32,
    pub mode_cycle_duration: f32,
}

impl Adversary {
    pub fn new(personality: Personality, start: IVec2, home_corner: IVec2, settings: &Settings) -> Self {
        Self {
            personality,
            pos: cell_center(start),
            direction: Direction::Up,
            mode: AdversaryMode::Chase,
            mode_timer: 0.0,
            cycle_timer: 0.0,
            target: start,
            start,
            home_corner,
            speed: settings.adversary_speed,
            frightened_speed_factor: settings.frightened_speed_factor,
            frightened_duration: settings.frightened_duration,
            mode_cycle_duration: settings.mode_cycle_duration,
        }
    }

    /// Adversary placed at its reference start cell with its reference corner
    pub fn reference(personality: Personality, settings: &Settings) -> Self {
        Self::new(
            personality,
            personality.start_cell(),
            personality.home_corner(),
            settings,
        )
    }

    /// Back to the start cell in chase mode, heading up, timers cleared
    pub fn reset(&mut self) {
        self.pos = cell_center(self.start);
        self.direction = Direction::Up;
        self.mode = AdversaryMode::Chase;
        self.mode_timer = 0.0;
        self.cycle_timer = 0.0;
    }

    /// Enter frightened mode (no effect while eaten); reverses immediately
    pub fn frighten(&mut self) {
        if self.mode == AdversaryMode::Eaten {
            return;
        }
        self.mode = AdversaryMode::Frightened;
        self.mode_timer = self.frightened_duration;
        self.direction = self.direction.opposite();
    }

    /// Send the adversary home; it resets once it reaches its start cell
    pub fn mark_eaten(&mut self) {
        self.mode = AdversaryMode::Eaten;
        self.mode_timer = 0.0;
    }

    pub fn is_frightened(&self) -> bool {
        self.mode == AdversaryMode::Frightened
    }

    /// Frightened and close enough to expiry that renderers should blink it
    pub fn frightened_expiring(&self) -> bool {
        self.is_frightened() && self.mode_timer < FRIGHTENED_BLINK_THRESHOLD
    }

    pub fn current_speed(&self) -> f32 {
        if self.is_frightened() {
            self.speed * self.frightened_speed_factor
        } else {
            self.speed
        }
    }

    /// Advance one tick
    pub fn update(&mut self, dt: f32, maze: &Maze, player: &impl PlayerView, rng: &mut impl Rng) {
        self.advance_timers(dt);
        self.set_target(maze, player, rng);
        self.choose_direction(maze);

        let mut budget = self.current_speed() * dt;
        while budget > 0.0 {
            let (step, left) = motion::advance(&mut self.pos, self.direction, budget, maze);
            motion::wrap_x(&mut self.pos, maze.width());

            if self.mode == AdversaryMode::Eaten
                && is_grid_aligned(self.pos)
                && cell_of(self.pos) == self.start
            {
                log::debug!("{:?} made it home", self.personality);
                self.reset();
                break;
            }
            if step == Step::Blocked {
                log::trace!(
                    "{:?} blocked at {:?} heading {:?}",
                    self.personality,
                    cell_of(self.pos),
                    self.direction
                );
                break;
            }

            // Leftover distance means we stopped on a center
            budget = left;
            if budget > 0.0 {
                self.choose_direction(maze);
            }
        }
    }

    /// Frightened countdown and the independent chase/scatter cycle
    pub fn advance_timers(&mut self, dt: f32) {
        if self.is_frightened() {
            self.mode_timer -= dt;
            if self.mode_timer <= 0.0 {
                self.mode_timer = 0.0;
                self.mode = AdversaryMode::Chase;
            }
        }

        self.cycle_timer += dt;
        if self.cycle_timer >= self.mode_cycle_duration {
            self.cycle_timer = 0.0;
            // Frightened and eaten adversaries keep their mode through a flip
            self.mode = match self.mode {
                AdversaryMode::Chase => AdversaryMode::Scatter,
                AdversaryMode::Scatter => AdversaryMode::Chase,
                other => other,
            };
        }
    }

    /// Pick this tick's target cell from the current mode
    pub fn set_target(&mut self, maze: &Maze, player: &impl PlayerView, rng: &mut impl Rng) {
        self.target = match self.mode {
            AdversaryMode::Chase => player.grid_cell(),
            AdversaryMode::Scatter => self.home_corner,
            AdversaryMode::Frightened => IVec2::new(
                rng.random_range(0..maze.width() as i32),
                rng.random_range(0..maze.height() as i32),
            ),
            AdversaryMode::Eaten => self.start,
        };
    }

    /// On a cell center, turn toward the target (away from it when frightened)
    pub fn choose_direction(&mut self, maze: &Maze) {
        if !is_grid_aligned(self.pos) {
            return;
        }

        let here = cell_of(self.pos);
        let reverse = self.direction.opposite();
        let frightened = self.is_frightened();

        // Ties keep the earliest candidate in up, down, left, right order
        let mut best: Option<(Direction, f32)> = None;
        for dir in Direction::ALL {
            let next = here + dir.delta();
            if !maze.can_move_to(next.x, next.y) {
                continue;
            }
            if !frightened && dir == reverse {
                continue;
            }
            let distance = motion::cell_distance(next, self.target);
            let better = match best {
                None => true,
                Some((_, best_distance)) if frightened => distance > best_distance,
                Some((_, best_distance)) => distance < best_distance,
            };
            if better {
                best = Some((dir, distance));
            }
        }

        match best {
            Some((dir, _)) => {
                if !dir.is_parallel(self.direction) {
                    self.pos = cell_center(here);
                }
                self.direction = dir;
            }
            None => self.direction = reverse,
        }
    }
}
