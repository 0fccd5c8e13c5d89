//! Maze Chase - A maze arcade game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, agents, adversary AI, game session)
//! - `settings`: Data-driven game balance with difficulty presets
//! - `error`: Error types for layout parsing and settings validation
//!
//! Rendering, keyboard wiring and frame scheduling live outside this crate.
//! They feed input into [`sim::GameSession`] and read its state back.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use settings::{Difficulty, Settings};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz keeps per-step motion well inside the alignment window)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the fixed-step driver will accept
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Reference maze dimensions (cells)
    pub const MAZE_WIDTH: usize = 27;
    pub const MAZE_HEIGHT: usize = 23;
    /// Rows where the left/right edges connect through the warp tunnel
    pub const WRAP_ROWS: std::ops::RangeInclusive<i32> = 10..=12;

    /// Distance from an integer coordinate that still counts as centered on a cell
    pub const ALIGN_EPSILON: f32 = 0.1;

    /// Player defaults (cells per second)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Mouth animation rate (phase units per second)
    pub const PLAYER_ANIMATION_SPEED: f32 = 10.0;
    /// Player start cell in the reference maze
    pub const PLAYER_START: (i32, i32) = (13, 17);

    /// Adversary defaults (cells per second)
    pub const ADVERSARY_SPEED: f32 = 3.0;
    /// Speed multiplier while frightened
    pub const FRIGHTENED_SPEED_FACTOR: f32 = 0.5;
    /// How long a power pellet frightens adversaries (seconds)
    pub const FRIGHTENED_DURATION: f32 = 8.0;
    /// Chase/scatter alternation period (seconds)
    pub const MODE_CYCLE_DURATION: f32 = 20.0;
    /// Frightened adversaries start blinking below this many seconds left
    pub const FRIGHTENED_BLINK_THRESHOLD: f32 = 2.0;

    /// Player/adversary contact distance (cells), deliberately under one tile
    pub const COLLISION_DISTANCE: f32 = 0.8;

    /// Lives at the start of a run
    pub const STARTING_LIVES: u8 = 3;

    /// Scoring
    pub const PELLET_SCORE: u64 = 10;
    pub const POWER_PELLET_SCORE: u64 = 50;
    pub const ADVERSARY_EATEN_SCORE: u64 = 200;
}

/// Round half up, so `-0.5` lands on `0` and `12.5` on `13`
#[inline]
pub fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}

/// Grid cell a continuous position belongs to
#[inline]
pub fn cell_of(pos: Vec2) -> IVec2 {
    IVec2::new(round_half_up(pos.x) as i32, round_half_up(pos.y) as i32)
}

/// Center of a grid cell as a continuous position
#[inline]
pub fn cell_center(cell: IVec2) -> Vec2 {
    cell.as_vec2()
}

/// True when both coordinates sit within [`consts::ALIGN_EPSILON`] of a cell center
#[inline]
pub fn is_grid_aligned(pos: Vec2) -> bool {
    (pos.x - round_half_up(pos.x)).abs() < consts::ALIGN_EPSILON
        && (pos.y - round_half_up(pos.y)).abs() < consts::ALIGN_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(12.5), 13.0);
        assert_eq!(round_half_up(12.49), 12.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-0.51), -1.0);
    }

    #[test]
    fn test_cell_of() {
        assert_eq!(cell_of(Vec2::new(3.4, 7.6)), IVec2::new(3, 8));
        assert_eq!(cell_of(Vec2::new(-0.2, 0.0)), IVec2::new(0, 0));
    }

    #[test]
    fn test_grid_alignment() {
        assert!(is_grid_aligned(Vec2::new(4.0, 9.0)));
        assert!(is_grid_aligned(Vec2::new(4.05, 8.96)));
        assert!(!is_grid_aligned(Vec2::new(4.2, 9.0)));
        assert!(!is_grid_aligned(Vec2::new(4.0, 9.5)));
    }
}
