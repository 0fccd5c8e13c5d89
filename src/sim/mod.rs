//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable update order (player first, adversaries in list order)
//! - No rendering or platform dependencies

pub mod adversary;
pub mod maze;
pub mod motion;
pub mod player;
pub mod state;
pub mod stepper;
pub mod tick;

pub use adversary::{Adversary, AdversaryMode, Personality};
pub use maze::{Cell, Maze, REFERENCE_LAYOUT};
pub use motion::{Direction, Step};
pub use player::{Player, PlayerView};
pub use state::{AdversarySnapshot, GameEvent, GameSession, GameState, PlayerSnapshot, Snapshot};
pub use stepper::FixedStep;
pub use tick::{TickInput, tick};
