//! Agent motion shared by the player and adversaries
//!
//! Agents move continuously between cell centers. A single call never carries
//! an agent past the next center, so callers get a chance to turn on every
//! center they reach. Heading into a wall stops the agent on the center in
//! front of it.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::maze::Maze;
use crate::{cell_center, cell_of, round_half_up};

/// Positions this close to a center along the direction of travel count as on it
const CENTER_EPSILON: f32 = 1e-4;

/// One of the four grid headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order used for tie-breaking: up, down, left, right
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in grid coordinates (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn vec(self) -> Vec2 {
        self.delta().as_vec2()
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Map a unit delta back to a direction; anything else is `None`
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when the two headings share an axis
    pub fn is_parallel(self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }
}

/// Result of a single motion step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Position advanced toward the next cell center
    Moved,
    /// Next cell is a wall; agent parked on the center of its current cell
    Blocked,
}

/// Move `pos` up to `distance` cells along `dir`, stopping on the next cell center
///
/// Returns the step taken and the distance left over. Leftover distance is
/// only non-zero when the agent landed exactly on a center (or was blocked),
/// so the caller can turn there and spend the rest.
pub fn advance(pos: &mut Vec2, dir: Direction, distance: f32, maze: &Maze) -> (Step, f32) {
    let delta = dir.vec();
    let (along, sign) = if dir.is_horizontal() {
        (pos.x, delta.x)
    } else {
        (pos.y, delta.y)
    };

    let nearest = round_half_up(along);
    let next = if (along - nearest).abs() < CENTER_EPSILON {
        nearest + sign
    } else if sign > 0.0 {
        along.ceil()
    } else {
        along.floor()
    };

    let mut ahead = *pos;
    if dir.is_horizontal() {
        ahead.x = next;
    } else {
        ahead.y = next;
    }
    let cell = cell_of(ahead);
    if !maze.can_move_to(cell.x, cell.y) {
        *pos = cell_center(cell_of(*pos));
        return (Step::Blocked, distance);
    }

    let gap = (next - along).abs();
    if distance >= gap {
        *pos = ahead;
        (Step::Moved, distance - gap)
    } else {
        *pos += delta * distance;
        (Step::Moved, 0.0)
    }
}

/// Carry an agent that left the grid through the warp tunnel to the other side
pub fn wrap_x(pos: &mut Vec2, width: usize) {
    let max_x = width.saturating_sub(1) as f32;
    if pos.x < 0.0 {
        pos.x = max_x;
    } else if pos.x > max_x {
        pos.x = 0.0;
    }
}

/// Euclidean distance between two cells
pub fn cell_distance(a: IVec2, b: IVec2) -> f32 {
    a.as_vec2().distance(b.as_vec2())
}
