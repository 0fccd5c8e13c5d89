//! Maze grid and collectible state
//!
//! The maze keeps an immutable copy of its original layout and a mutable
//! working grid. Collecting a pellet mutates the working grid; `reset`
//! re-derives it from the original.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::consts::{MAZE_HEIGHT, MAZE_WIDTH, WRAP_ROWS};
use crate::error::{SimError, SimResult};

/// Contents of one maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Pellet,
    PowerPellet,
}

impl Cell {
    /// Decode a layout code (0 empty, 1 wall, 2 pellet, 3 power pellet)
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Wall),
            2 => Some(Cell::Pellet),
            3 => Some(Cell::PowerPellet),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Wall => 1,
            Cell::Pellet => 2,
            Cell::PowerPellet => 3,
        }
    }

    /// True for cells that count toward the win condition
    pub fn is_collectible(&self) -> bool {
        matches!(self, Cell::Pellet | Cell::PowerPellet)
    }
}

/// Reference layout: 0 empty, 1 wall, 2 pellet, 3 power pellet
#[rustfmt::skip]
pub const REFERENCE_LAYOUT: [[u8; MAZE_WIDTH]; MAZE_HEIGHT] = [
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
    [1,2,2,2,2,2,2,2,2,2,2,2,2,1,2,2,2,2,2,2,2,2,2,2,2,2,1],
    [1,3,1,1,1,1,2,1,1,1,1,1,2,1,2,1,1,1,1,1,2,1,1,1,1,3,1],
    [1,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,1],
    [1,2,1,1,1,1,2,1,1,2,1,1,1,1,1,1,1,2,1,1,2,1,1,1,1,2,1],
    [1,2,2,2,2,2,2,1,1,2,2,2,2,1,2,2,2,2,1,1,2,2,2,2,2,2,1],
    [1,1,1,1,1,1,2,1,1,1,1,1,0,1,0,1,1,1,1,1,2,1,1,1,1,1,1],
    [0,0,0,0,0,1,2,1,1,0,0,0,0,0,0,0,0,0,1,1,2,1,0,0,0,0,0],
    [0,0,0,0,0,1,2,1,1,0,1,1,0,0,0,1,1,0,1,1,2,1,0,0,0,0,0],
    [1,1,1,1,1,1,2,1,1,0,1,0,0,0,0,0,1,0,1,1,2,1,1,1,1,1,1],
    [0,0,0,0,0,0,2,0,0,0,1,0,0,0,0,0,1,0,0,0,2,0,0,0,0,0,0],
    [1,1,1,1,1,1,2,1,1,0,1,0,0,0,0,0,1,0,1,1,2,1,1,1,1,1,1],
    [0,0,0,0,0,1,2,1,1,0,1,1,1,1,1,1,1,0,1,1,2,1,0,0,0,0,0],
    [0,0,0,0,0,1,2,1,1,0,0,0,0,0,0,0,0,0,1,1,2,1,0,0,0,0,0],
    [1,1,1,1,1,1,2,1,1,1,1,1,0,1,0,1,1,1,1,1,2,1,1,1,1,1,1],
    [1,2,2,2,2,2,2,2,2,2,2,2,2,1,2,2,2,2,2,2,2,2,2,2,2,2,1],
    [1,2,1,1,1,1,2,1,1,1,1,1,2,1,2,1,1,1,1,1,2,1,1,1,1,2,1],
    [1,3,2,2,1,1,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,1,1,2,2,3,1],
    [1,1,1,2,1,1,2,1,1,2,1,1,1,1,1,1,1,2,1,1,2,1,1,2,1,1,1],
    [1,2,2,2,2,2,2,1,1,2,2,2,2,1,2,2,2,2,1,1,2,2,2,2,2,2,1],
    [1,2,1,1,1,1,1,1,1,1,1,1,2,1,2,1,1,1,1,1,1,1,1,1,1,2,1],
    [1,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,1],
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
];

/// Maze grid with collectible bookkeeping
///
/// Serializable for snapshots only; build one with [`Maze::reference`] or
/// [`Maze::from_codes`] so the bookkeeping always matches the grid.
#[derive(Debug, Clone, Serialize)]
pub struct Maze {
    width: usize,
    height: usize,
    /// Layout as constructed, never mutated
    original: Vec<Cell>,
    /// Working grid (row-major)
    cells: Vec<Cell>,
    /// Pellets and power pellets still on the board
    remaining: usize,
    /// Rows whose left/right edges are passable
    wrap_rows: RangeInclusive<i32>,
}

impl Default for Maze {
    fn default() -> Self {
        Self::reference()
    }
}

impl Maze {
    /// The 27x23 reference maze with its side warp tunnel
    pub fn reference() -> Self {
        let original: Vec<Cell> = REFERENCE_LAYOUT
            .iter()
            .flatten()
            .map(|&code| Cell::from_code(code).unwrap_or(Cell::Wall))
            .collect();
        Self::from_cells(MAZE_WIDTH, MAZE_HEIGHT, original, WRAP_ROWS)
    }

    /// Build a maze from rows of layout codes
    pub fn from_codes<R: AsRef<[u8]>>(
        rows: &[R],
        wrap_rows: RangeInclusive<i32>,
    ) -> SimResult<Self> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(SimError::EmptyLayout);
        }

        let mut original = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(SimError::RaggedLayout {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &code) in row.iter().enumerate() {
                let cell = Cell::from_code(code).ok_or(SimError::UnknownCellCode { code, x, y })?;
                original.push(cell);
            }
        }

        Ok(Self::from_cells(width, rows.len(), original, wrap_rows))
    }

    fn from_cells(
        width: usize,
        height: usize,
        original: Vec<Cell>,
        wrap_rows: RangeInclusive<i32>,
    ) -> Self {
        let cells = original.clone();
        let remaining = count_collectibles(&cells);
        Self {
            width,
            height,
            original,
            cells,
            remaining,
            wrap_rows,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pellets and power pellets not yet collected
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn wrap_rows(&self) -> &RangeInclusive<i32> {
        &self.wrap_rows
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Cell at `(x, y)`, `None` outside the grid
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Rows of the working grid, top to bottom (for renderers)
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Whether an agent may occupy cell `(x, y)`
    ///
    /// Columns outside the grid are only open on the wrap corridor rows.
    pub fn can_move_to(&self, x: i32, y: i32) -> bool {
        if y < 0 || y as usize >= self.height {
            return false;
        }
        if x < 0 || x as usize >= self.width {
            return self.wrap_rows.contains(&y);
        }
        self.cell(x, y).is_some_and(|cell| cell != Cell::Wall)
    }

    /// Collect a pellet at `(x, y)`; false (and no change) if there is none
    pub fn collect_pellet(&mut self, x: i32, y: i32) -> bool {
        self.collect(x, y, Cell::Pellet)
    }

    /// Collect a power pellet at `(x, y)`; false (and no change) if there is none
    pub fn collect_power_pellet(&mut self, x: i32, y: i32) -> bool {
        self.collect(x, y, Cell::PowerPellet)
    }

    fn collect(&mut self, x: i32, y: i32, kind: Cell) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if self.cells[i] != kind {
            return false;
        }
        self.cells[i] = Cell::Empty;
        self.remaining = self.remaining.saturating_sub(1);
        debug_assert_eq!(self.remaining, count_collectibles(&self.cells));
        true
    }

    pub fn all_collected(&self) -> bool {
        self.remaining == 0
    }

    /// Restore every collectible from the original layout
    pub fn reset(&mut self) {
        self.cells.copy_from_slice(&self.original);
        self.remaining = count_collectibles(&self.cells);
    }
}

fn count_collectibles(cells: &[Cell]) -> usize {
    cells.iter().filter(|c| c.is_collectible()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_maze() -> Maze {
        Maze::from_codes(
            &[
                [1u8, 1, 1, 1, 1],
                [0, 2, 3, 2, 0],
                [1, 1, 1, 1, 1],
            ],
            1..=1,
        )
        .unwrap()
    }

    #[test]
    fn test_reference_maze_dimensions_and_counts() {
        let maze = Maze::reference();
        assert_eq!(maze.width(), 27);
        assert_eq!(maze.height(), 23);
        let expected = REFERENCE_LAYOUT
            .iter()
            .flatten()
            .filter(|&&c| c == 2 || c == 3)
            .count();
        assert_eq!(maze.remaining(), expected);
        assert_eq!(maze.cell(1, 2), Some(Cell::PowerPellet));
        assert_eq!(maze.rows().count(), 23);
        assert!(!maze.all_collected());
    }

    #[test]
    fn test_can_move_to_walls_and_bounds() {
        let maze = Maze::reference();
        assert!(!maze.can_move_to(0, 0));
        assert!(maze.can_move_to(1, 1));
        assert!(!maze.can_move_to(5, -1));
        assert!(!maze.can_move_to(5, 23));
        // Out-of-range columns are only open on the warp rows
        assert!(maze.can_move_to(-1, 10));
        assert!(maze.can_move_to(27, 12));
        assert!(maze.can_move_to(-100, 11));
        assert!(!maze.can_move_to(-1, 9));
        assert!(!maze.can_move_to(27, 13));
    }

    #[test]
    fn test_collect_pellet_and_power_pellet() {
        let mut maze = small_maze();
        assert_eq!(maze.remaining(), 3);

        assert!(maze.collect_pellet(1, 1));
        assert_eq!(maze.cell(1, 1), Some(Cell::Empty));
        assert_eq!(maze.remaining(), 2);
        // Second attempt is a no-op
        assert!(!maze.collect_pellet(1, 1));
        assert_eq!(maze.remaining(), 2);

        // Wrong kind leaves the cell alone
        assert!(!maze.collect_pellet(2, 1));
        assert_eq!(maze.cell(2, 1), Some(Cell::PowerPellet));
        assert!(maze.collect_power_pellet(2, 1));
        assert!(!maze.collect_power_pellet(3, 1));

        assert!(maze.collect_pellet(3, 1));
        assert!(maze.all_collected());
    }

    #[test]
    fn test_out_of_range_collection_is_noop() {
        let mut maze = small_maze();
        assert!(!maze.collect_pellet(-1, 1));
        assert!(!maze.collect_pellet(5, 1));
        assert!(!maze.collect_power_pellet(2, 7));
        assert_eq!(maze.remaining(), 3);
        assert_eq!(maze.cell(9, 9), None);
    }

    #[test]
    fn test_reset_restores_original_layout() {
        let mut maze = small_maze();
        maze.collect_pellet(1, 1);
        maze.collect_power_pellet(2, 1);
        maze.reset();
        assert_eq!(maze.remaining(), 3);
        assert_eq!(maze.cell(1, 1), Some(Cell::Pellet));
        assert_eq!(maze.cell(2, 1), Some(Cell::PowerPellet));

        // A second reset after more collection still starts from the original
        maze.collect_pellet(3, 1);
        maze.reset();
        assert_eq!(maze.cell(3, 1), Some(Cell::Pellet));
    }

    #[test]
    fn test_serializes_with_live_count() {
        let mut maze = Maze::reference();
        assert!(maze.collect_pellet(1, 1));
        let value = serde_json::to_value(&maze).unwrap();
        assert_eq!(value["remaining"], maze.remaining());
        assert_eq!(value["width"], 27);
        assert_eq!(value["cells"][28], "Empty");
    }

    #[test]
    fn test_from_codes_errors() {
        let empty: [[u8; 0]; 0] = [];
        assert!(matches!(
            Maze::from_codes(&empty, 0..=0),
            Err(SimError::EmptyLayout)
        ));

        let ragged: [&[u8]; 2] = [&[1, 1, 1], &[1, 1]];
        assert!(matches!(
            Maze::from_codes(&ragged, 0..=0),
            Err(SimError::RaggedLayout {
                row: 1,
                expected: 3,
                found: 2
            })
        ));

        assert!(matches!(
            Maze::from_codes(&[[1u8, 7, 1]], 0..=0),
            Err(SimError::UnknownCellCode { code: 7, x: 1, y: 0 })
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn remaining_matches_board(
                picks in proptest::collection::vec((-3i32..30, -3i32..26, any::<bool>()), 0..400)
            ) {
                let mut maze = Maze::reference();
                let mut last = maze.remaining();
                for (x, y, power) in picks {
                    if power {
                        maze.collect_power_pellet(x, y);
                    } else {
                        maze.collect_pellet(x, y);
                    }
                    let on_board = maze
                        .rows()
                        .flatten()
                        .filter(|c| c.is_collectible())
                        .count();
                    prop_assert_eq!(maze.remaining(), on_board);
                    prop_assert!(maze.remaining() <= last);
                    prop_assert_eq!(maze.all_collected(), maze.remaining() == 0);
                    last = maze.remaining();
                }
            }

            #[test]
            fn queries_never_panic(x in any::<i32>(), y in any::<i32>()) {
                let maze = Maze::reference();
                let open = maze.can_move_to(x, y);
                if y < 0 || y >= 23 {
                    prop_assert!(!open);
                }
                let _ = maze.cell(x, y);
            }
        }
    }
}
