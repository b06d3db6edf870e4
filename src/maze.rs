use std::error::Error;
use std::fmt;

use crate::direction::Direction;

/// Grid coordinate `(x, y)`; `(0, 0)` is the top-left cell.
pub type Coord = (i32, i32);

const STAMP_W: i32 = 7;
const STAMP_H: i32 = 5;

// The 18 cells of the "42" glyph, relative to the stamp's 7x5 box.
const STAMP_CELLS: [Coord; 18] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 2),
    (2, 2),
    (2, 3),
    (2, 4),
    (4, 0),
    (5, 0),
    (6, 0),
    (6, 1),
    (6, 2),
    (5, 2),
    (4, 2),
    (4, 3),
    (4, 4),
    (5, 4),
    (6, 4),
];

/// Per-cell wall state: `walls[d as usize]` is true while the wall towards
/// `d` is closed. A locked cell's walls are permanently fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    walls: [bool; 4],
    locked: bool,
}

impl Cell {
    const CLOSED: Cell = Cell {
        walls: [true; 4],
        locked: false,
    };

    pub const fn closed(self, d: Direction) -> bool {
        self.walls[d as usize]
    }

    pub const fn locked(self) -> bool {
        self.locked
    }

    /// Wall state packed into the low nibble: bit0 = North closed,
    /// bit1 = East, bit2 = South, bit3 = West.
    pub fn bits(self) -> u8 {
        let mut bits = 0;
        for d in Direction::ALL {
            if self.closed(d) {
                bits |= 1 << d as u8;
            }
        }
        bits
    }

    fn set_wall(&mut self, d: Direction, closed: bool) {
        self.walls[d as usize] = closed;
    }

    fn reset(&mut self) {
        if !self.locked {
            self.walls = [true; 4];
        }
    }
}

/// Why a maze could not be constructed. All variants are fatal: the inputs
/// are deterministic, so retrying cannot help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    Dimensions { width: i32, height: i32 },
    OutOfBounds { name: &'static str, coord: Coord },
    EntryIsExit(Coord),
    OnStamp { name: &'static str, coord: Coord },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::Dimensions { width, height } => {
                write!(f, "width/height must be > 0, got {}x{}", width, height)
            }
            MazeError::OutOfBounds { name, coord } => {
                write!(f, "{} {:?} is outside the maze bounds", name, coord)
            }
            MazeError::EntryIsExit(coord) => {
                write!(f, "entry and exit must be different, both are {:?}", coord)
            }
            MazeError::OnStamp { name, coord } => {
                write!(f, "{} {:?} lands on the '42' stamp", name, coord)
            }
        }
    }
}

impl Error for MazeError {}

/// A rectangular grid of wall cells with a fixed entry and exit.
///
/// The maze owns its cells; generator and solver only borrow it. Three
/// invariants hold after every mutation: boundary-facing walls of edge cells
/// stay closed, wall state is symmetric across each shared edge, and locked
/// cells never change.
#[derive(Debug, Clone)]
pub struct Maze {
    width: i32,
    height: i32,
    entry: Coord,
    exit: Coord,
    perfect: bool,
    stamp_drawn: bool,
    cells: Vec<Cell>,
}

impl Maze {
    pub fn new(
        width: i32,
        height: i32,
        entry: Coord,
        exit: Coord,
        perfect: bool,
    ) -> Result<Self, MazeError> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::Dimensions { width, height });
        }
        let mut maze = Maze {
            width,
            height,
            entry,
            exit,
            perfect,
            stamp_drawn: true,
            cells: vec![Cell::CLOSED; (width * height) as usize],
        };
        if !maze.in_bounds(entry.0, entry.1) {
            return Err(MazeError::OutOfBounds {
                name: "entry",
                coord: entry,
            });
        }
        if !maze.in_bounds(exit.0, exit.1) {
            return Err(MazeError::OutOfBounds {
                name: "exit",
                coord: exit,
            });
        }
        if entry == exit {
            return Err(MazeError::EntryIsExit(entry));
        }
        maze.draw_stamp();
        maze.close_borders();
        if maze.cell(entry.0, entry.1).locked() {
            return Err(MazeError::OnStamp {
                name: "entry",
                coord: entry,
            });
        }
        if maze.cell(exit.0, exit.1).locked() {
            return Err(MazeError::OnStamp {
                name: "exit",
                coord: exit,
            });
        }
        Ok(maze)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn entry(&self) -> Coord {
        self.entry
    }

    pub fn exit(&self) -> Coord {
        self.exit
    }

    pub fn perfect(&self) -> bool {
        self.perfect
    }

    /// False when the grid was too small to hold the center stamp.
    pub fn stamp_drawn(&self) -> bool {
        self.stamp_drawn
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Wall state of the cell at (x, y).
    ///
    /// # Panics
    /// Panics when (x, y) is out of bounds.
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        assert!(self.in_bounds(x, y), "cell ({}, {}) out of bounds", x, y);
        self.cells[self.idx(x, y)]
    }

    /// In-bounds neighbors of (x, y) as `(direction, nx, ny)`, listed in
    /// `Direction::ALL` order.
    pub fn neighbors(&self, x: i32, y: i32) -> Vec<(Direction, i32, i32)> {
        let mut result = Vec::with_capacity(4);
        for d in Direction::ALL {
            let (dx, dy) = d.delta();
            let (nx, ny) = (x + dx, y + dy);
            if self.in_bounds(nx, ny) {
                result.push((d, nx, ny));
            }
        }
        result
    }

    /// Opens the wall between (x, y) and its neighbor towards `d`, on both
    /// sides of the edge.
    ///
    /// # Panics
    /// Panics when the neighbor is out of bounds or either endpoint is
    /// locked. Correct callers filter candidates through [`Maze::neighbors`]
    /// and the lock flags first; tripping this is a generator bug, not a
    /// recoverable condition.
    pub fn carve(&mut self, x: i32, y: i32, d: Direction) {
        let (dx, dy) = d.delta();
        let (nx, ny) = (x + dx, y + dy);
        assert!(
            self.in_bounds(x, y) && self.in_bounds(nx, ny),
            "carve ({}, {}) towards {:?} leaves the maze",
            x,
            y,
            d
        );
        assert!(
            !self.cell(x, y).locked() && !self.cell(nx, ny).locked(),
            "carve ({}, {}) towards {:?} touches a locked cell",
            x,
            y,
            d
        );
        let i = self.idx(x, y);
        self.cells[i].set_wall(d, false);
        let j = self.idx(nx, ny);
        self.cells[j].set_wall(d.opposite(), false);
        self.close_borders();
    }

    /// Closes every wall of (x, y) plus the matching wall of each in-bounds
    /// neighbor, then locks the cell. Ignores out-of-bounds coordinates.
    /// This is how stamp cells come to exist; nothing unlocks a cell.
    pub fn fill(&mut self, x: i32, y: i32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.idx(x, y);
        self.cells[i].walls = [true; 4];
        for (d, nx, ny) in self.neighbors(x, y) {
            let j = self.idx(nx, ny);
            self.cells[j].set_wall(d.opposite(), true);
        }
        self.cells[i].locked = true;
        self.close_borders();
    }

    /// Returns every non-locked cell to the all-closed state. Locked cells
    /// keep their walls. Called before each regeneration.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    fn idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    fn close_borders(&mut self) {
        for x in 0..self.width {
            let top = self.idx(x, 0);
            self.cells[top].set_wall(Direction::North, true);
            let bottom = self.idx(x, self.height - 1);
            self.cells[bottom].set_wall(Direction::South, true);
        }
        for y in 0..self.height {
            let left = self.idx(0, y);
            self.cells[left].set_wall(Direction::West, true);
            let right = self.idx(self.width - 1, y);
            self.cells[right].set_wall(Direction::East, true);
        }
    }

    fn draw_stamp(&mut self) {
        if self.width <= STAMP_W + 1 || self.height <= STAMP_H + 1 {
            self.stamp_drawn = false;
            return;
        }
        // ceil-divide the surplus; an odd margin leans right/down
        let cx = (self.width - STAMP_W + 1) / 2;
        let cy = (self.height - STAMP_H + 1) / 2;
        for (x, y) in STAMP_CELLS {
            self.fill(cx + x, cy + y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(width: i32, height: i32) -> Maze {
        Maze::new(width, height, (0, 0), (width - 1, height - 1), true).unwrap()
    }

    #[test]
    fn new_cells_are_fully_closed() {
        let maze = plain(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(maze.cell(x, y).bits(), 0xf);
                assert!(!maze.cell(x, y).locked());
            }
        }
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            Maze::new(0, 5, (0, 0), (1, 1), true).unwrap_err(),
            MazeError::Dimensions {
                width: 0,
                height: 5
            }
        );
        assert!(Maze::new(5, -1, (0, 0), (1, 1), true).is_err());
    }

    #[test]
    fn rejects_out_of_bounds_endpoints() {
        assert_eq!(
            Maze::new(5, 5, (5, 0), (1, 1), true).unwrap_err(),
            MazeError::OutOfBounds {
                name: "entry",
                coord: (5, 0)
            }
        );
        assert_eq!(
            Maze::new(5, 5, (0, 0), (0, -1), true).unwrap_err(),
            MazeError::OutOfBounds {
                name: "exit",
                coord: (0, -1)
            }
        );
    }

    #[test]
    fn rejects_equal_entry_and_exit() {
        assert_eq!(
            Maze::new(5, 5, (0, 0), (0, 0), true).unwrap_err(),
            MazeError::EntryIsExit((0, 0))
        );
    }

    #[test]
    fn rejects_endpoints_on_the_stamp() {
        // 20x15 puts the stamp box at x 7..=13, y 5..=9; (7, 5) is its
        // top-left glyph cell.
        let err = Maze::new(20, 15, (7, 5), (19, 14), true).unwrap_err();
        assert_eq!(
            err,
            MazeError::OnStamp {
                name: "entry",
                coord: (7, 5)
            }
        );
        let err = Maze::new(20, 15, (0, 0), (7, 5), true).unwrap_err();
        assert_eq!(
            err,
            MazeError::OnStamp {
                name: "exit",
                coord: (7, 5)
            }
        );
    }

    #[test]
    fn stamp_is_drawn_on_large_grids() {
        let maze = plain(20, 15);
        assert!(maze.stamp_drawn());
        let locked: Vec<Coord> = (0..15)
            .flat_map(|y| (0..20).map(move |x| (x, y)))
            .filter(|&(x, y)| maze.cell(x, y).locked())
            .collect();
        assert_eq!(locked.len(), STAMP_CELLS.len());
        for (x, y) in STAMP_CELLS {
            assert!(maze.cell(7 + x, 5 + y).locked());
        }
    }

    #[test]
    fn stamp_is_skipped_on_small_grids() {
        for (w, h) in [(5, 5), (8, 20), (20, 6)] {
            let maze = plain(w, h);
            assert!(!maze.stamp_drawn(), "{}x{} should skip the stamp", w, h);
            for y in 0..h {
                for x in 0..w {
                    assert!(!maze.cell(x, y).locked());
                }
            }
        }
    }

    #[test]
    fn neighbors_follow_direction_order_and_bounds() {
        let maze = plain(4, 3);
        assert_eq!(
            maze.neighbors(0, 0),
            vec![(Direction::East, 1, 0), (Direction::South, 0, 1)]
        );
        assert_eq!(
            maze.neighbors(1, 1),
            vec![
                (Direction::North, 1, 0),
                (Direction::East, 2, 1),
                (Direction::South, 1, 2),
                (Direction::West, 0, 1),
            ]
        );
    }

    #[test]
    fn carve_opens_both_sides() {
        let mut maze = plain(4, 3);
        maze.carve(1, 1, Direction::East);
        assert!(!maze.cell(1, 1).closed(Direction::East));
        assert!(!maze.cell(2, 1).closed(Direction::West));
        // untouched walls stay closed
        assert!(maze.cell(1, 1).closed(Direction::North));
        assert!(maze.cell(2, 1).closed(Direction::East));
    }

    #[test]
    #[should_panic(expected = "leaves the maze")]
    fn carve_panics_out_of_bounds() {
        let mut maze = plain(4, 3);
        maze.carve(0, 0, Direction::North);
    }

    #[test]
    #[should_panic(expected = "locked cell")]
    fn carve_panics_on_locked_cells() {
        let mut maze = plain(20, 15);
        // (6, 5) sits just west of the stamp's (7, 5)
        maze.carve(6, 5, Direction::East);
    }

    #[test]
    fn fill_closes_locks_and_seals_neighbors() {
        let mut maze = plain(5, 5);
        maze.carve(2, 2, Direction::East);
        maze.carve(2, 2, Direction::South);
        maze.fill(2, 2);
        assert!(maze.cell(2, 2).locked());
        assert_eq!(maze.cell(2, 2).bits(), 0xf);
        assert!(maze.cell(3, 2).closed(Direction::West));
        assert!(maze.cell(2, 3).closed(Direction::North));
        // out of bounds is a no-op
        maze.fill(-1, 7);
    }

    #[test]
    fn reset_restores_unlocked_cells_only() {
        let mut maze = plain(20, 15);
        maze.carve(0, 0, Direction::East);
        maze.carve(0, 0, Direction::South);
        let stamp_bits: Vec<u8> = STAMP_CELLS
            .iter()
            .map(|&(x, y)| maze.cell(7 + x, 5 + y).bits())
            .collect();
        maze.reset();
        assert_eq!(maze.cell(0, 0).bits(), 0xf);
        assert_eq!(maze.cell(1, 0).bits(), 0xf);
        let after: Vec<u8> = STAMP_CELLS
            .iter()
            .map(|&(x, y)| maze.cell(7 + x, 5 + y).bits())
            .collect();
        assert_eq!(stamp_bits, after);
    }

    #[test]
    fn borders_stay_closed() {
        let mut maze = plain(6, 4);
        maze.carve(0, 0, Direction::East);
        maze.carve(5, 3, Direction::North);
        for x in 0..6 {
            assert!(maze.cell(x, 0).closed(Direction::North));
            assert!(maze.cell(x, 3).closed(Direction::South));
        }
        for y in 0..4 {
            assert!(maze.cell(0, y).closed(Direction::West));
            assert!(maze.cell(5, y).closed(Direction::East));
        }
    }

    #[test]
    fn bits_pack_nesw_low_to_high() {
        let mut maze = plain(3, 3);
        maze.carve(1, 1, Direction::East);
        // east open clears bit 1
        assert_eq!(maze.cell(1, 1).bits(), 0xd);
        maze.carve(1, 1, Direction::South);
        assert_eq!(maze.cell(1, 1).bits(), 0x9);
        assert_eq!(maze.cell(1, 2).bits(), 0xe);
    }
}
