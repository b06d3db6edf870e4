use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::direction::Direction;
use crate::maze::{Coord, Maze};

/// Carves a maze in place with a randomized depth-first backtracker.
///
/// The generator owns its own PRNG and reseeds it at the top of every
/// [`Generator::generate`] call, so a seed always reproduces the same maze
/// no matter what else the process does with randomness.
pub struct Generator<'a> {
    maze: &'a mut Maze,
    rng: ChaCha8Rng,
}

impl<'a> Generator<'a> {
    pub fn new(maze: &'a mut Maze) -> Self {
        Generator {
            maze,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    /// Regenerates the maze from `seed`: resets every non-locked cell,
    /// carves a spanning tree over them, then injects loops when the maze
    /// is not meant to be perfect.
    ///
    /// Every reachable non-locked cell is visited exactly once; the explicit
    /// stack keeps large grids clear of recursion limits.
    pub fn generate(&mut self, seed: u64) {
        self.maze.reset();
        self.rng = ChaCha8Rng::seed_from_u64(seed);

        let w = self.maze.width();
        let mut visited = vec![false; (w * self.maze.height()) as usize];
        let mut visited_count = 1usize;

        let (sx, sy) = self.random_unlocked_cell();
        visited[(sy * w + sx) as usize] = true;
        let mut stack = vec![(sx, sy)];

        while let Some(&(x, y)) = stack.last() {
            let candidates: Vec<(Direction, i32, i32)> = self
                .maze
                .neighbors(x, y)
                .into_iter()
                .filter(|&(d, nx, ny)| {
                    !visited[(ny * w + nx) as usize]
                        && !self.maze.cell(nx, ny).locked()
                        && !self.widens_corridor(x, y, d)
                })
                .collect();

            if let Some(&(d, nx, ny)) = candidates.choose(&mut self.rng) {
                self.maze.carve(x, y, d);
                visited[(ny * w + nx) as usize] = true;
                visited_count += 1;
                stack.push((nx, ny));
            } else {
                stack.pop();
            }
        }

        if !self.maze.perfect() {
            self.add_loops(&visited, visited_count);
        }
    }

    fn random_unlocked_cell(&mut self) -> Coord {
        loop {
            let x = self.rng.gen_range(0..self.maze.width());
            let y = self.rng.gen_range(0..self.maze.height());
            if !self.maze.cell(x, y).locked() {
                return (x, y);
            }
        }
    }

    /// True when opening the wall between (x, y) and its neighbor towards
    /// `d` would complete a fully open 3x3 block containing both cells —
    /// the room-like corridors the generator must never produce.
    fn widens_corridor(&self, x: i32, y: i32, d: Direction) -> bool {
        let (dx, dy) = d.delta();
        let (nx, ny) = (x + dx, y + dy);

        // normalize the prospective opening to its east/south owner cell
        let carved = match d {
            Direction::East => (x, y, Direction::East),
            Direction::West => (nx, ny, Direction::East),
            Direction::South => (x, y, Direction::South),
            Direction::North => (nx, ny, Direction::South),
        };

        // every 3x3 window holding both cells has its top-left corner here
        for tx in (x.max(nx) - 2)..=x.min(nx) {
            for ty in (y.max(ny) - 2)..=y.min(ny) {
                if self.block_fully_open(tx, ty, carved) {
                    return true;
                }
            }
        }
        false
    }

    /// Is the 3x3 window with top-left (tx, ty) fully open, treating the
    /// wall in `carved` as already open? Windows that stick out of bounds
    /// never count.
    fn block_fully_open(&self, tx: i32, ty: i32, carved: (i32, i32, Direction)) -> bool {
        if !self.maze.in_bounds(tx, ty) || !self.maze.in_bounds(tx + 2, ty + 2) {
            return false;
        }
        // 6 internal east walls: columns 0-1 of each row
        for row in 0..3 {
            for col in 0..2 {
                let (px, py) = (tx + col, ty + row);
                if carved == (px, py, Direction::East) {
                    continue;
                }
                if self.maze.cell(px, py).closed(Direction::East) {
                    return false;
                }
            }
        }
        // 6 internal south walls: rows 0-1 of each column
        for row in 0..2 {
            for col in 0..3 {
                let (px, py) = (tx + col, ty + row);
                if carved == (px, py, Direction::South) {
                    continue;
                }
                if self.maze.cell(px, py).closed(Direction::South) {
                    return false;
                }
            }
        }
        true
    }

    /// Opens roughly `visited / 10` extra walls between already-connected
    /// cells. Gives up after ten attempts per requested loop rather than
    /// spinning forever once no valid candidate remains.
    fn add_loops(&mut self, visited: &[bool], visited_count: usize) {
        let w = self.maze.width();
        let mut remaining = visited_count / 10;
        let mut attempts = remaining * 10;

        while remaining > 0 && attempts > 0 {
            attempts -= 1;
            let x = self.rng.gen_range(0..self.maze.width());
            let y = self.rng.gen_range(0..self.maze.height());
            if !visited[(y * w + x) as usize] || self.maze.cell(x, y).locked() {
                continue;
            }
            let neighbors = self.maze.neighbors(x, y);
            if let Some(&(d, nx, ny)) = neighbors.choose(&mut self.rng) {
                if visited[(ny * w + nx) as usize]
                    && !self.maze.cell(nx, ny).locked()
                    && self.maze.cell(x, y).closed(d)
                    && !self.widens_corridor(x, y, d)
                {
                    self.maze.carve(x, y, d);
                    remaining -= 1;
                }
            }
        }
    }
}
