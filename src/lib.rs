//! Seeded maze generation for the terminal: a wall-grid maze with a "42"
//! stamp in the middle, a shortest-path solver, a text file format and an
//! ANSI renderer.
//!
//! [`MazeApp`] ties the pieces together the way the binary uses them; the
//! individual modules work on their own as well.

pub mod config;
pub mod direction;
pub mod generator;
pub mod maze;
pub mod renderer;
pub mod solver;
pub mod writer;

use std::io;

use crate::config::Config;
use crate::generator::Generator;
use crate::maze::{Coord, Maze, MazeError};
use crate::solver::Solver;

/// Seed of the first generation; parameterless regenerations count up from
/// the current seed.
pub const DEFAULT_SEED: u64 = 42;

/// A maze together with the seed that carved it and its solution.
///
/// The three always agree: every (re)generation carves the maze and
/// re-solves it before control returns to the caller, so there is no
/// in-between state where the solution belongs to an older maze.
pub struct MazeApp {
    maze: Maze,
    seed: u64,
    solution: Vec<Coord>,
}

impl MazeApp {
    /// Builds the maze described by `config`, carves it with
    /// [`DEFAULT_SEED`] and solves it.
    pub fn new(config: &Config) -> Result<Self, MazeError> {
        let maze = Maze::new(
            config.width,
            config.height,
            config.entry,
            config.exit,
            config.perfect,
        )?;
        let mut app = MazeApp {
            maze,
            seed: DEFAULT_SEED,
            solution: Vec::new(),
        };
        app.refresh();
        Ok(app)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shortest entry-to-exit path of the current maze.
    pub fn solution(&self) -> &[Coord] {
        &self.solution
    }

    /// Carves a fresh maze and re-solves it. `Some(seed)` uses exactly that
    /// seed; `None` moves to the current seed plus one, so repeated presses
    /// stay reproducible without repeating a maze.
    pub fn regenerate(&mut self, seed: Option<u64>) {
        self.seed = match seed {
            Some(seed) => seed,
            None => self.seed.wrapping_add(1),
        };
        self.refresh();
    }

    /// Writes the current maze and solution to `path` in the text format.
    pub fn save(&self, path: &str) -> io::Result<()> {
        writer::save(&self.maze, &self.solution, path)
    }

    fn refresh(&mut self) {
        Generator::new(&mut self.maze).generate(self.seed);
        self.solution = Solver::new(&self.maze).solve();
    }
}
