use std::collections::VecDeque;

use crate::maze::{Coord, Maze};

/// Breadth-first shortest-path search over the maze's open walls.
pub struct Solver<'a> {
    maze: &'a Maze,
}

impl<'a> Solver<'a> {
    pub fn new(maze: &'a Maze) -> Self {
        Solver { maze }
    }

    /// Shortest entry-to-exit path, entry first. Returns an empty vector
    /// when the exit cannot be reached; generation keeps the non-locked
    /// region connected, but the solver does not rely on that.
    pub fn solve(&self) -> Vec<Coord> {
        let w = self.maze.width();
        let h = self.maze.height();
        let idx = |(x, y): Coord| (y * w + x) as usize;

        let mut visited = vec![false; (w * h) as usize];
        let mut parent: Vec<Option<Coord>> = vec![None; (w * h) as usize];
        let mut queue = VecDeque::new();

        let entry = self.maze.entry();
        visited[idx(entry)] = true;
        queue.push_back(entry);

        while let Some((x, y)) = queue.pop_front() {
            if (x, y) == self.maze.exit() {
                let mut path = vec![(x, y)];
                let mut cur = (x, y);
                while let Some(prev) = parent[idx(cur)] {
                    path.push(prev);
                    cur = prev;
                }
                path.reverse();
                return path;
            }
            let cell = self.maze.cell(x, y);
            for (d, nx, ny) in self.maze.neighbors(x, y) {
                if !visited[idx((nx, ny))] && !cell.closed(d) {
                    visited[idx((nx, ny))] = true;
                    parent[idx((nx, ny))] = Some((x, y));
                    queue.push_back((nx, ny));
                }
            }
        }
        Vec::new()
    }
}
