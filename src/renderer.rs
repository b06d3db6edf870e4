use std::collections::HashSet;
use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::direction::Direction;
use crate::maze::{Coord, Maze};

const WALL_COLORS: [Color; 4] = [Color::Reset, Color::Yellow, Color::DarkGrey, Color::White];
const WALL: char = '█';
const STAMP: char = '▒';
const FLOOR: char = ' ';

const HELP: &str = "[1] new maze   [2] toggle path   [3] wall colors   [4]/[q] quit";
const STAMP_WARNING: &str = "Maze size is too small to draw the '42' in the middle";

/// One character of the composed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Px {
    ch: char,
    fg: Color,
}

/// Draws the maze as block art, one character per wall or cell, centered on
/// the terminal. Walls can cycle through a small palette; the entry, exit
/// and solution keep fixed colors.
pub struct Renderer {
    color_index: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { color_index: 0 }
    }

    /// Cycles the wall palette: terminal default, yellow, grey, white.
    pub fn rotate_colors(&mut self) {
        self.color_index = (self.color_index + 1) % WALL_COLORS.len();
    }

    /// Clears the screen and repaints everything: status line, centered
    /// maze, key help, and a warning when the stamp did not fit.
    pub fn draw(
        &self,
        stdout: &mut Stdout,
        maze: &Maze,
        solution: &[Coord],
        status: &str,
    ) -> io::Result<()> {
        let frame = self.compose(maze, solution);
        let frame_w = frame[0].len() as u16;
        let frame_h = frame.len() as u16;
        // one status row above, help and warning rows below
        let needed_h = frame_h + 3;

        let (term_w, term_h) = terminal::size()?;
        stdout.queue(Clear(ClearType::All))?;
        if term_w < frame_w || term_h < needed_h {
            stdout.queue(MoveTo(0, 0))?;
            stdout.queue(Print(format!(
                "Terminal too small: need {}x{}, have {}x{}",
                frame_w, needed_h, term_w, term_h
            )))?;
            return stdout.flush();
        }

        let origin_x = (term_w - frame_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;

        queue_centered(stdout, term_w, origin_y - 1, status, Color::White)?;
        for (row, pxs) in frame.iter().enumerate() {
            stdout.queue(MoveTo(origin_x, origin_y + row as u16))?;
            let mut fg = None;
            for px in pxs {
                if fg != Some(px.fg) {
                    stdout.queue(SetForegroundColor(px.fg))?;
                    fg = Some(px.fg);
                }
                stdout.queue(Print(px.ch))?;
            }
        }
        stdout.queue(ResetColor)?;

        let mut below = origin_y + frame_h;
        queue_centered(stdout, term_w, below, HELP, Color::White)?;
        if !maze.stamp_drawn() {
            below += 1;
            queue_centered(stdout, term_w, below, STAMP_WARNING, Color::Yellow)?;
        }
        stdout.flush()
    }

    fn wall_px(&self) -> Px {
        Px {
            ch: WALL,
            fg: WALL_COLORS[self.color_index],
        }
    }

    /// Builds the character frame, `2 * height + 1` rows by `2 * width + 1`
    /// columns: a border row, then a cell row and a wall row per maze row.
    /// Pure, so tests can check the layout without a terminal.
    fn compose(&self, maze: &Maze, solution: &[Coord]) -> Vec<Vec<Px>> {
        let on_path: HashSet<Coord> = solution.iter().copied().collect();
        let mut edges: HashSet<(Coord, Coord)> = HashSet::new();
        for pair in solution.windows(2) {
            edges.insert(edge(pair[0], pair[1]));
        }

        let wall = self.wall_px();
        let floor = Px {
            ch: FLOOR,
            fg: Color::Reset,
        };
        let path = Px {
            ch: WALL,
            fg: Color::Blue,
        };

        let w = maze.width();
        let h = maze.height();
        let cols = (2 * w + 1) as usize;
        let mut frame = Vec::with_capacity((2 * h + 1) as usize);
        frame.push(vec![wall; cols]);

        for y in 0..h {
            let mut cell_line = Vec::with_capacity(cols);
            let mut wall_line = Vec::with_capacity(cols);
            for x in 0..w {
                let cell = maze.cell(x, y);
                let south = cell.closed(Direction::South);
                if x == 0 {
                    let west = cell.closed(Direction::West);
                    cell_line.push(if west { wall } else { floor });
                    wall_line.push(if south || west { wall } else { floor });
                }

                cell_line.push(cell_px(maze, &on_path, x, y));
                let east_open = !cell.closed(Direction::East);
                if east_open && x + 1 < w && edges.contains(&edge((x, y), (x + 1, y))) {
                    cell_line.push(path);
                } else {
                    cell_line.push(if east_open { floor } else { wall });
                }

                if !south && maze.in_bounds(x, y + 1) && edges.contains(&edge((x, y), (x, y + 1))) {
                    wall_line.push(path);
                } else {
                    wall_line.push(if south { wall } else { floor });
                }
                let mut corner = south || cell.closed(Direction::East);
                if x + 1 < w {
                    corner = corner || maze.cell(x + 1, y).closed(Direction::South);
                }
                wall_line.push(if corner { wall } else { floor });
            }
            frame.push(cell_line);
            frame.push(wall_line);
        }
        frame
    }
}

fn cell_px(maze: &Maze, on_path: &HashSet<Coord>, x: i32, y: i32) -> Px {
    let coord = (x, y);
    let (ch, fg) = if coord == maze.entry() {
        (WALL, Color::Green)
    } else if coord == maze.exit() {
        (WALL, Color::Red)
    } else if on_path.contains(&coord) {
        (WALL, Color::Blue)
    } else if maze.cell(x, y).locked() {
        (STAMP, Color::Reset)
    } else {
        (FLOOR, Color::Reset)
    };
    Px { ch, fg }
}

/// Path edges are unordered; store them with the smaller endpoint first.
fn edge(a: Coord, b: Coord) -> (Coord, Coord) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn queue_centered(
    stdout: &mut Stdout,
    term_w: u16,
    row: u16,
    text: &str,
    color: Color,
) -> io::Result<()> {
    let width = UnicodeWidthStr::width(text) as u16;
    stdout.queue(MoveTo(term_w.saturating_sub(width) / 2, row))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(text))?;
    stdout.queue(ResetColor)?;
    Ok(())
}
