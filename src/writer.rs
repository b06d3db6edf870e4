use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::direction::Direction;
use crate::maze::{Coord, Maze};

/// A maze file read back into memory, as produced by [`write_maze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeFile {
    pub width: i32,
    pub height: i32,
    /// Row-major wall nibbles, one per cell (bit 0 = north .. bit 3 = west,
    /// set = closed).
    pub walls: Vec<u8>,
    pub entry: Coord,
    pub exit: Coord,
    pub moves: Vec<Direction>,
}

/// Serializes the maze and its solution: one hex digit per cell, a blank
/// separator line, the entry and exit coordinates, then the solution as a
/// single line of direction letters.
pub fn write_maze<W: Write>(maze: &Maze, solution: &[Coord], mut out: W) -> io::Result<()> {
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            write!(out, "{:x}", maze.cell(x, y).bits())?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;
    let (x, y) = maze.entry();
    writeln!(out, "{} {}", x, y)?;
    let (x, y) = maze.exit();
    writeln!(out, "{} {}", x, y)?;

    let mut letters = String::new();
    for pair in solution.windows(2) {
        let (dx, dy) = (pair[1].0 - pair[0].0, pair[1].1 - pair[0].1);
        letters.push(match Direction::from_delta(dx, dy) {
            Some(d) => d.letter(),
            None => 'N',
        });
    }
    writeln!(out, "{}", letters)?;
    Ok(())
}

/// Writes the maze file to `path`, creating or truncating it.
pub fn save(maze: &Maze, solution: &[Coord], path: &str) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_maze(maze, solution, &mut out)?;
    out.flush()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MissingSection(&'static str),
    Digit { row: usize, col: usize },
    RaggedRow { row: usize },
    Endpoint(&'static str),
    Move { col: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingSection(name) => write!(f, "missing {} section", name),
            ParseError::Digit { row, col } => {
                write!(f, "bad wall digit at row {}, column {}", row, col)
            }
            ParseError::RaggedRow { row } => write!(f, "row {} has a different width", row),
            ParseError::Endpoint(name) => write!(f, "malformed {} line", name),
            ParseError::Move { col } => write!(f, "bad move letter at column {}", col),
        }
    }
}

impl Error for ParseError {}

/// Parses text in the maze file format back into a [`MazeFile`].
pub fn parse(text: &str) -> Result<MazeFile, ParseError> {
    let mut lines = text.lines();

    let mut walls = Vec::new();
    let mut width = 0usize;
    let mut rows = 0usize;
    loop {
        // the blank separator or the end of input both close the section
        let line = match lines.next() {
            Some(line) if !line.is_empty() => line,
            _ => break,
        };
        if rows == 0 {
            width = line.len();
        } else if line.len() != width {
            return Err(ParseError::RaggedRow { row: rows });
        }
        for (col, ch) in line.chars().enumerate() {
            match ch.to_digit(16) {
                Some(digit) => walls.push(digit as u8),
                None => return Err(ParseError::Digit { row: rows, col }),
            }
        }
        rows += 1;
    }
    if rows == 0 {
        return Err(ParseError::MissingSection("walls"));
    }

    let entry = parse_endpoint("entry", lines.next())?;
    let exit = parse_endpoint("exit", lines.next())?;

    let moves_line = lines.next().unwrap_or("");
    let mut moves = Vec::with_capacity(moves_line.len());
    for (col, ch) in moves_line.chars().enumerate() {
        moves.push(match ch {
            'N' => Direction::North,
            'E' => Direction::East,
            'S' => Direction::South,
            'W' => Direction::West,
            _ => return Err(ParseError::Move { col }),
        });
    }

    Ok(MazeFile {
        width: width as i32,
        height: rows as i32,
        walls,
        entry,
        exit,
        moves,
    })
}

fn parse_endpoint(name: &'static str, line: Option<&str>) -> Result<Coord, ParseError> {
    let line = match line {
        Some(line) => line,
        None => return Err(ParseError::MissingSection(name)),
    };
    let mut pieces = line.split_whitespace();
    let x = pieces.next().and_then(|v| v.parse().ok());
    let y = pieces.next().and_then(|v| v.parse().ok());
    match (x, y) {
        (Some(x), Some(y)) if pieces.next().is_none() => Ok((x, y)),
        _ => Err(ParseError::Endpoint(name)),
    }
}
