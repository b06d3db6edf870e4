use std::error::Error;
use std::fmt;
use std::fs;
use std::io;

use crate::maze::Coord;

/// Runtime settings, read from a `KEY=VALUE` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: i32,
    pub height: i32,
    pub entry: Coord,
    pub exit: Coord,
    pub output_file: String,
    pub perfect: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 20,
            height: 15,
            entry: (0, 0),
            exit: (19, 14),
            output_file: "maze.txt".to_string(),
            perfect: true,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Value { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config: {}", e),
            ConfigError::Value { key, value } => {
                write!(f, "bad value for {}: {:?}", key, value)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Value { .. } => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl Config {
    /// Reads and parses the file at `path`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses `KEY=VALUE` lines on top of the defaults. Blank lines and
    /// `#` comments are skipped and unknown keys ignored; a recognized key
    /// with a malformed value is an error.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = match line.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (line, ""),
            };
            match key {
                "WIDTH" => config.width = parse_int("WIDTH", value)?,
                "HEIGHT" => config.height = parse_int("HEIGHT", value)?,
                "ENTRY" => config.entry = parse_pair("ENTRY", value)?,
                "EXIT" => config.exit = parse_pair("EXIT", value)?,
                "OUTPUT_FILE" => config.output_file = value.to_string(),
                "PERFECT" => config.perfect = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }
        Ok(config)
    }
}

fn parse_int(key: &'static str, value: &str) -> Result<i32, ConfigError> {
    value.parse().map_err(|_| ConfigError::Value {
        key,
        value: value.to_string(),
    })
}

fn parse_pair(key: &'static str, value: &str) -> Result<Coord, ConfigError> {
    if let Some((x, y)) = value.split_once(',') {
        if let (Ok(x), Ok(y)) = (x.trim().parse(), y.trim().parse()) {
            return Ok((x, y));
        }
    }
    Err(ConfigError::Value {
        key,
        value: value.to_string(),
    })
}
