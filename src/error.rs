//! Centralized error types for the simulation.
//!
//! Nothing inside a running round returns these: blocked moves and unreachable targets degrade to holding
//! position. They only surface while building a maze or validating a configuration.

use crate::map::maze::Cell;

/// Main error type for the crate.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Maze parsing error: {0}")]
    MazeParse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Error type for maze parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Maze layout is empty")]
    Empty,
    #[error("Unknown character in maze: {character:?} at {cell}")]
    UnknownCharacter { character: char, cell: Cell },
    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("Border cell {0} must be a wall")]
    OpenBorder(Cell),
}

/// Errors found while validating a [`crate::config::RoundConfig`] against a maze.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{what} cell {cell} is not traversable")]
    BlockedCell { what: &'static str, cell: Cell },
    #[error("Phase schedule must contain at least one entry")]
    EmptySchedule,
    #[error("Phase schedule entry {0} has a zero duration")]
    ZeroDuration(usize),
    #[error("{0} period must be non-zero")]
    ZeroPeriod(&'static str),
    #[error("A round needs at least one life")]
    NoLives,
    #[error("Failed to load configuration: {0}")]
    Load(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(err.to_string())
    }
}

/// Result type for construction-time operations.
pub type GameResult<T> = Result<T, GameError>;
