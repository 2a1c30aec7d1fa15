use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load one of the session resources (dictionary or puzzle catalog).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{}' does not contain a JSON object of words", path.display())]
    NotAnObject { path: PathBuf },
    #[error("puzzle catalog '{}' contains no puzzles", path.display())]
    EmptyCatalog { path: PathBuf },
}

/// Invalid board or session configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size must be at least 1")]
    ZeroBoardSize,
    #[error("letter count {letters} is below the {vowels} guaranteed vowels")]
    TooFewLetters { letters: usize, vowels: usize },
    #[error("a {size}x{size} board cannot hold {letters} letters plus the player")]
    BoardTooSmall { size: usize, letters: usize },
    #[error("target round count must be at least 1")]
    ZeroRounds,
}

/// Invalid textual board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("board has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("invalid cell '{ch}' at row {row}, column {col}")]
    InvalidCell { ch: char, row: usize, col: usize },
    #[error("board must contain exactly one player marker, found {0}")]
    PlayerCount(usize),
}

/// Top-level error for the binary: everything that aborts before or outside a round.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
