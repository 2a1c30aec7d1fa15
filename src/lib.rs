// Library interface for word-chamber
// This allows integration tests to access internal modules

pub mod board;
pub mod cli;
pub mod condition;
pub mod config;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod puzzles;
pub mod scanner;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use board::{Board, Cell, Direction, Position};
pub use condition::{Condition, satisfies};
pub use config::GameConfig;
pub use error::{BoardParseError, ConfigError, GameError, LoadError};
pub use game_state::{Game, GameAction, GameInterface, Phase, RoundEvent, RoundSnapshot, game_loop};
pub use puzzles::{PuzzleCatalog, PuzzleDefinition, load_catalog_from_file, load_catalog_from_str};
pub use scanner::{ClearReport, Orientation, WordMatch, scan_and_clear};
pub use wordbank::{Dictionary, load_dictionary_from_file, load_dictionary_from_str};
