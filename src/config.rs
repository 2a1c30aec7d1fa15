use crate::board::{Position, VOWEL_COUNT};
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

pub const DEFAULT_LETTER_COUNT: usize = 16;
pub const DEFAULT_TARGET_ROUNDS: u32 = 16;

pub const DICTIONARY_FILE: &str = "words_dictionary.json";
pub const PUZZLES_FILE: &str = "word_puzzles.json";
const DATA_DIR_NAME: &str = "word-chamber";

/// Per-user data directory searched for resource files, e.g. `~/.local/share/word-chamber`.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(DATA_DIR_NAME))
}

/// Pick the file to load: the explicit path if given, else `file_name` in the working
/// directory, else in the data directory. Falls back to the working-directory path so a
/// missing file is reported where the user most likely expected it.
#[must_use]
pub fn resolve_data_path(explicit: Option<&Path>, file_name: &str) -> PathBuf {
    resolve_data_path_in(explicit, file_name, Path::new("."), data_dir().as_deref())
}

fn resolve_data_path_in(
    explicit: Option<&Path>,
    file_name: &str,
    working_dir: &Path,
    data_dir: Option<&Path>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = working_dir.join(file_name);
    if local.is_file() {
        return local;
    }
    if let Some(dir) = data_dir
        && dir.join(file_name).is_file()
    {
        return dir.join(file_name);
    }
    local
}

/// Where the player token starts on a freshly generated board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartPosition {
    /// Last row, middle column.
    BottomCenter,
    Center,
}

impl StartPosition {
    #[must_use]
    pub fn resolve(self, size: usize) -> Position {
        match self {
            Self::BottomCenter => Position::new(size - 1, size / 2),
            Self::Center => Position::new(size / 2, size / 2),
        }
    }
}

/// Session configuration shared by every round.
///
/// The letter count is a fixed puzzle density and does not scale with the board size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub letter_count: usize,
    pub target_rounds: u32,
    pub relocations_per_round: u32,
    pub start: StartPosition,
}

impl GameConfig {
    /// 8x8 board, player starting at the bottom edge, no relocations.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            board_size: 8,
            letter_count: DEFAULT_LETTER_COUNT,
            target_rounds: DEFAULT_TARGET_ROUNDS,
            relocations_per_round: 0,
            start: StartPosition::BottomCenter,
        }
    }

    /// 10x10 board, player starting in the middle, three relocations per round.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            board_size: 10,
            letter_count: DEFAULT_LETTER_COUNT,
            target_rounds: DEFAULT_TARGET_ROUNDS,
            relocations_per_round: 3,
            start: StartPosition::Center,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::ZeroBoardSize);
        }
        if self.letter_count < VOWEL_COUNT {
            return Err(ConfigError::TooFewLetters {
                letters: self.letter_count,
                vowels: VOWEL_COUNT,
            });
        }
        let capacity = self.board_size.saturating_mul(self.board_size);
        if self.letter_count >= capacity {
            return Err(ConfigError::BoardTooSmall {
                size: self.board_size,
                letters: self.letter_count,
            });
        }
        if self.target_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        Ok(())
    }

    #[must_use]
    pub fn start_position(&self) -> Position {
        self.start.resolve(self.board_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}
