//! Board model, board generation and the push-based movement rules.
//!
//! A board is a square grid where every cell is empty, holds the player token, or holds
//! one uppercase letter tile. Exactly one cell holds the player at all times; the board
//! caches that position so callers never have to search for it.

use crate::config::GameConfig;
use crate::error::{BoardParseError, ConfigError};
use crate::debug_log;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];
pub const VOWEL_COUNT: usize = VOWELS.len();
pub const CONSONANTS: [char; 21] = [
    'B', 'C', 'D', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W',
    'X', 'Y', 'Z',
];

const EMPTY_CHAR: char = '.';
const PLAYER_CHAR: char = '@';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Player,
    Letter(char),
}

impl Cell {
    #[must_use]
    pub fn letter(self) -> Option<char> {
        match self {
            Self::Letter(c) => Some(c),
            Self::Empty | Self::Player => None,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Empty => EMPTY_CHAR,
            Self::Player => PLAYER_CHAR,
            Self::Letter(c) => c,
        }
    }
}

/// A (row, column) pair. Always interpreted against a board of a known size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// One step in `direction`, or `None` when that leaves a board of side `size`.
    #[must_use]
    pub fn step(self, direction: Direction, size: usize) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < size && col < size).then_some(Self { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// (row delta, column delta); exactly one component is non-zero.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    player: Position,
}

impl Board {
    /// Empty board with only the player token placed.
    ///
    /// # Panics
    /// Panics if `player` is outside a board of side `size`.
    #[must_use]
    pub fn with_player(size: usize, player: Position) -> Self {
        assert!(
            player.row < size && player.col < size,
            "player {player} outside a {size}x{size} board"
        );
        let mut board = Self {
            size,
            cells: vec![Cell::Empty; size * size],
            player,
        };
        board.set(player, Cell::Player);
        board
    }

    /// Parse the textual board format: `.` empty, `@` player, letters are tiles.
    ///
    /// Whitespace inside a row and blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, BoardParseError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        let size = rows.len();
        if size == 0 {
            return Err(BoardParseError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        let mut players = Vec::new();
        for (row, chars) in rows.iter().enumerate() {
            if chars.len() != size {
                return Err(BoardParseError::NotSquare {
                    row,
                    found: chars.len(),
                    expected: size,
                });
            }
            for (col, &ch) in chars.iter().enumerate() {
                let cell = match ch {
                    EMPTY_CHAR => Cell::Empty,
                    PLAYER_CHAR => {
                        players.push(Position::new(row, col));
                        Cell::Player
                    }
                    c if c.is_ascii_alphabetic() => Cell::Letter(c.to_ascii_uppercase()),
                    ch => return Err(BoardParseError::InvalidCell { ch, row, col }),
                };
                cells.push(cell);
            }
        }

        match players.as_slice() {
            [player] => Ok(Self {
                size,
                cells,
                player: *player,
            }),
            other => Err(BoardParseError::PlayerCount(other.len())),
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn player(&self) -> Position {
        self.player
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// # Panics
    /// Panics if `pos` is out of bounds.
    #[must_use]
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.index(pos)]
    }

    fn set(&mut self, pos: Position, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    fn index(&self, pos: Position) -> usize {
        debug_assert!(self.in_bounds(pos), "{pos} out of bounds");
        pos.row * self.size + pos.col
    }

    /// Remove the letter tile at `pos`, returning it. Empty cells and the player are
    /// left untouched.
    pub fn clear_letter(&mut self, pos: Position) -> Option<char> {
        let letter = self.get(pos).letter()?;
        self.set(pos, Cell::Empty);
        Some(letter)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Letter tiles in row-major order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.iter().filter_map(|cell| cell.letter())
    }

    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.letters().count()
    }

    /// Renderer-facing view: one character per cell.
    #[must_use]
    pub fn to_char_grid(&self) -> Vec<Vec<char>> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.to_char()).collect())
            .collect()
    }

    /// Move the player one step, pushing a letter tile ahead of it when the cell beyond
    /// the tile is empty. Returns the player position after the move, which is unchanged
    /// when the move is blocked.
    pub fn move_player(&mut self, direction: Direction) -> Position {
        let source = self.player;
        let Some(target) = source.step(direction, self.size) else {
            return source;
        };

        match self.get(target) {
            Cell::Empty => {
                self.set(source, Cell::Empty);
                self.set(target, Cell::Player);
                self.player = target;
            }
            Cell::Letter(letter) => {
                let Some(landing) = target.step(direction, self.size) else {
                    return source;
                };
                if !self.get(landing).is_empty() {
                    return source;
                }
                self.set(landing, Cell::Letter(letter));
                self.set(target, Cell::Player);
                self.set(source, Cell::Empty);
                self.player = target;
                debug_log!("pushed '{}' from {} to {}", letter, target, landing);
            }
            Cell::Player => return source,
        }
        self.player
    }

    /// Teleport the player to `target`, swapping whatever was there (empty or a letter)
    /// into the player's old cell. Refused when `target` is out of bounds or is the
    /// player's own cell.
    pub fn relocate_player(&mut self, target: Position) -> bool {
        if !self.in_bounds(target) || target == self.player {
            return false;
        }
        let displaced = self.get(target);
        self.set(self.player, displaced);
        self.set(target, Cell::Player);
        self.player = target;
        true
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

/// Build the letter pool for one board: every vowel once, then consonants drawn with
/// repetition, then the Q/U fix-up, then a shuffle.
pub fn build_letter_pool<R: Rng + ?Sized>(letter_count: usize, rng: &mut R) -> Vec<char> {
    let mut pool: Vec<char> = VOWELS
        .choose_multiple(rng, VOWEL_COUNT.min(letter_count))
        .copied()
        .collect();
    while pool.len() < letter_count {
        pool.push(CONSONANTS[rng.gen_range(0..CONSONANTS.len())]);
    }
    ensure_u_with_q(&mut pool, rng);
    pool.shuffle(rng);
    pool
}

/// If the pool has a 'Q' but no 'U', overwrite one consonant slot with 'U'.
///
/// Expects the guaranteed vowels in the first `VOWEL_COUNT` slots, which are never
/// overwritten.
pub fn ensure_u_with_q<R: Rng + ?Sized>(pool: &mut [char], rng: &mut R) {
    if pool.contains(&'Q') && !pool.contains(&'U') && pool.len() > VOWEL_COUNT {
        let slot = rng.gen_range(VOWEL_COUNT..pool.len());
        pool[slot] = 'U';
    }
}

/// Generate a fresh board for one round.
///
/// The player starts at the configured cell; every pool letter is dropped onto a
/// uniformly random empty cell.
pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Board, ConfigError> {
    config.validate()?;
    Ok(generate_validated(config, rng))
}

/// [`generate`] for a configuration that has already passed validation.
pub(crate) fn generate_validated<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Board {
    let size = config.board_size;
    let mut board = Board::with_player(size, config.start_position());

    for letter in build_letter_pool(config.letter_count, rng) {
        loop {
            let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if board.get(pos).is_empty() {
                board.set(pos, Cell::Letter(letter));
                break;
            }
        }
    }

    debug_log!("generated board:\n{}", board);
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board(text: &str) -> Board {
        Board::parse(text).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let b = board(
            "
            C A T .
            . . . .
            . @ . .
            . . . q
            ",
        );
        assert_eq!(b.size(), 4);
        assert_eq!(b.player(), Position::new(2, 1));
        assert_eq!(b.get(Position::new(0, 0)), Cell::Letter('C'));
        assert_eq!(b.get(Position::new(3, 3)), Cell::Letter('Q'));
        assert_eq!(b.to_string(), "CAT.\n....\n.@..\n...Q");
        assert_eq!(b.letter_count(), 4);
    }

    #[test]
    fn test_parse_rejects_bad_boards() {
        assert_eq!(Board::parse(""), Err(BoardParseError::Empty));
        assert_eq!(
            Board::parse("..\n..."),
            Err(BoardParseError::NotSquare {
                row: 1,
                found: 3,
                expected: 2
            })
        );
        assert_eq!(Board::parse("..\n.."), Err(BoardParseError::PlayerCount(0)));
        assert_eq!(Board::parse("@@\n.."), Err(BoardParseError::PlayerCount(2)));
        assert_eq!(
            Board::parse("@3\n.."),
            Err(BoardParseError::InvalidCell {
                ch: '3',
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn test_letter_p_is_not_the_player() {
        let mut b = board("P@.\n...\n...");
        assert_eq!(b.get(Position::new(0, 0)), Cell::Letter('P'));
        // Pushing the 'P' tile left would send it off the board
        assert_eq!(b.move_player(Direction::Left), Position::new(0, 1));
        assert_eq!(b.move_player(Direction::Right), Position::new(0, 2));
    }

    #[test]
    fn test_step_bounds() {
        let p = Position::new(0, 0);
        assert_eq!(p.step(Direction::Up, 4), None);
        assert_eq!(p.step(Direction::Left, 4), None);
        assert_eq!(p.step(Direction::Down, 4), Some(Position::new(1, 0)));
        assert_eq!(Position::new(3, 3).step(Direction::Right, 4), None);
    }

    #[test]
    fn test_move_into_empty_cell() {
        let mut b = board("...\n.@.\n...");
        assert_eq!(b.move_player(Direction::Up), Position::new(0, 1));
        assert_eq!(b.to_string(), ".@.\n...\n...");
    }

    #[test]
    fn test_move_off_board_is_noop() {
        let mut b = board(".@.\n...\n...");
        let before = b.clone();
        assert_eq!(b.move_player(Direction::Up), Position::new(0, 1));
        assert_eq!(b, before);
    }

    #[test]
    fn test_push_letter_into_empty_cell() {
        let mut b = board("....\n.@A.\n....\n....");
        assert_eq!(b.move_player(Direction::Right), Position::new(1, 2));
        assert_eq!(b.to_string(), "....\n..@A\n....\n....");
    }

    #[test]
    fn test_push_against_edge_is_noop() {
        let mut b = board("...\n.@A\n...");
        let before = b.clone();
        assert_eq!(b.move_player(Direction::Right), Position::new(1, 1));
        assert_eq!(b, before);
    }

    #[test]
    fn test_push_into_letter_is_noop() {
        let mut b = board("....\n@AB.\n....\n....");
        let before = b.clone();
        assert_eq!(b.move_player(Direction::Right), Position::new(1, 0));
        assert_eq!(b, before);
    }

    #[test]
    fn test_chained_pushes() {
        let mut b = board("@A...\n.....\n.....\n.....\n.....");
        b.move_player(Direction::Right);
        b.move_player(Direction::Right);
        b.move_player(Direction::Right);
        assert_eq!(b.to_string(), "...@A\n.....\n.....\n.....\n.....");
        // Now pinned against the edge
        assert_eq!(b.move_player(Direction::Right), Position::new(0, 3));
    }

    #[test]
    fn test_step_then_opposite_is_reversible() {
        for direction in Direction::ALL {
            let mut b = board("...\n.@.\n...");
            let before = b.clone();
            b.move_player(direction);
            assert_ne!(b, before);
            b.move_player(direction.opposite());
            assert_eq!(b, before);
        }
    }

    #[test]
    fn test_relocate_swaps_contents() {
        let mut b = board("A..\n.@.\n...");
        assert!(b.relocate_player(Position::new(0, 0)));
        assert_eq!(b.to_string(), "@..\n.A.\n...");
        assert_eq!(b.player(), Position::new(0, 0));

        assert!(b.relocate_player(Position::new(2, 2)));
        assert_eq!(b.to_string(), "...\n.A.\n..@");
    }

    #[test]
    fn test_relocate_refused() {
        let mut b = board("A..\n.@.\n...");
        let before = b.clone();
        assert!(!b.relocate_player(Position::new(1, 1)));
        assert!(!b.relocate_player(Position::new(3, 0)));
        assert_eq!(b, before);
    }

    #[test]
    fn test_clear_letter_skips_player() {
        let mut b = board("A@\n..");
        assert_eq!(b.clear_letter(Position::new(0, 0)), Some('A'));
        assert_eq!(b.clear_letter(Position::new(0, 1)), None);
        assert_eq!(b.clear_letter(Position::new(1, 1)), None);
        assert_eq!(b.to_string(), ".@\n..");
    }

    #[test]
    fn test_q_forces_u_outside_vowel_slots() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = vec!['A', 'E', 'I', 'O', 'X', 'Q', 'B', 'C'];
        ensure_u_with_q(&mut pool, &mut rng);
        assert!(pool.contains(&'U'));
        assert_eq!(&pool[..4], &['A', 'E', 'I', 'O']);
        assert_eq!(pool.iter().filter(|&&c| c == 'U').count(), 1);
    }

    #[test]
    fn test_q_with_u_left_alone() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = vec!['A', 'E', 'I', 'O', 'U', 'Q', 'B'];
        let before = pool.clone();
        ensure_u_with_q(&mut pool, &mut rng);
        assert_eq!(pool, before);
    }

    #[test]
    fn test_pool_composition() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = build_letter_pool(16, &mut rng);
        assert_eq!(pool.len(), 16);
        for vowel in VOWELS {
            assert!(pool.contains(&vowel), "missing {vowel}");
        }
        assert!(pool.iter().all(|c| VOWELS.contains(c) || CONSONANTS.contains(c)));
    }

    #[test]
    fn test_generate_rejects_invalid_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = GameConfig {
            board_size: 3,
            ..GameConfig::compact()
        };
        assert!(generate(&config, &mut rng).is_err());
    }

    proptest! {
        #[test]
        fn generated_boards_hold_invariants(seed in any::<u64>(), size in 5usize..=10) {
            let mut rng = StdRng::seed_from_u64(seed);
            let config = GameConfig { board_size: size, ..GameConfig::classic() };
            let b = generate(&config, &mut rng).unwrap();

            let players = b.rows().flatten().filter(|&&c| c == Cell::Player).count();
            prop_assert_eq!(players, 1);
            prop_assert_eq!(b.get(config.start_position()), Cell::Player);
            prop_assert_eq!(b.player(), config.start_position());
            prop_assert_eq!(b.letter_count(), 16);

            let letters: Vec<char> = b.letters().collect();
            let vowels = letters.iter().filter(|c| VOWELS.contains(*c)).count();
            let consonants = letters.iter().filter(|c| CONSONANTS.contains(*c)).count();
            prop_assert_eq!(vowels, VOWEL_COUNT);
            prop_assert_eq!(consonants, config.letter_count - VOWEL_COUNT);
            if letters.contains(&'Q') {
                prop_assert!(letters.contains(&'U'));
            }
        }

        #[test]
        fn blocked_push_leaves_board_unchanged(seed in any::<u64>(), dir in 0usize..4) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut b = generate(&GameConfig::compact(), &mut rng).unwrap();
            let direction = Direction::ALL[dir];
            let before = b.clone();
            let after = b.move_player(direction);
            if after == before.player() {
                prop_assert_eq!(&b, &before);
            } else {
                prop_assert_eq!(b.letter_count(), before.letter_count());
            }
        }
    }
}
