use crate::board::{self, Board, Direction, Position};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::puzzles::{PuzzleCatalog, PuzzleDefinition};
use crate::scanner::{self, ClearReport};
use crate::wordbank::Dictionary;
use crate::{debug_log, info_log};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const CLEARED_MESSAGE: &str = "CHAMBER CLEAR, PRESS ENTER TO CONTINUE";
pub const WIN_MESSAGE: &str = "CONGRATULATIONS, YOU WIN!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// A word was cleared; waiting for the player to continue.
    Cleared,
    Won,
    /// The player quit.
    Ended,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Ended)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameAction {
    Move(Direction),
    Relocate(Position),
    Continue,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundEvent {
    Moved(Position),
    Blocked,
    Cleared(ClearReport),
    Relocated(Position),
    RelocationRefused,
    RoundStarted { round: u32 },
    Won,
    Quit,
    /// The action has no meaning in the current phase.
    Ignored,
}

/// Read-only copy of the round state handed to renderers after every event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub board: Board,
    pub player: Position,
    pub description: String,
    pub phase: Phase,
    pub rounds_cleared: u32,
    pub target_rounds: u32,
    pub relocations_remaining: u32,
}

/// The round controller: owns the only mutable game state and sequences rounds.
pub struct Game {
    config: GameConfig,
    dictionary: Dictionary,
    catalog: PuzzleCatalog,
    rng: StdRng,
    board: Board,
    puzzle_key: String,
    puzzle: PuzzleDefinition,
    description: String,
    phase: Phase,
    rounds_cleared: u32,
    relocations_remaining: u32,
}

impl Game {
    /// Start a session with the first round already set up.
    pub fn new(
        config: GameConfig,
        dictionary: Dictionary,
        catalog: PuzzleCatalog,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        let board = board::generate(&config, &mut rng)?;
        let (key, puzzle) = catalog.choose(&mut rng);
        let (puzzle_key, puzzle) = (key.to_string(), puzzle.clone());
        info_log!(
            "Round 1: puzzle '{}' ({})",
            puzzle_key,
            puzzle.condition
        );

        Ok(Self {
            relocations_remaining: config.relocations_per_round,
            description: puzzle.description.clone(),
            config,
            dictionary,
            catalog,
            rng,
            board,
            puzzle_key,
            puzzle,
            phase: Phase::Playing,
            rounds_cleared: 0,
        })
    }

    /// Like [`Game::new`], seeding the RNG from `seed` or from OS entropy.
    pub fn with_seed(
        config: GameConfig,
        dictionary: Dictionary,
        catalog: PuzzleCatalog,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, dictionary, catalog, rng)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn puzzle(&self) -> &PuzzleDefinition {
        &self.puzzle
    }

    #[must_use]
    pub fn puzzle_key(&self) -> &str {
        &self.puzzle_key
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn rounds_cleared(&self) -> u32 {
        self.rounds_cleared
    }

    #[must_use]
    pub fn relocations_remaining(&self) -> u32 {
        self.relocations_remaining
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            board: self.board.clone(),
            player: self.board.player(),
            description: self.description.clone(),
            phase: self.phase,
            rounds_cleared: self.rounds_cleared,
            target_rounds: self.config.target_rounds,
            relocations_remaining: self.relocations_remaining,
        }
    }

    /// Process one input to completion. Inputs that mean nothing in the current phase
    /// are ignored.
    pub fn apply(&mut self, action: GameAction) -> RoundEvent {
        match (self.phase, action) {
            (Phase::Playing, GameAction::Move(direction)) => self.handle_move(direction),
            (Phase::Playing, GameAction::Relocate(target)) => self.handle_relocate(target),
            (Phase::Playing, GameAction::Quit) => {
                info_log!(
                    "Player quit after clearing {} rounds",
                    self.rounds_cleared
                );
                self.phase = Phase::Ended;
                RoundEvent::Quit
            }
            (Phase::Cleared, GameAction::Continue) => self.advance_round(),
            _ => {
                debug_log!("Ignoring {:?} in phase {:?}", action, self.phase);
                RoundEvent::Ignored
            }
        }
    }

    fn handle_move(&mut self, direction: Direction) -> RoundEvent {
        let before = self.board.player();
        let after = self.board.move_player(direction);
        debug_log!("Move {:?}: {} -> {}", direction, before, after);

        // Scan even after a blocked move: a relocation may have formed a word
        if let Some(report) =
            scanner::scan_and_clear(&mut self.board, &self.dictionary, &self.puzzle.condition)
        {
            for word in &report.matches {
                info_log!(
                    "Cleared '{}' ({} line {}, cells {:?})",
                    word.word,
                    word.orientation,
                    word.line,
                    word.span
                );
            }
            self.description = CLEARED_MESSAGE.to_string();
            self.phase = Phase::Cleared;
            return RoundEvent::Cleared(report);
        }

        if after == before {
            RoundEvent::Blocked
        } else {
            RoundEvent::Moved(after)
        }
    }

    fn handle_relocate(&mut self, target: Position) -> RoundEvent {
        if self.relocations_remaining == 0 || !self.board.relocate_player(target) {
            debug_log!(
                "Relocation to {} refused ({} remaining)",
                target,
                self.relocations_remaining
            );
            return RoundEvent::RelocationRefused;
        }
        self.relocations_remaining -= 1;
        info_log!(
            "Relocated to {} ({} remaining)",
            target,
            self.relocations_remaining
        );
        RoundEvent::Relocated(target)
    }

    fn advance_round(&mut self) -> RoundEvent {
        self.rounds_cleared += 1;
        if self.rounds_cleared >= self.config.target_rounds {
            info_log!("All {} rounds cleared", self.rounds_cleared);
            self.description = WIN_MESSAGE.to_string();
            self.phase = Phase::Won;
            return RoundEvent::Won;
        }

        self.board = board::generate_validated(&self.config, &mut self.rng);
        let (key, puzzle) = self.catalog.choose(&mut self.rng);
        self.puzzle_key = key.to_string();
        self.puzzle = puzzle.clone();
        self.description = self.puzzle.description.clone();
        self.relocations_remaining = self.config.relocations_per_round;
        self.phase = Phase::Playing;

        let round = self.rounds_cleared + 1;
        info_log!(
            "Round {}: puzzle '{}' ({})",
            round,
            self.puzzle_key,
            self.puzzle.condition
        );
        RoundEvent::RoundStarted { round }
    }
}

/// Presentation seam: a shell draws snapshots, reports events and turns raw input into
/// actions. Returning `None` from `read_action` means "nothing actionable yet".
pub trait GameInterface {
    fn render(&mut self, snapshot: &RoundSnapshot);
    fn read_action(&mut self) -> Option<GameAction>;
    fn display_event(&mut self, event: &RoundEvent);
    fn display_exit_message(&mut self, snapshot: &RoundSnapshot);

    /// True once the input source is exhausted and no further action can arrive.
    fn input_closed(&self) -> bool {
        false
    }
}

/// Drive a session until it is won, the player quits, or input runs out.
pub fn game_loop<I: GameInterface>(game: &mut Game, interface: &mut I) {
    interface.render(&game.snapshot());

    while !game.phase().is_terminal() && !interface.input_closed() {
        let Some(action) = interface.read_action() else {
            continue;
        };
        let event = game.apply(action);
        interface.render(&game.snapshot());
        interface.display_event(&event);
    }

    interface.display_exit_message(&game.snapshot());
}
