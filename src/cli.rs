use crate::board::{Direction, Position};
use crate::config::GameConfig;
use crate::game_state::{GameAction, GameInterface, Phase, RoundEvent, RoundSnapshot};
use clap::{Parser, ValueEnum};
use std::io::BufRead;
use std::path::PathBuf;

/// Board presets matching the two historical shells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// 8x8, start at the bottom edge, no relocations
    Compact,
    /// 10x10, start in the centre, 3 relocations per round
    Classic,
}

/// Push letter tiles into words that match each chamber's rule
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dictionary file: a JSON object keyed by word, or one word per line
    #[arg(short = 'd', long = "dictionary")]
    pub dictionary_path: Option<PathBuf>,

    /// Puzzle catalog JSON file
    #[arg(short = 'p', long = "puzzles")]
    pub puzzles_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Layout::Classic)]
    pub layout: Layout,

    /// Board side length (overrides the layout)
    #[arg(long)]
    pub size: Option<usize>,

    /// Letter tiles per board
    #[arg(long)]
    pub letters: Option<usize>,

    /// Chambers to clear to win
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Relocations available per chamber
    #[arg(long)]
    pub relocations: Option<u32>,

    /// Seed for reproducible boards and puzzle order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the line-oriented text interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Write log records to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        let mut config = match self.layout {
            Layout::Compact => GameConfig::compact(),
            Layout::Classic => GameConfig::classic(),
        };
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(letters) = self.letters {
            config.letter_count = letters;
        }
        if let Some(rounds) = self.rounds {
            config.target_rounds = rounds;
        }
        if let Some(relocations) = self.relocations {
            config.relocations_per_round = relocations;
        }
        config
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Line-oriented shell

#[derive(Debug, PartialEq, Eq)]
pub enum CommandInput {
    Action(GameAction),
    Invalid,
    /// End of input.
    Closed,
}

fn parse_relocation(args: &str) -> Option<Position> {
    let mut parts = args.split_whitespace().map(str::parse::<usize>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(row)), Some(Ok(col)), None) => Some(Position::new(row, col)),
        _ => None,
    }
}

/// Parse one line of player input. Commands are case-insensitive.
#[must_use]
pub fn parse_command(line: &str) -> Option<GameAction> {
    let line = line.trim().to_lowercase();
    let action = match line.as_str() {
        "w" | "up" => GameAction::Move(Direction::Up),
        "s" | "down" => GameAction::Move(Direction::Down),
        "a" | "left" => GameAction::Move(Direction::Left),
        "d" | "right" => GameAction::Move(Direction::Right),
        "" | "c" | "continue" => GameAction::Continue,
        "q" | "quit" | "exit" => GameAction::Quit,
        other => {
            let args = other
                .strip_prefix("t ")
                .or_else(|| other.strip_prefix("relocate "))?;
            GameAction::Relocate(parse_relocation(args)?)
        }
    };
    Some(action)
}

pub fn read_command<R: BufRead>(reader: &mut R, phase: Phase) -> CommandInput {
    match phase {
        Phase::Cleared => println!("\nPress ENTER to continue:"),
        _ => println!("\nMove (w/a/s/d), relocate (t ROW COL), or quit (q):"),
    }
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => return CommandInput::Closed,
        Ok(_) => {}
    }

    match parse_command(&input) {
        Some(action) => CommandInput::Action(action),
        None => {
            println!("Unknown command '{}'.", input.trim());
            CommandInput::Invalid
        }
    }
}

#[must_use]
pub fn format_board(snapshot: &RoundSnapshot) -> String {
    let size = snapshot.board.size();
    let mut out = String::from("   ");
    for col in 0..size {
        out.push_str(&format!("{:>2}", col % 10));
    }
    for (row, cells) in snapshot.board.to_char_grid().iter().enumerate() {
        out.push_str(&format!("\n{:>2} ", row));
        for ch in cells {
            out.push(' ');
            out.push(*ch);
        }
    }
    out
}

pub fn display_snapshot(snapshot: &RoundSnapshot) {
    println!("\n{}", snapshot.description);
    println!("{}", format_board(snapshot));
    println!(
        "Chambers cleared: {}/{} | Relocations left: {}",
        snapshot.rounds_cleared, snapshot.target_rounds, snapshot.relocations_remaining
    );
}

#[must_use]
pub fn describe_event(event: &RoundEvent) -> Option<String> {
    match event {
        RoundEvent::Moved(_) => None,
        RoundEvent::Blocked => Some("Something blocks the way.".to_string()),
        RoundEvent::Cleared(report) => {
            let words: Vec<String> = report.words().map(str::to_uppercase).collect();
            Some(format!("Cleared {}!", words.join(" and ")))
        }
        RoundEvent::Relocated(pos) => Some(format!("Relocated to {pos}.")),
        RoundEvent::RelocationRefused => Some("Cannot relocate there.".to_string()),
        RoundEvent::RoundStarted { round } => Some(format!("Chamber {round} begins.")),
        RoundEvent::Won | RoundEvent::Quit => None,
        RoundEvent::Ignored => Some("Nothing happens.".to_string()),
    }
}

pub fn display_exit_message(snapshot: &RoundSnapshot) {
    match snapshot.phase {
        Phase::Won => println!("{}", snapshot.description),
        _ => println!(
            "Exiting after clearing {} of {} chambers.",
            snapshot.rounds_cleared, snapshot.target_rounds
        ),
    }
}

/// Line-oriented implementation of the `GameInterface` trait over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
    phase: Phase,
    closed: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            phase: Phase::Playing,
            closed: false,
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn render(&mut self, snapshot: &RoundSnapshot) {
        self.phase = snapshot.phase;
        display_snapshot(snapshot);
    }

    fn read_action(&mut self) -> Option<GameAction> {
        match read_command(&mut self.reader, self.phase) {
            CommandInput::Action(action) => Some(action),
            CommandInput::Invalid => None,
            CommandInput::Closed => {
                self.closed = true;
                Some(GameAction::Quit)
            }
        }
    }

    fn display_event(&mut self, event: &RoundEvent) {
        if let Some(message) = describe_event(event) {
            println!("{message}");
        }
    }

    fn display_exit_message(&mut self, snapshot: &RoundSnapshot) {
        display_exit_message(snapshot);
    }

    fn input_closed(&self) -> bool {
        self.closed
    }
}
