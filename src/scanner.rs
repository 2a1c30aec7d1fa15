//! Word detection and clearing.
//!
//! Every contiguous span of every row and column is read as a candidate: the letters in
//! the span, in order, with empty cells and the player skipped. Spans are visited line by
//! line, then by start, then by end. At line `i` the horizontal span lies in row `i` and
//! the vertical span in column `i`, both covering `[start, end)`. The first span whose
//! horizontal or vertical candidate is a dictionary word meeting the condition is
//! cleared and the scan stops, so at most one clear happens per call.

use crate::board::{Board, Position};
use crate::condition::Condition;
use crate::wordbank::Dictionary;
use std::fmt;
use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordMatch {
    pub word: String,
    pub orientation: Orientation,
    /// Row index for horizontal matches, column index for vertical ones.
    pub line: usize,
    pub span: Range<usize>,
}

impl WordMatch {
    /// Board cells covered by the span, in order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.span.clone().map(|i| match self.orientation {
            Orientation::Horizontal => Position::new(self.line, i),
            Orientation::Vertical => Position::new(i, self.line),
        })
    }
}

/// The outcome of one successful scan: one match, or two when the horizontal and
/// vertical candidates of the same span both qualify.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearReport {
    pub matches: Vec<WordMatch>,
}

impl ClearReport {
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|m| m.word.as_str())
    }
}

fn push_letter(candidate: &mut String, board: &Board, pos: Position) {
    if let Some(letter) = board.get(pos).letter() {
        candidate.push(letter.to_ascii_lowercase());
    }
}

/// Find the first qualifying span without touching the board.
#[must_use]
pub fn find_clear(
    board: &Board,
    dictionary: &Dictionary,
    condition: &Condition,
) -> Option<ClearReport> {
    let qualifies = |word: &str| {
        !word.is_empty() && dictionary.contains(word) && condition.is_satisfied_by(word)
    };
    let size = board.size();

    for line in 0..size {
        for start in 0..size {
            let mut horizontal = String::new();
            let mut vertical = String::new();
            for end in start + 1..=size {
                push_letter(&mut horizontal, board, Position::new(line, end - 1));
                push_letter(&mut vertical, board, Position::new(end - 1, line));

                let mut matches = Vec::new();
                if qualifies(&horizontal) {
                    matches.push(WordMatch {
                        word: horizontal.clone(),
                        orientation: Orientation::Horizontal,
                        line,
                        span: start..end,
                    });
                }
                if qualifies(&vertical) {
                    matches.push(WordMatch {
                        word: vertical.clone(),
                        orientation: Orientation::Vertical,
                        line,
                        span: start..end,
                    });
                }
                if !matches.is_empty() {
                    return Some(ClearReport { matches });
                }
            }
        }
    }
    None
}

/// Empty every letter cell covered by the report. The player is never cleared.
pub fn apply_clear(board: &mut Board, report: &ClearReport) {
    for word in &report.matches {
        for pos in word.cells() {
            board.clear_letter(pos);
        }
    }
}

/// Scan for the first qualifying span and clear it. `Some` iff a clear happened.
pub fn scan_and_clear(
    board: &mut Board,
    dictionary: &Dictionary,
    condition: &Condition,
) -> Option<ClearReport> {
    let report = find_clear(board, dictionary, condition)?;
    apply_clear(board, &report);
    Some(report)
}
