//! Full-screen terminal shell built on Ratatui.
//!
//! # Layout
//! Title, the chamber grid, an information panel with the current rule and counters,
//! a status line and a key reminder. The grid is clickable: a left click on a cell
//! requests a relocation there.

use crate::board::{Cell, Direction, Position};
use crate::cli::describe_event;
use crate::game_state::{GameAction, GameInterface, Phase, RoundEvent, RoundSnapshot};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const CELL_WIDTH: u16 = 3;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const PLAYER_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);
const LETTER_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
const EMPTY_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Map a key press to a game action. Movement keys are case-insensitive.
#[must_use]
pub fn key_action(key: KeyEvent) -> Option<GameAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(event::KeyModifiers::ALT)
        || key.modifiers.contains(event::KeyModifiers::CONTROL)
    {
        return None;
    }
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameAction::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameAction::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameAction::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameAction::Move(Direction::Right),
        KeyCode::Enter => GameAction::Continue,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Grid cell under a terminal coordinate, given the inner area the grid was drawn in.
#[must_use]
pub fn cell_at(grid: Rect, size: usize, column: u16, row: u16) -> Option<Position> {
    if column < grid.x || row < grid.y {
        return None;
    }
    let col = usize::from((column - grid.x) / CELL_WIDTH);
    let row = usize::from(row - grid.y);
    (row < size && col < size).then(|| Position::new(row, col))
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    snapshot: Option<RoundSnapshot>,
    message: String,
    /// Inner area of the grid block from the last draw, for mouse hit-testing.
    grid_area: Rect,
    closed: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, mouse capture, cursor hidden");

        Ok(Self {
            terminal,
            snapshot: None,
            message: String::new(),
            grid_area: Rect::default(),
            closed: false,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return Ok(());
        };
        let message = self.message.as_str();
        let mut grid_area = self.grid_area;
        self.terminal.draw(|f| {
            grid_area = Self::render_static(f, snapshot, message);
        })?;
        self.grid_area = grid_area;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI and return the grid's inner area.
    #[allow(clippy::cast_possible_truncation)]
    fn render_static(f: &mut Frame, snapshot: &RoundSnapshot, message: &str) -> Rect {
        let size = snapshot.board.size() as u16;
        let chunks = Layout::vertical([
            Constraint::Length(3),        // Title
            Constraint::Length(size + 2), // Grid
            Constraint::Min(6),           // Info panel
            Constraint::Length(3),        // Status line
            Constraint::Length(3),        // Instructions
        ])
        .split(f.area());

        Self::render_title(f, chunks[0]);
        let grid = Self::render_grid(f, chunks[1], snapshot);
        Self::render_info(f, chunks[2], snapshot, message);
        Self::render_status(f, chunks[3], snapshot);
        Self::render_instructions(f, chunks[4], snapshot.phase);
        grid
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORD CHAMBER")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_grid(f: &mut Frame, area: Rect, snapshot: &RoundSnapshot) -> Rect {
        let width = (snapshot.board.size() as u16 * CELL_WIDTH + 2).min(area.width);
        let area = Rect { width, ..area };
        let block = Block::default().title("Chamber").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let lines: Vec<Line> = snapshot
            .board
            .rows()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| {
                        let style = match cell {
                            Cell::Player => PLAYER_STYLE,
                            Cell::Letter(_) => LETTER_STYLE,
                            Cell::Empty => EMPTY_STYLE,
                        };
                        Span::styled(format!(" {} ", cell.to_char()), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inner);
        inner
    }

    fn render_info(f: &mut Frame, area: Rect, snapshot: &RoundSnapshot, message: &str) {
        let rule_style = match snapshot.phase {
            Phase::Cleared | Phase::Won => SUCCESS_STYLE,
            Phase::Playing | Phase::Ended => INFO_STYLE,
        };
        let mut lines = vec![
            Line::from(vec![Span::styled(snapshot.description.as_str(), rule_style)]),
            Line::from(""),
            Line::from(format!(
                "Chambers cleared: {}/{}",
                snapshot.rounds_cleared, snapshot.target_rounds
            )),
            Line::from(format!(
                "Relocations left: {}",
                snapshot.relocations_remaining
            )),
        ];
        if !message.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, snapshot: &RoundSnapshot) {
        let status = match snapshot.phase {
            Phase::Playing => format!("Chamber {} in progress", snapshot.rounds_cleared + 1),
            Phase::Cleared => "Chamber clear".to_string(),
            Phase::Won => "All chambers cleared".to_string(),
            Phase::Ended => "Exiting".to_string(),
        };
        let paragraph = Paragraph::new(status)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, phase: Phase) {
        let text = match phase {
            Phase::Playing => "WASD/Arrows: Move | Click: Relocate | ESC/Q: Quit",
            Phase::Cleared => "ENTER: Next chamber",
            Phase::Won | Phase::Ended => "Goodbye",
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<GameAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let event = event::read()?;
        match event {
            Event::Key(key) => {
                let action = key_action(key);
                debug_log!("handle_input() - Key {:?} -> {:?}", key.code, action);
                Ok(action)
            }
            Event::Mouse(mouse) => Ok(self.handle_mouse(mouse)),
            Event::Resize(_, _) => {
                self.draw_or_log();
                Ok(None)
            }
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => Ok(None),
        }
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> Option<GameAction> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let size = self.snapshot.as_ref()?.board.size();
        let target = cell_at(self.grid_area, size, mouse.column, mouse.row)?;
        debug_log!("handle_mouse() - Click on cell {}", target);
        Some(GameAction::Relocate(target))
    }
}

impl GameInterface for TuiInterface {
    fn render(&mut self, snapshot: &RoundSnapshot) {
        self.snapshot = Some(snapshot.clone());
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<GameAction> {
        match self.handle_input() {
            Ok(action) => {
                if action.is_some() {
                    self.message.clear();
                }
                action
            }
            Err(e) => {
                info_log!("read_action() - Input error: {}, closing", e);
                self.closed = true;
                Some(GameAction::Quit)
            }
        }
    }

    fn display_event(&mut self, event: &RoundEvent) {
        if let Some(message) = describe_event(event) {
            self.message = message;
            self.draw_or_log();
        }
    }

    fn display_exit_message(&mut self, snapshot: &RoundSnapshot) {
        self.message = match snapshot.phase {
            Phase::Won => "Press any key to exit.".to_string(),
            _ => "Exiting...".to_string(),
        };
        self.snapshot = Some(snapshot.clone());
        self.draw_or_log();
        if snapshot.phase == Phase::Won {
            // Leave the win screen up until a key arrives
            while let Ok(event) = event::read() {
                if matches!(event, Event::Key(key) if key.kind == KeyEventKind::Press) {
                    break;
                }
            }
        }
    }

    fn input_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            key_action(press(KeyCode::Char('w'))),
            Some(GameAction::Move(Direction::Up))
        );
        assert_eq!(
            key_action(press(KeyCode::Char('A'))),
            Some(GameAction::Move(Direction::Left))
        );
        assert_eq!(
            key_action(press(KeyCode::Down)),
            Some(GameAction::Move(Direction::Down))
        );
        assert_eq!(
            key_action(press(KeyCode::Right)),
            Some(GameAction::Move(Direction::Right))
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(key_action(press(KeyCode::Enter)), Some(GameAction::Continue));
        assert_eq!(key_action(press(KeyCode::Esc)), Some(GameAction::Quit));
        assert_eq!(key_action(press(KeyCode::Char('q'))), Some(GameAction::Quit));
        assert_eq!(key_action(press(KeyCode::Char('x'))), None);
        assert_eq!(key_action(press(KeyCode::Backspace)), None);
    }

    #[test]
    fn test_modified_and_released_keys_ignored() {
        let ctrl_w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(key_action(ctrl_w), None);

        let mut release = press(KeyCode::Char('w'));
        release.kind = KeyEventKind::Release;
        assert_eq!(key_action(release), None);
    }

    #[test]
    fn test_cell_at_maps_clicks_to_cells() {
        let grid = Rect::new(1, 4, 30, 10);
        assert_eq!(cell_at(grid, 10, 1, 4), Some(Position::new(0, 0)));
        assert_eq!(cell_at(grid, 10, 3, 4), Some(Position::new(0, 0)));
        assert_eq!(cell_at(grid, 10, 4, 4), Some(Position::new(0, 1)));
        assert_eq!(cell_at(grid, 10, 30, 13), Some(Position::new(9, 9)));
    }

    #[test]
    fn test_cell_at_rejects_outside_grid() {
        let grid = Rect::new(1, 4, 30, 10);
        assert_eq!(cell_at(grid, 10, 0, 4), None);
        assert_eq!(cell_at(grid, 10, 1, 3), None);
        assert_eq!(cell_at(grid, 10, 31, 4), None);
        assert_eq!(cell_at(grid, 10, 1, 14), None);
    }
}
