//! Main TUI application state and logic

use super::panes::{self, DiagnosticCounts};
use crate::parser::{Compilation, TokenKind};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Rows moved by PageUp/PageDown.
const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Listing,
    Tokens,
    Scopes,
}

impl FocusedPane {
    /// Move focus to the next pane (listing -> tokens -> scopes)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Listing => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Scopes,
            FocusedPane::Scopes => FocusedPane::Listing,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Listing => FocusedPane::Scopes,
            FocusedPane::Tokens => FocusedPane::Listing,
            FocusedPane::Scopes => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The finished front-end pass being viewed
    pub compilation: Compilation,

    /// Shown in the status bar
    pub file_name: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub listing_scroll: usize,
    pub tokens_scroll: usize,
    pub scopes_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(compilation: Compilation, file_name: impl Into<String>) -> Self {
        let status_message = if compilation.has_errors() {
            String::from("Compiled with errors")
        } else {
            String::from("Compiled cleanly")
        };
        App {
            compilation,
            file_name: file_name.into(),
            focused_pane: FocusedPane::Listing,
            listing_scroll: 0,
            tokens_scroll: 0,
            scopes_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn diagnostic_counts(&self) -> DiagnosticCounts {
        DiagnosticCounts {
            lexical: self.compilation.diagnostic_count(TokenKind::LexicalError),
            syntax: self.compilation.diagnostic_count(TokenKind::SyntaxError),
            semantic: self.compilation.diagnostic_count(TokenKind::SemanticError),
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Listing on the left, tokens over scopes on the right
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        panes::render_listing_pane(
            frame,
            columns[0],
            &self.compilation,
            self.focused_pane == FocusedPane::Listing,
            &mut self.listing_scroll,
        );
        panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.compilation.tokens,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );
        panes::render_scopes_pane(
            frame,
            right_rows[1],
            &self.compilation.scopes,
            self.focused_pane == FocusedPane::Scopes,
            &mut self.scopes_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.file_name,
            &self.status_message,
            self.diagnostic_counts(),
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Listing => &mut self.listing_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Scopes => &mut self.scopes_scroll,
        }
    }

    /// Scroll the listing to the first diagnostic below the current offset,
    /// wrapping to the top.
    fn jump_to_next_diagnostic(&mut self) {
        let rows = panes::listing::diagnostic_rows(&self.compilation);
        let next = rows
            .iter()
            .copied()
            .find(|&row| row > self.listing_scroll)
            .or_else(|| rows.first().copied());

        match next {
            // Keep the offending source line in view above the message.
            Some(row) => {
                self.focused_pane = FocusedPane::Listing;
                self.listing_scroll = row.saturating_sub(1);
                self.status_message = format!("Diagnostic at listing row {}", row + 1);
            }
            None => {
                self.status_message = String::from("No diagnostics");
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(PAGE);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(PAGE);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            // Render clamps this to the last page.
            KeyCode::End => {
                *self.focused_scroll() = usize::MAX;
            }
            KeyCode::Char('n') => {
                self.jump_to_next_diagnostic();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parser::ReservedWordTable;
    use crossterm::event::KeyModifiers;

    fn app_for(source: &str) -> App {
        let compilation = crate::compile(source, &ReservedWordTable::builtin(), &Config::default());
        App::new(compilation, "test.pas")
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut pane = FocusedPane::Listing;
        for _ in 0..3 {
            pane = pane.next();
        }
        assert_eq!(pane, FocusedPane::Listing);
        assert_eq!(FocusedPane::Listing.prev(), FocusedPane::Scopes);
        assert_eq!(FocusedPane::Tokens.prev().next(), FocusedPane::Tokens);
    }

    #[test]
    fn test_scroll_follows_focus() {
        let mut app = app_for("program p(); begin end.");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tokens_scroll, 1);
        assert_eq!(app.listing_scroll, 0);

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tokens_scroll, 0);
    }

    #[test]
    fn test_next_diagnostic_wraps() {
        let mut app = app_for("program p();\nbegin\nx := 1\nend.");
        assert_eq!(app.diagnostic_counts().semantic, 1);

        press(&mut app, KeyCode::Char('n'));
        let first = app.listing_scroll;
        assert_eq!(app.focused_pane, FocusedPane::Listing);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.listing_scroll, first);
    }

    #[test]
    fn test_quit() {
        let mut app = app_for("program p(); begin end.");
        assert_eq!(app.status_message, "Compiled cleanly");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
