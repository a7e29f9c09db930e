//! Status bar rendering with diagnostic counts and keybindings

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEY_HINTS: [(&str, &str); 4] = [
    ("⇥", "focus"),
    ("↑/↓", "scroll"),
    ("n", "next error"),
    ("q", "quit"),
];

/// Diagnostic totals shown on the left of the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticCounts {
    pub lexical: usize,
    pub syntax: usize,
    pub semantic: usize,
}

impl DiagnosticCounts {
    pub fn total(&self) -> usize {
        self.lexical + self.syntax + self.semantic
    }
}

/// Render the status bar at the bottom.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    file_name: &str,
    message: &str,
    counts: DiagnosticCounts,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let clean = counts.total() == 0;
    let (badge, badge_bg) = if clean {
        (" OK ".to_string(), DEFAULT_THEME.success)
    } else {
        (
            format!(
                " {} lex | {} syn | {} sem ",
                counts.lexical, counts.syntax, counts.semantic
            ),
            DEFAULT_THEME.error,
        )
    };

    let left = Line::from(vec![
        Span::styled(
            badge,
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {file_name} "), bar.fg(DEFAULT_THEME.primary)),
        Span::styled(" | ", bar.fg(DEFAULT_THEME.comment)),
        Span::styled(format!(" {message} "), bar.fg(DEFAULT_THEME.fg)),
    ]);
    frame.render_widget(
        Paragraph::new(left).style(bar).alignment(Alignment::Left),
        layout[0],
    );

    let key = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let mut hints = Vec::new();
    for (i, (keys, action)) in KEY_HINTS.iter().enumerate() {
        if i > 0 {
            hints.push(Span::styled("│ ", bar.fg(DEFAULT_THEME.comment)));
        }
        hints.push(Span::styled(format!(" {keys} "), key));
        hints.push(Span::styled(format!(" {action} "), bar.fg(DEFAULT_THEME.fg)));
    }

    let right_paragraph = Paragraph::new(Line::from(hints))
        .style(bar)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
