//! Listing pane: numbered source with diagnostics under each line
//!
//! Highlighting comes from the compilation's own tokens rather than a
//! second scanner, so what is coloured is exactly what the lexer saw.

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::parser::{Compilation, Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Colour one source line using the tokens that start on it.
fn highlight_line<'a>(text: &str, tokens: &[&Token]) -> Vec<Span<'a>> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut column = 0;

    for token in tokens {
        let start = token.position.column.min(chars.len());
        let end = (start + token.lexeme.chars().count()).min(chars.len());
        if start < column {
            continue;
        }
        if start > column {
            spans.push(Span::raw(chars[column..start].iter().collect::<String>()));
        }
        let mut style = Style::default().fg(DEFAULT_THEME.token_color(token.kind));
        if token.kind == TokenKind::Reserved {
            style = style.add_modifier(Modifier::BOLD);
        }
        if token.kind == TokenKind::LexicalError {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(
            chars[start..end].iter().collect::<String>(),
            style,
        ));
        column = end;
    }
    if column < chars.len() {
        spans.push(Span::raw(chars[column..].iter().collect::<String>()));
    }
    spans
}

/// All rows of the listing: source lines interleaved with diagnostics.
pub fn listing_lines(compilation: &Compilation) -> Vec<Line<'static>> {
    build_listing(compilation).0
}

/// Listing rows that hold a diagnostic rather than source text.
pub fn diagnostic_rows(compilation: &Compilation) -> Vec<usize> {
    build_listing(compilation).1
}

fn build_listing(compilation: &Compilation) -> (Vec<Line<'static>>, Vec<usize>) {
    let source = &compilation.source;
    let mut on_line: Vec<Vec<&Token>> = vec![Vec::new(); source.line_count()];
    let mut diagnostics: Vec<Vec<&Token>> = vec![Vec::new(); source.line_count() + 1];

    for token in &compilation.tokens {
        let line = token.position.line;
        if token.is_diagnostic() && token.kind != TokenKind::LexicalError {
            diagnostics[line.min(source.line_count())].push(token);
        } else if token.kind != TokenKind::EndOfInput {
            if let Some(tokens) = on_line.get_mut(line) {
                tokens.push(token);
            }
            if token.kind == TokenKind::LexicalError {
                diagnostics[line.min(source.line_count())].push(token);
            }
        }
    }

    let mut lines = Vec::new();
    let mut rows = Vec::new();
    for (n, tokens) in on_line.iter_mut().enumerate() {
        tokens.sort_by_key(|t| t.position.column);
        let text = source.line_text(n).unwrap_or_default();

        let has_errors = !diagnostics[n].is_empty();
        let number_style = if has_errors {
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };

        let mut spans = vec![Span::styled(format!("{:4} ", n + 1), number_style)];
        spans.extend(highlight_line(&text, tokens));
        lines.push(Line::from(spans));

        for token in &diagnostics[n] {
            rows.push(lines.len());
            lines.push(diagnostic_line(token));
        }
    }
    for token in &diagnostics[source.line_count()] {
        rows.push(lines.len());
        lines.push(diagnostic_line(token));
    }
    (lines, rows)
}

fn diagnostic_line(token: &Token) -> Line<'static> {
    let color = DEFAULT_THEME.token_color(token.kind);
    Line::from(vec![
        Span::raw("     "),
        Span::styled(
            format!("{} ", token.kind.name()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", token.position),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            token.message.clone().unwrap_or_default(),
            Style::default().fg(color),
        ),
    ])
}

/// Render the listing pane
pub fn render_listing_pane(
    frame: &mut Frame,
    area: Rect,
    compilation: &Compilation,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Listing ", is_focused);
    let lines = listing_lines(compilation);
    let visible = visible_height(area);
    clamp_scroll(scroll_offset, lines.len(), visible);

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible)
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}
