//! Token table pane

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::parser::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table},
    Frame,
};

/// Render the token table pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tokens ", is_focused);
    // One row is taken by the header.
    let visible = visible_height(area).saturating_sub(1).max(1);
    clamp_scroll(scroll_offset, tokens.len(), visible);

    let header = Row::new(["Line", "Lexeme", "Kind", "Attribute"]).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = tokens
        .iter()
        .skip(*scroll_offset)
        .take(visible)
        .map(|token| {
            let color = DEFAULT_THEME.token_color(token.kind);
            Row::new([
                Cell::from((token.position.line + 1).to_string())
                    .style(Style::default().fg(DEFAULT_THEME.comment)),
                Cell::from(token.lexeme.clone()).style(Style::default().fg(color)),
                Cell::from(token.kind.name()).style(Style::default().fg(color)),
                Cell::from(token.attribute_name()).style(Style::default().fg(DEFAULT_THEME.fg)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
