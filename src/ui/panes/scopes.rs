//! Scope tree pane: programs and procedures with their symbols and offsets

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::semantic::scope::{ScopeId, ScopeTree};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Flatten the scope tree into display rows.
pub fn scope_lines(scopes: &ScopeTree) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for id in scopes.root().scopes() {
        push_scope(&mut lines, scopes, id, 0);
    }
    lines
}

fn push_scope(lines: &mut Vec<Line<'static>>, scopes: &ScopeTree, id: ScopeId, depth: usize) {
    let Some(scope) = scopes.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);

    lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(
            scope.name.clone(),
            Style::default()
                .fg(DEFAULT_THEME.scope_name)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({} bytes)", scope.offset_counter),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ]));

    for symbol in scope.symbols() {
        lines.push(Line::from(vec![
            Span::raw(format!("{indent}  ")),
            Span::styled(
                format!("{:>4} ", symbol.offset),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled(symbol.name.clone(), Style::default().fg(DEFAULT_THEME.fg)),
            Span::raw(": "),
            Span::styled(
                symbol.value_type.tag(),
                Style::default().fg(DEFAULT_THEME.type_name),
            ),
        ]));
    }

    for child in scope.scopes() {
        push_scope(lines, scopes, child, depth + 1);
    }
}

/// Render the scope tree pane
pub fn render_scopes_pane(
    frame: &mut Frame,
    area: Rect,
    scopes: &ScopeTree,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Scopes ", is_focused);
    let lines = scope_lines(scopes);

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no program scope)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible = visible_height(area);
    clamp_scroll(scroll_offset, lines.len(), visible);
    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible)
        .collect();
    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}
