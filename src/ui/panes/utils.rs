use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered pane block, highlighted when focused.
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane (at least one).
pub(crate) fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp `scroll` so the last page is never scrolled past.
pub(crate) fn clamp_scroll(scroll: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *scroll = (*scroll).min(total - visible);
    } else {
        *scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scroll() {
        let mut scroll = usize::MAX;
        clamp_scroll(&mut scroll, 50, 10);
        assert_eq!(scroll, 40);

        let mut scroll = 7;
        clamp_scroll(&mut scroll, 5, 10);
        assert_eq!(scroll, 0);
    }

    #[test]
    fn test_visible_height_accounts_for_borders() {
        assert_eq!(visible_height(Rect::new(0, 0, 10, 12)), 10);
        assert_eq!(visible_height(Rect::new(0, 0, 10, 1)), 1);
    }
}
