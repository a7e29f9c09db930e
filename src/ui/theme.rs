use crate::parser::TokenKind;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub warning: Color,   // Yellow
    pub keyword: Color,
    pub number: Color,
    pub operator: Color,
    pub identifier: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub scope_name: Color,
    pub type_name: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    warning: Color::Rgb(249, 226, 175),
    keyword: Color::Rgb(137, 180, 250),        // Blue for reserved words
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    operator: Color::Rgb(148, 226, 213),       // Teal for operators
    identifier: Color::Rgb(205, 214, 244),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),
    scope_name: Color::Rgb(249, 226, 175),     // Yellow for programs/procedures
    type_name: Color::Rgb(148, 226, 213),      // Cyan for types
};

impl Theme {
    /// Foreground for a token of `kind` in the listing and token table.
    pub fn token_color(&self, kind: TokenKind) -> Color {
        match kind {
            TokenKind::Reserved => self.keyword,
            TokenKind::Number => self.number,
            TokenKind::Identifier => self.identifier,
            TokenKind::Relop | TokenKind::Addop | TokenKind::Mulop | TokenKind::AssignOp => {
                self.operator
            }
            TokenKind::LexicalError => self.secondary,
            TokenKind::SyntaxError => self.error,
            TokenKind::SemanticError => self.warning,
            _ => self.fg,
        }
    }
}
