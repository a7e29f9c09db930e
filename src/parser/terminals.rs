//! Terminal patterns and the FIRST/FOLLOW sets built from them
//!
//! Grammar rules name terminals through these constants instead of spelling
//! out `TokenPattern::reserved(ReservedWord::Begin)` at every use site.

use super::token::{AddOp, ReservedWord, TokenKind, TokenPattern};

pub(crate) const ID: TokenPattern = TokenPattern::kind(TokenKind::Identifier);
pub(crate) const NUM: TokenPattern = TokenPattern::kind(TokenKind::Number);
pub(crate) const RELOP: TokenPattern = TokenPattern::kind(TokenKind::Relop);
pub(crate) const ADDOP: TokenPattern = TokenPattern::kind(TokenKind::Addop);
pub(crate) const MULOP: TokenPattern = TokenPattern::kind(TokenKind::Mulop);
pub(crate) const OPEN_PAREN: TokenPattern = TokenPattern::kind(TokenKind::OpenParen);
pub(crate) const CLOSE_PAREN: TokenPattern = TokenPattern::kind(TokenKind::CloseParen);
pub(crate) const SEMICOLON: TokenPattern = TokenPattern::kind(TokenKind::Semicolon);
pub(crate) const COMMA: TokenPattern = TokenPattern::kind(TokenKind::Comma);
pub(crate) const COLON: TokenPattern = TokenPattern::kind(TokenKind::Colon);
pub(crate) const OPEN_BRACKET: TokenPattern = TokenPattern::kind(TokenKind::OpenBracket);
pub(crate) const CLOSE_BRACKET: TokenPattern = TokenPattern::kind(TokenKind::CloseBracket);
pub(crate) const DOT_DOT: TokenPattern = TokenPattern::kind(TokenKind::DotDot);
pub(crate) const DOT: TokenPattern = TokenPattern::kind(TokenKind::Dot);
pub(crate) const ASSIGN: TokenPattern = TokenPattern::kind(TokenKind::AssignOp);
pub(crate) const END_OF_INPUT: TokenPattern = TokenPattern::kind(TokenKind::EndOfInput);

pub(crate) const PROGRAM: TokenPattern = TokenPattern::reserved(ReservedWord::Program);
pub(crate) const VAR: TokenPattern = TokenPattern::reserved(ReservedWord::Var);
pub(crate) const ARRAY: TokenPattern = TokenPattern::reserved(ReservedWord::Array);
pub(crate) const OF: TokenPattern = TokenPattern::reserved(ReservedWord::Of);
pub(crate) const INTEGER: TokenPattern = TokenPattern::reserved(ReservedWord::IntName);
pub(crate) const REAL: TokenPattern = TokenPattern::reserved(ReservedWord::RealName);
pub(crate) const PROCEDURE: TokenPattern = TokenPattern::reserved(ReservedWord::Proc);
pub(crate) const BEGIN: TokenPattern = TokenPattern::reserved(ReservedWord::Begin);
pub(crate) const END: TokenPattern = TokenPattern::reserved(ReservedWord::End);
pub(crate) const IF: TokenPattern = TokenPattern::reserved(ReservedWord::If);
pub(crate) const THEN: TokenPattern = TokenPattern::reserved(ReservedWord::Then);
pub(crate) const ELSE: TokenPattern = TokenPattern::reserved(ReservedWord::Else);
pub(crate) const WHILE: TokenPattern = TokenPattern::reserved(ReservedWord::While);
pub(crate) const DO: TokenPattern = TokenPattern::reserved(ReservedWord::Do);
pub(crate) const CALL: TokenPattern = TokenPattern::reserved(ReservedWord::Call);
pub(crate) const NOT: TokenPattern = TokenPattern::reserved(ReservedWord::Not);

pub(crate) const PLUS: TokenPattern = TokenPattern::addop(AddOp::Plus);
pub(crate) const MINUS: TokenPattern = TokenPattern::addop(AddOp::Minus);

/// Tokens that can start a statement.
pub(crate) const STATEMENT_FIRST: &[TokenPattern] = &[ID, BEGIN, IF, WHILE, CALL];

/// Tokens that can start an expression.
pub(crate) const EXPRESSION_FIRST: &[TokenPattern] = &[ID, NUM, OPEN_PAREN, NOT, PLUS, MINUS];

/// Tokens that can start a factor.
pub(crate) const FACTOR_FIRST: &[TokenPattern] = &[ID, NUM, OPEN_PAREN, NOT];

/// Tokens that can follow a complete statement.
pub(crate) const STATEMENT_FOLLOW: &[TokenPattern] = &[SEMICOLON, END, ELSE];

/// Tokens that can follow a complete expression.
pub(crate) const EXPRESSION_FOLLOW: &[TokenPattern] = &[
    SEMICOLON,
    END,
    ELSE,
    THEN,
    DO,
    CLOSE_BRACKET,
    COMMA,
    CLOSE_PAREN,
];

pub(crate) const SIMPLE_EXPRESSION_FOLLOW: &[TokenPattern] = &[
    SEMICOLON,
    END,
    ELSE,
    THEN,
    DO,
    CLOSE_BRACKET,
    COMMA,
    CLOSE_PAREN,
    RELOP,
];

pub(crate) const TERM_FOLLOW: &[TokenPattern] = &[
    SEMICOLON,
    END,
    ELSE,
    THEN,
    DO,
    CLOSE_BRACKET,
    COMMA,
    CLOSE_PAREN,
    RELOP,
    ADDOP,
];

pub(crate) const FACTOR_FOLLOW: &[TokenPattern] = &[
    SEMICOLON,
    END,
    ELSE,
    THEN,
    DO,
    CLOSE_BRACKET,
    COMMA,
    CLOSE_PAREN,
    RELOP,
    ADDOP,
    MULOP,
];
