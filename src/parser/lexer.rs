//! Tokenizer for the Pascal-like source language
//!
//! [`Lexer::next_token`] produces exactly one [`Token`] per call. After
//! skipping whitespace it tries a fixed cascade of recognizers, first match
//! wins:
//!
//! 1. words (reserved words and identifiers)
//! 2. numbers (integers and reals, with shape diagnostics)
//! 3. relational operators
//! 4. everything else (punctuation, `+ - * /`, `:=`, `..`, unknown symbols)
//!
//! A recognizer that does not match leaves the cursor where it found it.
//! Once a recognizer has committed it always returns a token, possibly a
//! lexical error, so every call advances the cursor by at least one
//! character until the input runs out. From then on the lexer keeps
//! returning [`TokenKind::EndOfInput`].
//!
//! # Word boundaries
//!
//! A word is only looked up in the reserved-word table when whitespace was
//! consumed immediately before it, or when it starts the input. A word glued
//! to a preceding symbol (`(not`, `+begin`) is an identifier.

use super::reserved::ReservedWordTable;
use super::source::{Position, SourceBuffer};
use super::token::{AddOp, Attribute, MulOp, RelOp, Token, TokenKind};

/// Identifiers longer than this are lexical errors.
pub const MAX_IDENTIFIER_LEN: usize = 10;
/// Longest integer literal.
pub const MAX_INTEGER_DIGITS: usize = 10;
/// Longest whole (`xx`) or fractional (`yy`) part of a real literal.
pub const MAX_REAL_PART_DIGITS: usize = 5;
/// Longest exponent (`zz`) of a real literal.
pub const MAX_EXPONENT_DIGITS: usize = 2;

/// Pull-based tokenizer over a [`SourceBuffer`].
pub struct Lexer {
    source: SourceBuffer,
    cursor: Position,
    reserved: ReservedWordTable,
}

impl Lexer {
    pub fn new(source: SourceBuffer, reserved: ReservedWordTable) -> Self {
        Self {
            source,
            cursor: Position::default(),
            reserved,
        }
    }

    pub fn into_source(self) -> SourceBuffer {
        self.source
    }

    /// Where the next token will start scanning.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        let skipped = self.skip_whitespace();

        if self.is_at_end() {
            return Token::new(TokenKind::EndOfInput, "", self.cursor);
        }

        let delimited = skipped || self.cursor.is_origin();
        let token = self
            .word(delimited)
            .or_else(|| self.number())
            .or_else(|| self.relop())
            .unwrap_or_else(|| self.catch_all());

        tracing::trace!(kind = %token.kind, lexeme = %token.lexeme, at = %token.position, "token");
        token
    }

    /// Tokenize the remaining input, ending with (and including) the
    /// end-of-input token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    /// Reserved word or identifier.
    fn word(&mut self, delimited: bool) -> Option<Token> {
        if !self.peek().is_some_and(is_letter) {
            return None;
        }

        let start = self.cursor;
        let mut lexeme = String::new();
        while let Some(ch) = self.peek().filter(|&c| is_letter(c) || is_digit(c)) {
            lexeme.push(ch);
            self.advance();
        }

        if delimited {
            if let Some((kind, attribute)) = self.reserved.lookup(&lexeme) {
                return Some(Token::with_attribute(kind, attribute, lexeme, start));
            }
        }

        if lexeme.len() > MAX_IDENTIFIER_LEN {
            return Some(Token::lexical_error(
                "invalid identifier: too long",
                lexeme,
                start,
            ));
        }

        Some(Token::new(TokenKind::Identifier, lexeme, start))
    }

    /// Integer or real literal: `xx[.yy[E[+-]zz]]`.
    fn number(&mut self) -> Option<Token> {
        let start = self.cursor;
        let whole = self.digit_run();
        if whole.is_empty() {
            return None;
        }

        // A dot only belongs to the number when digits follow it, which
        // keeps `1..10` lexing as a range.
        let mut fraction = None;
        let before_dot = self.cursor;
        if self.eat('.') {
            let digits = self.digit_run();
            if digits.is_empty() {
                self.cursor = before_dot;
            } else {
                fraction = Some(digits);
            }
        }

        let mut exponent = None;
        if fraction.is_some() {
            let before_exponent = self.cursor;
            if self.eat('E') {
                let sign = if self.eat('+') {
                    Some('+')
                } else if self.eat('-') {
                    Some('-')
                } else {
                    None
                };
                let digits = self.digit_run();
                if digits.is_empty() {
                    self.cursor = before_exponent;
                } else {
                    exponent = Some((sign, digits));
                }
            }
        }

        let mut lexeme = whole.clone();
        if let Some(yy) = &fraction {
            lexeme.push('.');
            lexeme.push_str(yy);
        }
        if let Some((sign, zz)) = &exponent {
            lexeme.push('E');
            lexeme.extend(sign);
            lexeme.push_str(zz);
        }

        let problem = match &fraction {
            None => check_integer(&whole),
            Some(yy) => check_real(&whole, yy, exponent.as_ref().map(|(_, zz)| zz.as_str())),
        };

        Some(match problem {
            Some(message) => Token::lexical_error(message, lexeme, start),
            None => Token::new(TokenKind::Number, lexeme, start),
        })
    }

    fn relop(&mut self) -> Option<Token> {
        let start = self.cursor;
        let (op, lexeme) = match self.peek()? {
            '=' => {
                self.advance();
                (RelOp::Eq, "=")
            }
            '<' => {
                self.advance();
                if self.eat('>') {
                    (RelOp::Neq, "<>")
                } else if self.eat('=') {
                    (RelOp::Lte, "<=")
                } else {
                    (RelOp::Lt, "<")
                }
            }
            '>' => {
                self.advance();
                if self.eat('=') {
                    (RelOp::Gte, ">=")
                } else {
                    (RelOp::Gt, ">")
                }
            }
            _ => return None,
        };
        Some(Token::with_attribute(
            TokenKind::Relop,
            Attribute::Relop(op),
            lexeme,
            start,
        ))
    }

    /// Punctuation, single-character operators, and the unknown-symbol
    /// fallback. Always consumes at least one character.
    fn catch_all(&mut self) -> Token {
        let start = self.cursor;
        let Some(ch) = self.advance() else {
            return Token::new(TokenKind::EndOfInput, "", start);
        };

        let simple = |kind: TokenKind| Token::new(kind, ch.to_string(), start);
        let addop = |op: AddOp| {
            Token::with_attribute(TokenKind::Addop, Attribute::Addop(op), ch.to_string(), start)
        };
        let mulop = |op: MulOp| {
            Token::with_attribute(TokenKind::Mulop, Attribute::Mulop(op), ch.to_string(), start)
        };

        match ch {
            '(' => simple(TokenKind::OpenParen),
            ')' => simple(TokenKind::CloseParen),
            ';' => simple(TokenKind::Semicolon),
            ',' => simple(TokenKind::Comma),
            '[' => simple(TokenKind::OpenBracket),
            ']' => simple(TokenKind::CloseBracket),
            '+' => addop(AddOp::Plus),
            '-' => addop(AddOp::Minus),
            '*' => mulop(MulOp::Times),
            '/' => mulop(MulOp::Slash),
            ':' => {
                if self.eat('=') {
                    Token::new(TokenKind::AssignOp, ":=", start)
                } else {
                    simple(TokenKind::Colon)
                }
            }
            '.' => {
                if self.eat('.') {
                    Token::new(TokenKind::DotDot, "..", start)
                } else {
                    simple(TokenKind::Dot)
                }
            }
            _ => Token::lexical_error("unrecognized symbol", ch.to_string(), start),
        }
    }

    /// Skip whitespace, reporting whether any was consumed.
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.peek().is_some_and(is_whitespace) {
            self.advance();
            skipped = true;
        }
        skipped
    }

    fn digit_run(&mut self) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.peek().filter(|&c| is_digit(c)) {
            digits.push(ch);
            self.advance();
        }
        digits
    }

    /// Consume `expected` if it is the next character.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.peek(&self.cursor)
    }

    fn advance(&mut self) -> Option<char> {
        self.source.advance(&mut self.cursor)
    }

    fn is_at_end(&self) -> bool {
        !self.source.has_next(&self.cursor)
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn has_leading_zero(digits: &str) -> bool {
    digits.len() > 1 && digits.starts_with('0')
}

fn check_integer(xx: &str) -> Option<&'static str> {
    if has_leading_zero(xx) {
        Some("invalid integer: leading zeros")
    } else if xx.len() > MAX_INTEGER_DIGITS {
        Some("invalid integer: too long")
    } else {
        None
    }
}

fn check_real(xx: &str, yy: &str, zz: Option<&str>) -> Option<&'static str> {
    if has_leading_zero(xx) {
        return Some("invalid real: leading zeros in xx");
    }
    if xx.len() > MAX_REAL_PART_DIGITS {
        return Some("invalid real: xx too long");
    }
    if yy.len() > MAX_REAL_PART_DIGITS {
        return Some("invalid real: yy too long");
    }
    if yy.len() > 1 && yy.ends_with('0') {
        return Some("invalid real: trailing zeros in yy");
    }
    match zz {
        Some(zz) if zz.len() > MAX_EXPONENT_DIGITS => Some("invalid real: zz too long"),
        Some(zz) if has_leading_zero(zz) => Some("invalid real: leading zeros in zz"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::ReservedWord;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(SourceBuffer::new(source), ReservedWordTable::builtin()).tokenize()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_program_tokens() {
        let tokens = lex("program p(); var x: integer; begin x := 1 end.");

        assert!(tokens[0].is_reserved(ReservedWord::Program));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "p");
        assert_eq!(tokens[2].kind, TokenKind::OpenParen);
        assert_eq!(tokens[3].kind, TokenKind::CloseParen);
        assert_eq!(tokens[4].kind, TokenKind::Semicolon);
        assert!(tokens[5].is_reserved(ReservedWord::Var));
        assert_eq!(tokens[6].lexeme, "x");
        assert_eq!(tokens[7].kind, TokenKind::Colon);
        assert!(tokens[8].is_reserved(ReservedWord::IntName));
        assert_eq!(tokens[9].kind, TokenKind::Semicolon);
        assert!(tokens[10].is_reserved(ReservedWord::Begin));
        assert_eq!(tokens[12].kind, TokenKind::AssignOp);
        assert_eq!(tokens[13].kind, TokenKind::Number);
        assert!(tokens[14].is_reserved(ReservedWord::End));
        assert_eq!(tokens[15].kind, TokenKind::Dot);
        assert_eq!(tokens[16].kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_operators() {
        let tokens = lex("= <> < <= >= > + - * / := : .. or div mod and");
        let attrs: Vec<String> = tokens.iter().map(|t| t.attribute_name()).collect();
        assert_eq!(
            &attrs[..18],
            &[
                "EQ", "NEQ", "LT", "LTE", "GTE", "GT", "PLUS", "MINUS", "TIMES", "SLASH", "NULL",
                "NULL", "NULL", "OR", "DIV", "MOD", "AND", "NULL"
            ]
        );
        assert_eq!(tokens[10].kind, TokenKind::AssignOp);
        assert_eq!(tokens[11].kind, TokenKind::Colon);
        assert_eq!(tokens[12].kind, TokenKind::DotDot);
    }

    #[test]
    fn test_reserved_word_needs_preceding_whitespace() {
        let tokens = lex("x :=(not y)");
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].lexeme, "not");

        let tokens = lex("x := (  not y)");
        assert!(tokens[3].is_reserved(ReservedWord::Not));
    }

    #[test]
    fn test_word_at_start_of_line_is_reserved() {
        let tokens = lex("x;\nbegin");
        assert!(tokens[2].is_reserved(ReservedWord::Begin));
    }

    #[test]
    fn test_identifier_too_long_still_consumed() {
        let tokens = lex("abcdefghijk z");
        assert_eq!(tokens[0].kind, TokenKind::LexicalError);
        assert_eq!(tokens[0].lexeme, "abcdefghijk");
        assert_eq!(tokens[1].lexeme, "z");

        let tokens = lex("abcdefghij");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_real_literals() {
        let tokens = lex("12345.12345 1.5E+12 3.25E2");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Number));
        assert_eq!(tokens[1].lexeme, "1.5E+12");
    }

    #[test]
    fn test_malformed_numbers() {
        let cases = [
            ("007.5", "invalid real: leading zeros in xx"),
            ("7.50", "invalid real: trailing zeros in yy"),
            ("123456.1", "invalid real: xx too long"),
            ("1.123456", "invalid real: yy too long"),
            ("1.5E123", "invalid real: zz too long"),
            ("1.5E05", "invalid real: leading zeros in zz"),
            ("00", "invalid integer: leading zeros"),
            ("07", "invalid integer: leading zeros"),
            ("07.5", "invalid real: leading zeros in xx"),
            ("12345678901", "invalid integer: too long"),
        ];
        for (source, message) in cases {
            let tokens = lex(source);
            assert_eq!(tokens[0].kind, TokenKind::LexicalError, "{source}");
            assert_eq!(tokens[0].message.as_deref(), Some(message), "{source}");
            assert_eq!(tokens[0].lexeme, source);
            assert_eq!(tokens[1].kind, TokenKind::EndOfInput, "{source}");
        }
    }

    #[test]
    fn test_range_and_trailing_dot() {
        assert_eq!(
            kinds("1..10"),
            vec![TokenKind::Number, TokenKind::DotDot, TokenKind::Number, TokenKind::EndOfInput]
        );
        assert_eq!(
            kinds("5."),
            vec![TokenKind::Number, TokenKind::Dot, TokenKind::EndOfInput]
        );
    }

    #[test]
    fn test_dangling_exponent_is_left_in_input() {
        let tokens = lex("1.5E");
        assert_eq!(tokens[0].lexeme, "1.5");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "E");
    }

    #[test]
    fn test_unrecognized_symbol_consumes_one_char() {
        let tokens = lex("@#x");
        assert_eq!(tokens[0].kind, TokenKind::LexicalError);
        assert_eq!(tokens[0].lexeme, "@");
        assert_eq!(tokens[1].kind, TokenKind::LexicalError);
        assert_eq!(tokens[1].lexeme, "#");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_end_of_input_repeats() {
        let mut lexer = Lexer::new(SourceBuffer::new("  "), ReservedWordTable::builtin());
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_positions_advance_and_lexemes_round_trip() {
        let source = "program  p (a,b);\n  var x : array [1..10] of real;\n begin x[2]:=3.5 end .";
        let buffer = SourceBuffer::new(source);
        let mut lexer = Lexer::new(buffer.clone(), ReservedWordTable::builtin());

        let mut rebuilt = String::new();
        let mut cursor = Position::default();
        let mut last = Position::default();
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::EndOfInput {
                break;
            }
            assert!(token.position >= last);
            last = token.position;

            // whitespace skipped between the previous token and this one
            while cursor < token.position {
                rebuilt.extend(buffer.advance(&mut cursor));
            }
            rebuilt.push_str(&token.lexeme);
            for _ in token.lexeme.chars() {
                buffer.advance(&mut cursor);
            }
            assert_eq!(cursor, lexer.cursor());
        }
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_empty_table_yields_identifiers() {
        let tokens = Lexer::new(SourceBuffer::new("begin end"), ReservedWordTable::empty()).tokenize();
        assert!(tokens[..2].iter().all(|t| t.kind == TokenKind::Identifier));
    }
}
