//! Parser state and the machinery shared by every grammar rule
//!
//! This module provides the [`Parser`] struct, `match_token`, syntax-error
//! reporting and panic-mode recovery. The grammar rules themselves are split
//! across sibling modules as `impl Parser` blocks:
//!
//! - `declarations`: program header, variable, type and procedure declarations
//! - `statements`: compound, assignment, `if`, `while` and `call` statements
//! - `expressions`: expressions, terms and factors with their typing
//!
//! # Error recovery
//!
//! Rule bodies return `Result<T, Unwound>`. A failed [`Parser::match_token`]
//! or an unpredicted lookahead records a syntax error and returns
//! `Err(Unwound)`; [`Parser::rule`] catches it at the rule boundary, skips
//! tokens until one in the rule's sync set (or the end marker) is the
//! lookahead, and hands back the rule's fallback value. Child rules are
//! called through their own guard, so an unwind never crosses a rule.

use super::lexer::Lexer;
use super::source::SourceBuffer;
use super::terminals::END_OF_INPUT;
use super::token::{Token, TokenKind, TokenPattern};
use crate::semantic::scope::ScopeTree;
use crate::semantic::types::{TypeCheck, ValueType};

/// Marker returned when a rule gives up on its current alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unwound;

/// Result of a rule body before recovery is applied.
pub(crate) type Step<T> = Result<T, Unwound>;

/// Rules that may be active at once. Each parenthesis or nested statement
/// costs a handful, so this caps source nesting well below the thread stack.
pub const MAX_RULE_DEPTH: usize = 400;

/// Registered name of a procedure scope whose header lost its identifier.
const UNNAMED_SCOPE: &str = "?";

/// Everything one pass over a source produces.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub source: SourceBuffer,
    /// Tokens and diagnostics in emission order.
    pub tokens: Vec<Token>,
    pub scopes: ScopeTree,
}

impl Compilation {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| token.is_diagnostic())
    }

    pub fn diagnostic_count(&self, kind: TokenKind) -> usize {
        self.diagnostics().filter(|token| token.kind == kind).count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics().next().is_some()
    }
}

/// Predictive recursive-descent parser with inline scope and type checks.
pub struct Parser {
    lexer: Lexer,
    pub(crate) lookahead: Token,
    pub(crate) tokens: Vec<Token>,
    pub(crate) scopes: ScopeTree,
    /// Rules currently on the call stack.
    depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        let mut parser = Self {
            lexer,
            lookahead: Token::new(TokenKind::EndOfInput, "", Default::default()),
            tokens: Vec::new(),
            scopes: ScopeTree::new(),
            depth: 0,
        };
        parser.lookahead = parser.pull();
        parser
    }

    /// Parse a whole program and return the token list and scope tree.
    pub fn parse_program(mut self) -> Compilation {
        self.program();
        self.scopes.pop_scope();

        if !self.at(END_OF_INPUT) {
            self.expected(&[END_OF_INPUT]);
            self.recover(&[]);
        }

        tracing::debug!(
            tokens = self.tokens.len(),
            diagnostics = self.tokens.iter().filter(|t| t.is_diagnostic()).count(),
            "parse finished"
        );

        Compilation {
            source: self.lexer.into_source(),
            tokens: self.tokens,
            scopes: self.scopes,
        }
    }

    // ===== Token flow =====

    /// Next non-diagnostic token from the lexer. Lexical errors are recorded
    /// in the token list but never become the lookahead.
    fn pull(&mut self) -> Token {
        loop {
            let token = self.lexer.next_token();
            self.tokens.push(token.clone());
            if token.kind != TokenKind::LexicalError {
                return token;
            }
        }
    }

    /// Replace the lookahead with the next token and return the old one.
    /// The end marker is never consumed.
    fn consume(&mut self) -> Token {
        if self.lookahead.kind == TokenKind::EndOfInput {
            return self.lookahead.clone();
        }
        let next = self.pull();
        std::mem::replace(&mut self.lookahead, next)
    }

    pub(crate) fn at(&self, pattern: TokenPattern) -> bool {
        pattern.matches(&self.lookahead)
    }

    pub(crate) fn at_any(&self, patterns: &[TokenPattern]) -> bool {
        patterns.iter().any(|pattern| pattern.matches(&self.lookahead))
    }

    /// Consume the lookahead if it satisfies `pattern`, otherwise record
    /// the expectation and unwind.
    pub(crate) fn match_token(&mut self, pattern: TokenPattern) -> Step<Token> {
        if self.at(pattern) {
            Ok(self.consume())
        } else {
            Err(self.expected(&[pattern]))
        }
    }

    // ===== Diagnostics =====

    /// Record a syntax error naming the acceptable tokens.
    pub(crate) fn expected(&mut self, wanted: &[TokenPattern]) -> Unwound {
        let wanted = wanted
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let message = format!("expected {wanted} but found {}", self.lookahead);
        self.tokens.push(Token::diagnostic(
            TokenKind::SyntaxError,
            message,
            self.lookahead.lexeme.clone(),
            self.lookahead.position,
        ));
        Unwound
    }

    pub(crate) fn semantic_error(&mut self, message: impl Into<String>, at: &Token) {
        self.tokens.push(Token::diagnostic(
            TokenKind::SemanticError,
            message,
            at.lexeme.clone(),
            at.position,
        ));
    }

    /// Unwrap a typing rule, recording its complaint against `at`.
    pub(crate) fn check(&mut self, result: TypeCheck, at: &Token) -> ValueType {
        match result {
            Ok(ty) => ty,
            Err(message) => {
                self.semantic_error(message, at);
                ValueType::Error
            }
        }
    }

    // ===== Recovery =====

    /// Skip tokens until the lookahead is in `sync` or is the end marker.
    pub(crate) fn recover(&mut self, sync: &[TokenPattern]) {
        let mut skipped = 0usize;
        while !self.at(END_OF_INPUT) && !self.at_any(sync) {
            self.consume();
            skipped += 1;
        }
        tracing::debug!(skipped, resume = %self.lookahead, "panic-mode recovery");
    }

    /// Run a rule body; on unwind, recover to `sync` and yield `fallback`.
    ///
    /// Past [`MAX_RULE_DEPTH`] the body is not entered: the construct is
    /// reported as a syntax error and skipped like any other.
    pub(crate) fn rule<T>(
        &mut self,
        sync: &[TokenPattern],
        fallback: T,
        body: impl FnOnce(&mut Self) -> Step<T>,
    ) -> T {
        if self.depth >= MAX_RULE_DEPTH {
            let message = format!("nesting too deep at {}", self.lookahead);
            self.tokens.push(Token::diagnostic(
                TokenKind::SyntaxError,
                message,
                self.lookahead.lexeme.clone(),
                self.lookahead.position,
            ));
            self.recover(sync);
            return fallback;
        }

        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        match result {
            Ok(value) => value,
            Err(Unwound) => {
                self.recover(sync);
                fallback
            }
        }
    }

    /// Pop scopes opened since the stack was `depth` deep.
    pub(crate) fn close_scopes_to(&mut self, depth: usize) {
        while self.scopes.depth() > depth {
            self.scopes.pop_scope();
        }
    }

    /// Open the scope of a program or procedure header.
    pub(crate) fn open_scope(&mut self, id: &Token) {
        if let Err(message) = self.scopes.push_scope(&id.lexeme) {
            self.semantic_error(message, id);
        }
    }

    /// Open a scope for a procedure whose name failed to parse. Nothing can
    /// call it, so a collision between two such scopes is not reported.
    pub(crate) fn open_unnamed_scope(&mut self) {
        let _ = self.scopes.push_scope(UNNAMED_SCOPE);
    }

    /// Resolve a variable reference, reporting unknown names.
    pub(crate) fn resolve(&mut self, id: &Token) -> ValueType {
        match self.scopes.resolve_symbol_type(&id.lexeme) {
            Ok(ty) => ty,
            Err(message) => {
                self.semantic_error(message, id);
                ValueType::Error
            }
        }
    }
}

/// Parser over `source` using the built-in reserved words.
#[cfg(test)]
pub(crate) fn parser_for(source: &str) -> Parser {
    use super::reserved::ReservedWordTable;
    Parser::new(Lexer::new(SourceBuffer::new(source), ReservedWordTable::builtin()))
}
