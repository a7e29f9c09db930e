//! Source text to checked token stream
//!
//! - [`source`]: line buffer and `Copy` cursor
//! - [`token`]: tokens, attributes and diagnostic tokens
//! - [`reserved`]: the reserved-word table
//! - [`lexer`]: the recognizer cascade (source text → tokens)
//! - [`parse`]: the [`Parser`] and its recovery machinery
//!
//! The grammar rules live in `declarations`, `statements` and `expressions`
//! as `impl Parser` blocks. The parser pulls one token at a time from the
//! lexer and runs scope and type checks as it recognizes each rule; there is
//! no syntax tree.
//!
//! # Language
//!
//! A Pascal-like teaching language: one program with integer/real scalars
//! and one-dimensional arrays, nested procedures with by-reference
//! parameters, `if`/`while`/`call` statements and a compound `begin..end`.

pub mod lexer;
pub mod parse;
pub mod reserved;
pub mod source;
pub mod token;

mod declarations;
mod expressions;
mod statements;
mod terminals;

pub use lexer::Lexer;
pub use parse::{Compilation, Parser, Unwound};
pub use reserved::ReservedWordTable;
pub use source::{Position, SourceBuffer};
pub use token::{Attribute, Token, TokenKind, TokenPattern};
