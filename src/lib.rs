//! # Introduction
//!
//! pasfront is the front end of a small teaching compiler for a Pascal-like
//! language. One synchronous pass tokenizes the source, checks it against
//! the grammar and runs scope and type checks inline with the parse.
//!
//! ## Pipeline
//!
//! ```text
//! Source → SourceBuffer → Lexer ⇄ Parser (+ ScopeTree) → tokens & diagnostics → reports / TUI
//! ```
//!
//! 1. [`parser`]: source buffer, tokens, the lexer and the recursive-descent
//!    parser with panic-mode recovery.
//! 2. [`semantic`]: scope tree, value types and the typing rules the parser
//!    applies.
//! 3. [`report`]: listing, token dump and memory-layout files.
//! 4. [`config`] and [`error`]: driver settings and I/O errors.
//! 5. [`ui`]: ratatui viewer for a finished compilation; not part of the
//!    stable library API.
//!
//! Diagnostics never stop a pass. Lexical, syntax and semantic errors are
//! tokens interleaved with the real ones in [`Compilation::tokens`].
//!
//! ```
//! use pasfront::{compile, config::Config, parser::ReservedWordTable};
//!
//! let compilation = compile(
//!     "program p(); var x: integer; begin x := 1 end.",
//!     &ReservedWordTable::builtin(),
//!     &Config::default(),
//! );
//! assert!(!compilation.has_errors());
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod semantic;
pub mod ui;

pub use parser::Compilation;

use config::Config;
use parser::{Lexer, Parser, ReservedWordTable, SourceBuffer};

/// Run one front-end pass over `source`.
pub fn compile(source: &str, reserved: &ReservedWordTable, config: &Config) -> Compilation {
    let buffer = SourceBuffer::with_max_width(source, config.max_line_width);
    tracing::debug!(lines = buffer.line_count(), "compiling");
    let lexer = Lexer::new(buffer, reserved.clone());
    Parser::new(lexer).parse_program()
}
