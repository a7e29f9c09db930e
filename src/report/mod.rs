//! Report files rendered from a [`Compilation`]
//!
//! - listing: numbered source lines, each followed by its diagnostics
//! - token dump: one row per token, diagnostics included
//! - layout: activation-record offsets of every variable, by scope

use crate::config::Config;
use crate::error::{PasfrontError, PasfrontResult};
use crate::parser::{Compilation, Token, TokenKind};
use crate::semantic::scope::{ScopeId, ScopeTree};
use crate::semantic::ValueType;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const INDENT: &str = "   ";

/// Label printed in front of a diagnostic in the listing.
fn diagnostic_label(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::LexicalError => "LEXERR",
        TokenKind::SyntaxError => "SYNTAXERR",
        _ => "SEMERR",
    }
}

/// Source listing with diagnostics printed under the line they belong to.
pub fn listing(compilation: &Compilation) -> String {
    let mut diagnostics: Vec<&Token> = compilation.diagnostics().collect();
    diagnostics.sort_by_key(|token| token.position.line);

    let mut out = String::new();
    let mut pending = diagnostics.into_iter().peekable();
    let source = &compilation.source;

    for n in 0..source.line_count() {
        let text = source.line_text(n).unwrap_or_default();
        let _ = writeln!(out, "{:<8}{}", n + 1, text);
        while let Some(token) = pending.next_if(|t| t.position.line <= n) {
            write_diagnostic(&mut out, token);
        }
    }
    // Diagnostics stamped on the end marker sit past the last line.
    for token in pending {
        write_diagnostic(&mut out, token);
    }
    out
}

fn write_diagnostic(out: &mut String, token: &Token) {
    let _ = writeln!(
        out,
        "{}: {}",
        diagnostic_label(token.kind),
        token.message.as_deref().unwrap_or_default()
    );
}

/// Tabular dump of every token in emission order.
pub fn token_dump(tokens: &[Token]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("{:<9}{:<17}{:<13}{:<10}", "Line No.", "Lexeme", "TOKEN-TYPE", "ATTRIBUTE").trim_end()
    );
    for token in tokens {
        let row = format!(
            "{:<9}{:<17}{:<13}{:<10}",
            token.position.line + 1,
            token.lexeme,
            token.kind.name(),
            token.attribute_name()
        );
        let _ = writeln!(out, "{}", row.trim_end());
    }
    out
}

/// Offsets of declared variables, one indentation step per nesting level.
/// Parameters live in the caller's record and are not listed.
pub fn layout(scopes: &ScopeTree) -> String {
    let mut out = String::new();
    for id in scopes.root().scopes() {
        write_scope(&mut out, scopes, id);
    }
    out
}

fn write_scope(out: &mut String, scopes: &ScopeTree, id: ScopeId) {
    let Some(scope) = scopes.get(id) else {
        return;
    };
    let indent = INDENT.repeat(scopes.nesting(id));
    for symbol in scope.symbols() {
        if symbol.value_type.is_param() || symbol.value_type == ValueType::ProgramParam {
            continue;
        }
        let _ = writeln!(
            out,
            "{indent}{}  {}  {}",
            symbol.offset,
            symbol.name,
            symbol.value_type.tag()
        );
    }
    for child in scope.scopes() {
        write_scope(out, scopes, child);
    }
}

/// Write the enabled reports for `source_path` into the configured output
/// directory. Returns the paths written.
pub fn write_reports(
    compilation: &Compilation,
    source_path: &Path,
    config: &Config,
) -> PasfrontResult<Vec<PathBuf>> {
    let stem = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());

    fs::create_dir_all(&config.out_dir).map_err(|e| PasfrontError::io(&config.out_dir, e))?;

    let mut reports = Vec::new();
    if config.listing {
        reports.push(("listing", listing(compilation)));
    }
    if config.tokens {
        reports.push(("tokens", token_dump(&compilation.tokens)));
    }
    if config.layout {
        reports.push(("loc", layout(&compilation.scopes)));
    }

    let mut written = Vec::with_capacity(reports.len());
    for (extension, contents) in reports {
        let path = config.out_dir.join(format!("{stem}.{extension}"));
        fs::write(&path, contents).map_err(|e| PasfrontError::io(&path, e))?;
        tracing::info!(path = %path.display(), "wrote report");
        written.push(path);
    }
    Ok(written)
}
