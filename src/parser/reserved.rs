//! Reserved-word table
//!
//! The tokenizer does not hard-code its keywords. They come from a word list
//! with one whitespace-separated record per line:
//!
//! ```text
//! lexeme  kindName  attributeOrdinal
//! ```
//!
//! `kindName` is either a reserved-word name (`PROGRAM`, `INT_NAME`, ...),
//! `RESWRD` (the ordinal picks the reserved word), or one of `ADDOP`,
//! `MULOP`, `RELOP` (the ordinal picks the operator). Records that resolve
//! to nothing are skipped.

use super::token::{AddOp, Attribute, MulOp, RelOp, ReservedWord, TokenKind};
use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::path::Path;

/// The standard word list, compiled into the crate.
const BUILTIN_WORDS: &str = include_str!("../../reserved_words.txt");

/// Lexeme → (kind, attribute) lookup used by the word recognizer.
#[derive(Debug, Clone, Default)]
pub struct ReservedWordTable {
    entries: FxHashMap<String, (TokenKind, Attribute)>,
}

impl ReservedWordTable {
    /// An empty table: every word lexes as an identifier.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in word list.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_WORDS)
    }

    /// Parse a word list, skipping records that cannot be resolved.
    pub fn parse(text: &str) -> Self {
        let mut entries = FxHashMap::default();

        for (number, line) in text.lines().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            match resolve_record(&fields) {
                Some((lexeme, entry)) => {
                    entries.insert(lexeme.to_string(), entry);
                }
                None => {
                    tracing::debug!(line = number + 1, record = line, "skipping reserved-word record");
                }
            }
        }

        tracing::debug!(count = entries.len(), "loaded reserved words");
        Self { entries }
    }

    /// Read a word list from disk. A missing file yields an empty table.
    pub fn load(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "reserved-word file not found, no reserved words recognized");
                Ok(Self::empty())
            }
            Err(e) => Err(e),
        }
    }

    pub fn lookup(&self, lexeme: &str) -> Option<(TokenKind, Attribute)> {
        self.entries.get(lexeme).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn resolve_record<'a>(fields: &[&'a str]) -> Option<(&'a str, (TokenKind, Attribute))> {
    let [lexeme, kind, rest @ ..] = fields else {
        return None;
    };
    let ordinal = rest.first().and_then(|s| s.parse::<usize>().ok());

    let entry = match *kind {
        "RESWRD" => (
            TokenKind::Reserved,
            Attribute::Reserved(ReservedWord::from_ordinal(ordinal?)?),
        ),
        "ADDOP" => (TokenKind::Addop, Attribute::Addop(AddOp::from_ordinal(ordinal?)?)),
        "MULOP" => (TokenKind::Mulop, Attribute::Mulop(MulOp::from_ordinal(ordinal?)?)),
        "RELOP" => (TokenKind::Relop, Attribute::Relop(RelOp::from_ordinal(ordinal?)?)),
        name => (TokenKind::Reserved, Attribute::Reserved(ReservedWord::from_name(name)?)),
    };
    Some((*lexeme, entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_has_all_words() {
        let table = ReservedWordTable::builtin();
        assert_eq!(table.len(), 20);
        assert_eq!(
            table.lookup("procedure"),
            Some((TokenKind::Reserved, Attribute::Reserved(ReservedWord::Proc)))
        );
        assert_eq!(
            table.lookup("mod"),
            Some((TokenKind::Mulop, Attribute::Mulop(MulOp::Mod)))
        );
        assert_eq!(table.lookup("Program"), None);
    }

    #[test]
    fn test_unresolved_records_are_skipped() {
        let table = ReservedWordTable::parse("foo BOGUS 1\nbar ADDOP 9\nbaz RESWRD 1\n\nqux\n");
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup("baz"),
            Some((TokenKind::Reserved, Attribute::Reserved(ReservedWord::Var)))
        );
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let table = ReservedWordTable::load(Path::new("/definitely/not/here.txt")).unwrap();
        assert!(table.is_empty());
    }
}
