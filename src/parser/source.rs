//! Line-addressable source text and the cursor that walks it
//!
//! The tokenizer never indexes the raw source string directly. Instead it
//! holds a [`Position`] and asks the [`SourceBuffer`] to peek at or advance
//! over the character under it. Because `Position` is `Copy`, a recognizer
//! that wants to try a match and back out simply keeps a copy and assigns it
//! back on failure.

use std::fmt;

/// Default number of usable characters per source line.
pub const DEFAULT_MAX_LINE_WIDTH: usize = 71;

/// A location in the source buffer (zero-based line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Whether this is the very first character of the input.
    pub fn is_origin(&self) -> bool {
        self.line == 0 && self.column == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Source lines, truncated to a fixed width and newline-terminated.
///
/// Every stored line ends in `'\n'` so that the tokenizer sees line breaks
/// as ordinary whitespace while walking the buffer.
#[derive(Debug, Clone, Default)]
pub struct SourceBuffer {
    lines: Vec<Vec<char>>,
}

impl SourceBuffer {
    /// Build a buffer using [`DEFAULT_MAX_LINE_WIDTH`].
    pub fn new(text: &str) -> Self {
        Self::with_max_width(text, DEFAULT_MAX_LINE_WIDTH)
    }

    /// Build a buffer, silently dropping characters past `max_width` on
    /// each line.
    pub fn with_max_width(text: &str, max_width: usize) -> Self {
        let lines = text
            .lines()
            .map(|line| {
                let mut chars: Vec<char> = line.chars().take(max_width).collect();
                chars.push('\n');
                chars
            })
            .collect();
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of line `n` without its trailing newline.
    pub fn line_text(&self, n: usize) -> Option<String> {
        self.lines
            .get(n)
            .map(|chars| chars[..chars.len() - 1].iter().collect())
    }

    pub fn has_next(&self, cursor: &Position) -> bool {
        self.lines
            .get(cursor.line)
            .is_some_and(|line| cursor.column < line.len())
    }

    pub fn peek(&self, cursor: &Position) -> Option<char> {
        self.lines
            .get(cursor.line)
            .and_then(|line| line.get(cursor.column))
            .copied()
    }

    /// Consume the character under `cursor`, rolling over to the start of
    /// the next line when the current one is exhausted.
    pub fn advance(&self, cursor: &mut Position) -> Option<char> {
        let ch = self.peek(cursor)?;
        cursor.column += 1;
        if cursor.column >= self.lines[cursor.line].len() {
            cursor.line += 1;
            cursor.column = 0;
        }
        Some(ch)
    }
}
