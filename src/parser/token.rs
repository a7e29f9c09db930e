//! Token and diagnostic model
//!
//! Every value the tokenizer produces, and every diagnostic the parser
//! records, is a [`Token`]. Keeping diagnostics in the same stream as real
//! tokens means the report writers can interleave them with the source by
//! position without a second data structure.
//!
//! Sub-variants of reserved words and operators are carried in the
//! [`Attribute`] tagged union. [`TokenPattern`] pairs a kind with an optional
//! attribute, where `None` acts as a wildcard; the parser uses patterns both
//! for `match` expectations and for its recovery sync sets.

use super::source::Position;
use std::fmt;

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Reserved,
    Identifier,
    Number,
    Relop,
    Addop,
    Mulop,

    // Punctuation
    OpenParen,
    CloseParen,
    Semicolon,
    Comma,
    Colon,
    OpenBracket,
    CloseBracket,
    DotDot,
    Dot,

    AssignOp,
    EndOfInput,

    // Diagnostics
    LexicalError,
    SyntaxError,
    SemanticError,
}

impl TokenKind {
    /// Whether this kind is one of the three diagnostic kinds.
    pub fn is_diagnostic(self) -> bool {
        matches!(
            self,
            TokenKind::LexicalError | TokenKind::SyntaxError | TokenKind::SemanticError
        )
    }

    /// Upper-case name used by the token dump and the word-list format.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Reserved => "RESWRD",
            TokenKind::Identifier => "ID",
            TokenKind::Number => "NUM",
            TokenKind::Relop => "RELOP",
            TokenKind::Addop => "ADDOP",
            TokenKind::Mulop => "MULOP",
            TokenKind::OpenParen => "OPENPAREN",
            TokenKind::CloseParen => "CLOSEPAREN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::OpenBracket => "OPENBRACKET",
            TokenKind::CloseBracket => "CLOSEBRACKET",
            TokenKind::DotDot => "DOTDOT",
            TokenKind::Dot => "DOT",
            TokenKind::AssignOp => "ASSIGNOP",
            TokenKind::EndOfInput => "$",
            TokenKind::LexicalError => "LEXERR",
            TokenKind::SyntaxError => "SYNTAXERR",
            TokenKind::SemanticError => "SEMERR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declares a closed enum whose variants have a stable upper-case name and
/// ordinal, as used by the reserved-word list.
macro_rules! named_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.name() == name)
            }

            pub fn from_ordinal(ordinal: usize) -> Option<Self> {
                Self::ALL.get(ordinal).copied()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

named_enum! {
    /// Reserved words of the language.
    ReservedWord {
        Program => "PROGRAM",
        Var => "VAR",
        Array => "ARRAY",
        Of => "OF",
        IntName => "INT_NAME",
        RealName => "REAL_NAME",
        Proc => "PROC",
        Begin => "BEGIN",
        End => "END",
        If => "IF",
        Then => "THEN",
        Else => "ELSE",
        While => "WHILE",
        Do => "DO",
        Call => "CALL",
        Not => "NOT",
    }
}

named_enum! {
    /// Relational operators.
    RelOp {
        Eq => "EQ",
        Neq => "NEQ",
        Lt => "LT",
        Lte => "LTE",
        Gte => "GTE",
        Gt => "GT",
    }
}

named_enum! {
    /// Additive operators.
    AddOp {
        Plus => "PLUS",
        Minus => "MINUS",
        Or => "OR",
    }
}

named_enum! {
    /// Multiplicative operators.
    MulOp {
        Times => "TIMES",
        Slash => "SLASH",
        Div => "DIV",
        Mod => "MOD",
        And => "AND",
    }
}

impl RelOp {
    /// Source spelling, for messages.
    pub fn symbol(self) -> &'static str {
        match self {
            RelOp::Eq => "=",
            RelOp::Neq => "<>",
            RelOp::Lt => "<",
            RelOp::Lte => "<=",
            RelOp::Gte => ">=",
            RelOp::Gt => ">",
        }
    }
}

impl AddOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AddOp::Plus => "+",
            AddOp::Minus => "-",
            AddOp::Or => "or",
        }
    }
}

impl MulOp {
    pub fn symbol(self) -> &'static str {
        match self {
            MulOp::Times => "*",
            MulOp::Slash => "/",
            MulOp::Div => "div",
            MulOp::Mod => "mod",
            MulOp::And => "and",
        }
    }
}

/// Sub-variant of a reserved word or operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Reserved(ReservedWord),
    Relop(RelOp),
    Addop(AddOp),
    Mulop(MulOp),
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Reserved(w) => w.fmt(f),
            Attribute::Relop(op) => op.fmt(f),
            Attribute::Addop(op) => op.fmt(f),
            Attribute::Mulop(op) => op.fmt(f),
        }
    }
}

/// A classified piece of source text, or a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub attribute: Option<Attribute>,
    pub lexeme: String,
    pub position: Position,
    /// Diagnostic text; only set on the three diagnostic kinds.
    pub message: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            attribute: None,
            lexeme: lexeme.into(),
            position,
            message: None,
        }
    }

    pub fn with_attribute(
        kind: TokenKind,
        attribute: Attribute,
        lexeme: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            attribute: Some(attribute),
            ..Self::new(kind, lexeme, position)
        }
    }

    /// A diagnostic token of the given kind.
    pub fn diagnostic(
        kind: TokenKind,
        message: impl Into<String>,
        lexeme: impl Into<String>,
        position: Position,
    ) -> Self {
        debug_assert!(kind.is_diagnostic());
        Self {
            message: Some(message.into()),
            ..Self::new(kind, lexeme, position)
        }
    }

    pub fn lexical_error(
        message: impl Into<String>,
        lexeme: impl Into<String>,
        position: Position,
    ) -> Self {
        Self::diagnostic(TokenKind::LexicalError, message, lexeme, position)
    }

    pub fn is_diagnostic(&self) -> bool {
        self.kind.is_diagnostic()
    }

    pub fn is_reserved(&self, word: ReservedWord) -> bool {
        self.kind == TokenKind::Reserved && self.attribute == Some(Attribute::Reserved(word))
    }

    /// Attribute column of the token dump.
    pub fn attribute_name(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        match (self.kind, self.attribute) {
            (_, Some(attr)) => attr.to_string(),
            (TokenKind::Identifier | TokenKind::Number, None) => self.lexeme.clone(),
            _ => "NULL".to_string(),
        }
    }

    /// The pattern this token satisfies exactly (kind and attribute).
    pub fn pattern(&self) -> TokenPattern {
        TokenPattern {
            kind: self.kind,
            attribute: self.attribute,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pattern().fmt(f)
    }
}

/// A token kind with an optional attribute; `None` matches any attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenPattern {
    pub kind: TokenKind,
    pub attribute: Option<Attribute>,
}

impl TokenPattern {
    pub const fn kind(kind: TokenKind) -> Self {
        Self {
            kind,
            attribute: None,
        }
    }

    pub const fn reserved(word: ReservedWord) -> Self {
        Self {
            kind: TokenKind::Reserved,
            attribute: Some(Attribute::Reserved(word)),
        }
    }

    pub const fn addop(op: AddOp) -> Self {
        Self {
            kind: TokenKind::Addop,
            attribute: Some(Attribute::Addop(op)),
        }
    }

    pub fn matches(&self, token: &Token) -> bool {
        if self.kind != token.kind {
            return false;
        }
        match (self.attribute, token.attribute) {
            (None, _) | (_, None) => true,
            (Some(want), Some(got)) => want == got,
        }
    }
}

impl fmt::Display for TokenPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attribute {
            Some(attr) => write!(f, "{{ {} {} }}", self.kind, attr),
            None => write!(f, "{{ {} NULL }}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_pattern_matches_any_attribute() {
        let token = Token::with_attribute(
            TokenKind::Addop,
            Attribute::Addop(AddOp::Or),
            "or",
            Position::default(),
        );
        assert!(TokenPattern::kind(TokenKind::Addop).matches(&token));
        assert!(TokenPattern::addop(AddOp::Or).matches(&token));
        assert!(!TokenPattern::addop(AddOp::Plus).matches(&token));
        assert!(!TokenPattern::kind(TokenKind::Mulop).matches(&token));
    }

    #[test]
    fn test_named_enum_lookup() {
        assert_eq!(ReservedWord::from_name("INT_NAME"), Some(ReservedWord::IntName));
        assert_eq!(ReservedWord::from_ordinal(15), Some(ReservedWord::Not));
        assert_eq!(MulOp::from_ordinal(4), Some(MulOp::And));
        assert_eq!(AddOp::from_ordinal(3), None);
    }

    #[test]
    fn test_attribute_name_column() {
        let pos = Position::default();
        assert_eq!(Token::new(TokenKind::Identifier, "abc", pos).attribute_name(), "abc");
        assert_eq!(Token::new(TokenKind::Semicolon, ";", pos).attribute_name(), "NULL");
        assert_eq!(
            Token::lexical_error("unrecognized symbol", "@", pos).attribute_name(),
            "unrecognized symbol"
        );
    }
}
