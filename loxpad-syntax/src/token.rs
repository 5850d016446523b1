//! Token definitions produced by the classifier.

use core::fmt;

use serde::Serialize;

/// Source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based, in characters).
    pub column: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Span {
            start,
            end,
            line,
            column,
        }
    }

    /// Whether the span covers no input.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Lexical category assigned to a run of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    /// Reserved word (`var`, `fun`, `and`, ...)
    Keyword,
    /// Double-quoted string literal
    String,
    /// Integer or decimal literal
    Number,
    /// `//` line comment
    Comment,
    /// Arithmetic, comparison and assignment symbols
    Operator,
    /// Variable, function or class name
    Identifier,
    /// `{ } ( )`
    Delimiter,
    /// Spaces, tabs and newlines
    Whitespace,
    /// String literal missing its closing quote
    Invalid,
    /// Anything no rule claims (`;`, `,`, `.`, stray symbols)
    Other,
}

impl TokenCategory {
    /// Name used by editor hosts for styling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::String => "string",
            Self::Number => "number",
            Self::Comment => "comment",
            Self::Operator => "operator",
            Self::Identifier => "identifier",
            Self::Delimiter => "delimiter",
            Self::Whitespace => "whitespace",
            Self::Invalid => "invalid",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified run of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Category.
    pub category: TokenCategory,
    /// Location in the classified text.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(category: TokenCategory, span: Span) -> Self {
        Token { category, span }
    }

    /// Slice of `source` this token covers.
    ///
    /// `source` must be the text the token was produced from.
    pub fn lexeme<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }

    /// Whether this token is insignificant for display listings.
    pub fn is_trivia(&self) -> bool {
        self.category == TokenCategory::Whitespace
    }
}
