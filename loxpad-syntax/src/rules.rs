//! Declarative Lox rule table and language configuration.
//!
//! The table is plain data: an ordered list of `(pattern, category)` pairs.
//! Editor hosts receive it verbatim through `configure`, and the classifier
//! compiles it once per process.

use crate::token::TokenCategory;

/// Language identifier registered with editor hosts.
pub const LANGUAGE_ID: &str = "lox";

/// Reserved words, exact and case-sensitive.
pub const KEYWORDS: &[&str] = &[
    "and", "class", "else", "false", "for", "fun", "if", "nil", "or", "print", "return", "super",
    "this", "true", "var", "while",
];

/// A single classification rule.
///
/// `pattern` is a regular expression matched at the current scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRule {
    /// Category assigned on match.
    pub category: TokenCategory,
    /// Unanchored pattern source.
    pub pattern: &'static str,
}

impl TokenRule {
    const fn new(category: TokenCategory, pattern: &'static str) -> Self {
        TokenRule { category, pattern }
    }
}

/// Lox rules in evaluation order. First match wins.
///
/// `and`/`or` are claimed by the keyword rule; the operator rule only
/// carries symbols.
pub const LOX_RULES: &[TokenRule] = &[
    TokenRule::new(TokenCategory::Whitespace, r"\s+"),
    TokenRule::new(TokenCategory::Comment, r"//[^\n]*"),
    TokenRule::new(TokenCategory::String, r#""[^"\n]*""#),
    // Unterminated string: runs to end of line.
    TokenRule::new(TokenCategory::Invalid, r#""[^"\n]*"#),
    TokenRule::new(
        TokenCategory::Keyword,
        r"(?:and|class|else|false|for|fun|if|nil|or|print|return|super|this|true|var|while)\b",
    ),
    TokenRule::new(TokenCategory::Number, r"[0-9]+(?:\.[0-9]+)?"),
    TokenRule::new(TokenCategory::Identifier, r"[A-Za-z_][A-Za-z0-9_]*"),
    TokenRule::new(TokenCategory::Operator, r"[-+*/=!<>]=?"),
    TokenRule::new(TokenCategory::Delimiter, r"[{}()]"),
];

/// Bracket, auto-closing and comment metadata for editor hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageConfiguration {
    /// Line comment prefix.
    pub line_comment: &'static str,
    /// Pairs used for bracket matching.
    pub brackets: &'static [(char, char)],
    /// Pairs closed automatically when the opener is typed.
    pub auto_closing_pairs: &'static [(char, char)],
}

impl LanguageConfiguration {
    /// Lox configuration.
    pub const fn lox() -> Self {
        LanguageConfiguration {
            line_comment: "//",
            brackets: &[('{', '}'), ('(', ')')],
            auto_closing_pairs: &[('{', '}'), ('(', ')'), ('"', '"')],
        }
    }

    /// Closing character inserted after typing `open`, if any.
    pub fn closing_for(&self, open: char) -> Option<char> {
        self.auto_closing_pairs
            .iter()
            .find(|(o, _)| *o == open)
            .map(|(_, c)| *c)
    }

    /// Counterpart of a bracket character, in either direction.
    pub fn matching_bracket(&self, ch: char) -> Option<char> {
        self.brackets.iter().find_map(|&(open, close)| {
            if ch == open {
                Some(close)
            } else if ch == close {
                Some(open)
            } else {
                None
            }
        })
    }

    /// Whether `ch` takes part in bracket matching.
    pub fn is_bracket(&self, ch: char) -> bool {
        self.matching_bracket(ch).is_some()
    }
}

impl Default for LanguageConfiguration {
    fn default() -> Self {
        Self::lox()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_rule_lists_every_keyword() {
        let rule = LOX_RULES
            .iter()
            .find(|r| r.category == TokenCategory::Keyword)
            .unwrap();
        for keyword in KEYWORDS {
            assert!(rule.pattern.contains(keyword), "missing {}", keyword);
        }
    }

    #[test]
    fn test_operator_rule_has_no_word_operators() {
        let rule = LOX_RULES
            .iter()
            .find(|r| r.category == TokenCategory::Operator)
            .unwrap();
        assert!(!rule.pattern.contains("and"));
        assert!(!rule.pattern.contains("or"));
    }

    #[test]
    fn test_brackets() {
        let config = LanguageConfiguration::lox();
        assert_eq!(config.matching_bracket('{'), Some('}'));
        assert_eq!(config.matching_bracket(')'), Some('('));
        assert_eq!(config.matching_bracket('['), None);
        assert!(!config.is_bracket('"'));
    }

    #[test]
    fn test_auto_closing() {
        let config = LanguageConfiguration::lox();
        assert_eq!(config.closing_for('"'), Some('"'));
        assert_eq!(config.closing_for('('), Some(')'));
        assert_eq!(config.closing_for('['), None);
        assert_eq!(config.line_comment, "//");
    }
}
