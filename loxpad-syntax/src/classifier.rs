//! Data-driven classifier over an ordered rule table.

use std::sync::OnceLock;

use regex::Regex;

use crate::rules::{LanguageConfiguration, TokenRule, LANGUAGE_ID, LOX_RULES};
use crate::token::{Span, Token, TokenCategory};

/// Errors raised while compiling a rule table.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SyntaxError {
    #[error("invalid {category} pattern '{pattern}': {source}")]
    InvalidPattern {
        category: TokenCategory,
        pattern: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// A compiled rule.
#[derive(Debug, Clone)]
struct CompiledRule {
    category: TokenCategory,
    regex: Regex,
}

/// Compiled syntax descriptor for one language.
///
/// Holds the source rule table (handed verbatim to editor hosts) alongside
/// its compiled form.
#[derive(Debug, Clone)]
pub struct SyntaxDescriptor {
    language_id: &'static str,
    rules: &'static [TokenRule],
    compiled: Vec<CompiledRule>,
    config: LanguageConfiguration,
}

impl SyntaxDescriptor {
    /// Compile a rule table.
    pub fn new(
        language_id: &'static str,
        rules: &'static [TokenRule],
        config: LanguageConfiguration,
    ) -> Result<Self, SyntaxError> {
        let compiled = rules
            .iter()
            .map(|rule| {
                // Anchor at the scan position.
                Regex::new(&format!("^(?:{})", rule.pattern))
                    .map(|regex| CompiledRule {
                        category: rule.category,
                        regex,
                    })
                    .map_err(|source| SyntaxError::InvalidPattern {
                        category: rule.category,
                        pattern: rule.pattern,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SyntaxDescriptor {
            language_id,
            rules,
            compiled,
            config,
        })
    }

    /// Process-wide Lox descriptor, compiled on first use.
    pub fn lox() -> Result<&'static SyntaxDescriptor, SyntaxError> {
        static LOX: OnceLock<Result<SyntaxDescriptor, SyntaxError>> = OnceLock::new();
        LOX.get_or_init(|| {
            SyntaxDescriptor::new(LANGUAGE_ID, LOX_RULES, LanguageConfiguration::lox())
        })
        .as_ref()
        .map_err(Clone::clone)
    }

    /// Language identifier.
    pub fn language_id(&self) -> &'static str {
        self.language_id
    }

    /// Rule table, in evaluation order.
    pub fn rules(&self) -> &'static [TokenRule] {
        self.rules
    }

    /// Bracket and comment metadata.
    pub fn config(&self) -> &LanguageConfiguration {
        &self.config
    }

    /// Classify `text` into a gap-free sequence of tokens.
    ///
    /// At each position the rules are tried in order and the first match
    /// wins. Characters no rule claims become single-character
    /// [`TokenCategory::Other`] tokens, so the concatenated lexemes always
    /// reproduce `text`.
    pub fn classify(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pos = 0;
        let mut line = 1;
        let mut column = 1;

        while pos < text.len() {
            let rest = &text[pos..];
            let (category, len) = self.match_at(rest);
            let lexeme = &rest[..len];

            tokens.push(Token::new(
                category,
                Span::new(pos, pos + len, line, column),
            ));

            for ch in lexeme.chars() {
                if ch == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }
            pos += len;
        }

        tokens
    }

    /// First matching rule at the start of `rest`, with the match length.
    fn match_at(&self, rest: &str) -> (TokenCategory, usize) {
        for rule in &self.compiled {
            if let Some(m) = rule.regex.find(rest) {
                if !m.is_empty() {
                    return (rule.category, m.end());
                }
            }
        }
        let len = rest.chars().next().map_or(1, char::len_utf8);
        (TokenCategory::Other, len)
    }
}
