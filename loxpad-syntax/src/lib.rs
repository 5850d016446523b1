//! Loxpad Syntax Descriptor
//!
//! Declarative lexical description of Lox for the playground editor.
//!
//! # Architecture
//!
//! - `rules`: the ordered `(pattern, category)` table, keyword list and
//!   bracket/comment configuration, as plain data
//! - `classifier`: compiles the table once and classifies text with it
//! - `token`: token and span definitions
//!
//! The descriptor has no runtime state: classification is a pure function
//! of the input text and is independent of any editor widget API.
//!
//! # Usage
//!
//! ```ignore
//! use loxpad_syntax::{SyntaxDescriptor, TokenCategory};
//!
//! let lox = SyntaxDescriptor::lox()?;
//! let tokens = lox.classify("print \"hi\";");
//! assert_eq!(tokens[0].category, TokenCategory::Keyword);
//! ```

pub mod classifier;
pub mod rules;
pub mod token;

pub use classifier::{SyntaxDescriptor, SyntaxError};
pub use rules::{LanguageConfiguration, TokenRule, KEYWORDS, LANGUAGE_ID, LOX_RULES};
pub use token::{Span, Token, TokenCategory};
