//! Runtime failure shapes.

use core::fmt;

use serde::Serialize;

/// Diagnostic recorded for a failure whose shape is not recognised.
pub const OPAQUE_DIAGNOSTIC: &str = "Runtime raised an unrecognized error";

/// A failure raised by a runtime.
///
/// The three shapes are distinguished by the runtime boundary itself, so
/// mapping a failure to display text is exhaustive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", content = "detail", rename_all = "lowercase")]
pub enum RuntimeFailure {
    /// Error value carrying a message field.
    Structured {
        /// Error class, if the runtime reports one.
        name: Option<String>,
        /// Human-readable message.
        message: String,
    },
    /// Bare text raised as the failure itself.
    Text(String),
    /// Anything else.
    Opaque {
        /// Best-effort representation of the raised value.
        repr: Option<String>,
    },
}

impl RuntimeFailure {
    /// Create a structured failure.
    pub fn structured<S: Into<String>>(message: S) -> Self {
        RuntimeFailure::Structured {
            name: None,
            message: message.into(),
        }
    }

    /// Create a structured failure with an error class name.
    pub fn structured_named<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        RuntimeFailure::Structured {
            name: Some(name.into()),
            message: message.into(),
        }
    }

    /// Create a text failure.
    pub fn text<S: Into<String>>(text: S) -> Self {
        RuntimeFailure::Text(text.into())
    }

    /// Create an opaque failure from an arbitrary value.
    pub fn opaque<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        let repr = format!("{:?}", value);
        RuntimeFailure::Opaque {
            repr: if repr.is_empty() { None } else { Some(repr) },
        }
    }

    /// Create an opaque failure with nothing to show.
    pub fn unknown() -> Self {
        RuntimeFailure::Opaque { repr: None }
    }

    /// Shape name.
    pub fn shape(&self) -> &'static str {
        match self {
            RuntimeFailure::Structured { .. } => "structured",
            RuntimeFailure::Text(_) => "text",
            RuntimeFailure::Opaque { .. } => "opaque",
        }
    }

    /// Text recorded in the session log for this failure.
    ///
    /// Structured failures yield their message and text failures yield the
    /// text verbatim. Opaque failures yield a generic diagnostic, never an
    /// empty string.
    pub fn diagnostic(&self) -> String {
        match self {
            RuntimeFailure::Structured { message, .. } => message.clone(),
            RuntimeFailure::Text(text) => text.clone(),
            RuntimeFailure::Opaque { repr: Some(repr) } => {
                format!("{}: {}", OPAQUE_DIAGNOSTIC, repr)
            }
            RuntimeFailure::Opaque { repr: None } => OPAQUE_DIAGNOSTIC.to_string(),
        }
    }
}

impl fmt::Display for RuntimeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeFailure::Structured {
                name: Some(name),
                message,
            } => write!(f, "{}: {}", name, message),
            _ => f.write_str(&self.diagnostic()),
        }
    }
}

impl std::error::Error for RuntimeFailure {}

impl From<String> for RuntimeFailure {
    fn from(text: String) -> Self {
        RuntimeFailure::Text(text)
    }
}

impl From<&str> for RuntimeFailure {
    fn from(text: &str) -> Self {
        RuntimeFailure::Text(text.to_string())
    }
}
