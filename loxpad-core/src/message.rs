//! Session messages.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Next message id. Shared by every session in the process.
static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque message identifier.
///
/// Allocated from a process-wide counter, so ids are never reused while the
/// process lives, across runs and across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct MessageId(u64);

impl MessageId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        MessageId(NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

impl From<MessageId> for String {
    fn from(id: MessageId) -> Self {
        id.to_string()
    }
}

/// Message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Value printed by the program.
    Print,
    /// Runtime failure that ended the run.
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Print => "print",
            Self::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// One observable event of a run. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    id: MessageId,
    kind: MessageKind,
    text: Option<String>,
    occurred_at: DateTime<Utc>,
}

impl Message {
    /// Create a message with a fresh id.
    pub fn new(kind: MessageKind, text: Option<String>, occurred_at: DateTime<Utc>) -> Self {
        Message {
            id: MessageId::next(),
            kind,
            text,
            occurred_at,
        }
    }

    /// Create a print message stamped now.
    pub fn print<S: Into<String>>(text: S) -> Self {
        Self::new(MessageKind::Print, Some(text.into()), Utc::now())
    }

    /// Create an error message stamped now.
    pub fn error<S: Into<String>>(text: S) -> Self {
        Self::new(MessageKind::Error, Some(text.into()), Utc::now())
    }

    /// Identifier.
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Kind.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Payload, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Time the event was recorded.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Whether this is an error message.
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}
