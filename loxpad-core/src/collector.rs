//! Per-run output buffer.

use chrono::{DateTime, Utc};
use loxpad_runtime::{PrintSink, RuntimeFailure};

use crate::message::{Message, MessageKind};

/// Buffer for the messages of a single run.
///
/// Handed to the runtime as its [`PrintSink`]. Records prints in call
/// order; once [`fail`](RunCollector::fail) has been called the collector
/// is sealed and nothing more is recorded.
#[derive(Debug, Default)]
pub struct RunCollector {
    messages: Vec<Message>,
    last_stamp: Option<DateTime<Utc>>,
    sealed: bool,
}

impl RunCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the terminal failure of this run.
    ///
    /// Only the first call has an effect.
    pub fn fail(&mut self, failure: &RuntimeFailure) {
        if self.sealed {
            log::debug!("[loxpad run] ignoring failure after seal: {}", failure);
            return;
        }
        self.push(MessageKind::Error, Some(failure.diagnostic()));
        self.sealed = true;
    }

    /// Whether a failure has been recorded.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Messages recorded so far.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Take the recorded messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    fn push(&mut self, kind: MessageKind, text: Option<String>) {
        let stamp = self.stamp();
        self.messages.push(Message::new(kind, text, stamp));
    }

    /// Wall-clock now, clamped so stamps never go backwards within a run.
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

impl PrintSink for RunCollector {
    fn print(&mut self, text: &str) {
        if self.sealed {
            log::debug!("[loxpad run] ignoring print after failure");
            return;
        }
        self.push(MessageKind::Print, Some(text.to_string()));
    }
}
