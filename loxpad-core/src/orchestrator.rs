//! Execution Orchestrator.
//!
//! Drives a [`Runtime`] over a program and turns what it prints, and how it
//! ends, into one ordered batch of messages:
//!
//! 1. Open a fresh [`RunCollector`] for this run only
//! 2. Hand the collector to the runtime as its print sink
//! 3. On failure, append exactly one error message after the prints
//! 4. Return the whole batch; the caller appends it to the session log in
//!    one step
//!
//! Failures never escape `execute`: every shape of [`RuntimeFailure`] maps
//! to an error message, and a runtime that panics is recorded as an
//! [`RuntimeFailure::Opaque`] failure after whatever it printed first.

use core::fmt;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use loxpad_runtime::{Runtime, RuntimeFailure};
use serde::Serialize;

use crate::collector::RunCollector;
use crate::message::{Message, MessageKind};

/// Sequence number of a run within one orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// Ordered output of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunBatch {
    run: RunId,
    messages: Vec<Message>,
}

impl RunBatch {
    /// Run this batch came from.
    pub fn run(&self) -> RunId {
        self.run
    }

    /// Messages, in emission order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Take the messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Whether the run ended in a failure.
    pub fn is_failure(&self) -> bool {
        self.messages
            .last()
            .map_or(false, |m| m.kind() == MessageKind::Error)
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the run produced nothing.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Runs programs and captures their output.
pub struct ExecutionOrchestrator<R: Runtime> {
    runtime: R,
    next_run: u64,
}

impl<R: Runtime> ExecutionOrchestrator<R> {
    /// Create an orchestrator around `runtime`.
    pub fn new(runtime: R) -> Self {
        ExecutionOrchestrator {
            runtime,
            next_run: 1,
        }
    }

    /// The wrapped runtime.
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Mutable access to the wrapped runtime.
    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    /// Execute `source` and return its batch.
    ///
    /// Returns only after the runtime has finished, so the batch is always
    /// complete.
    pub fn execute(&mut self, source: &str) -> RunBatch {
        let run = RunId(self.next_run);
        self.next_run += 1;

        log::debug!("[loxpad run] {} starting ({} bytes)", run, source.len());

        let mut collector = RunCollector::new();
        let runtime = &mut self.runtime;
        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| runtime.run(source, &mut collector)))
                .unwrap_or_else(|payload| Err(failure_from_panic(payload)));
        if let Err(failure) = outcome {
            log::info!("[loxpad run] {} failed ({}): {}", run, failure.shape(), failure);
            collector.fail(&failure);
        }

        let messages = collector.into_messages();
        log::debug!("[loxpad run] {} finished with {} messages", run, messages.len());

        RunBatch { run, messages }
    }
}

/// Opaque failure for a panic, keeping its message when it carried one.
fn failure_from_panic(payload: Box<dyn Any + Send>) -> RuntimeFailure {
    let repr = match payload.downcast::<String>() {
        Ok(message) => Some(*message),
        Err(payload) => payload.downcast_ref::<&str>().map(|s| s.to_string()),
    };
    log::warn!("[loxpad run] runtime panicked: {:?}", repr);
    RuntimeFailure::Opaque { repr }
}
