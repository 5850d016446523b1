//! Runtime that replays a fixed event sequence, ignoring its source.

use crate::failure::RuntimeFailure;
use crate::sink::PrintSink;
use crate::Runtime;

/// One replayed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// Print a value.
    Print(String),
    /// Raise a failure and stop.
    Fail(RuntimeFailure),
}

/// Deterministic runtime driven by a step list.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRuntime {
    steps: Vec<ScriptStep>,
    runs: usize,
    last_source: Option<String>,
}

impl ScriptedRuntime {
    /// Create a runtime that replays `steps` on every run.
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        ScriptedRuntime {
            steps,
            runs: 0,
            last_source: None,
        }
    }

    /// Append a print step.
    pub fn print<S: Into<String>>(mut self, text: S) -> Self {
        self.steps.push(ScriptStep::Print(text.into()));
        self
    }

    /// Append a failure step.
    pub fn fail(mut self, failure: RuntimeFailure) -> Self {
        self.steps.push(ScriptStep::Fail(failure));
        self
    }

    /// Number of completed `run` calls.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Source text passed to the most recent run.
    pub fn last_source(&self) -> Option<&str> {
        self.last_source.as_deref()
    }
}

impl Runtime for ScriptedRuntime {
    fn run(&mut self, source: &str, sink: &mut dyn PrintSink) -> Result<(), RuntimeFailure> {
        self.runs += 1;
        self.last_source = Some(source.to_string());
        for step in &self.steps {
            match step {
                ScriptStep::Print(text) => sink.print(text),
                ScriptStep::Fail(failure) => return Err(failure.clone()),
            }
        }
        Ok(())
    }
}
