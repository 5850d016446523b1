//! Loxpad Runtime Boundary
//!
//! The playground never looks inside the language runtime. It depends on a
//! single call contract:
//!
//! - `run(source, sink)`: execute a program, writing printed values into
//!   the [`PrintSink`] capability handed in by the caller
//! - a failure channel: the call returns a tagged [`RuntimeFailure`]
//!
//! # Modules
//!
//! - `sink`: the append-only print capability
//! - `failure`: the three failure shapes a runtime can raise
//! - `process`: adapter that drives an external interpreter process
//! - `scripted`: replays a fixed sequence of events, for tests and demos

pub mod failure;
pub mod process;
pub mod scripted;
pub mod sink;

pub use failure::{RuntimeFailure, OPAQUE_DIAGNOSTIC};
pub use process::{ProbeError, ProcessConfig, ProcessRuntime, FILE_PLACEHOLDER};
pub use scripted::{ScriptStep, ScriptedRuntime};
pub use sink::PrintSink;

/// A language runtime.
///
/// Implementations call [`PrintSink::print`] zero or more times, in program
/// order, and return once the program has finished, successfully or not.
/// Output written before a failure is kept by the caller.
pub trait Runtime {
    /// Execute `source`.
    fn run(&mut self, source: &str, sink: &mut dyn PrintSink) -> Result<(), RuntimeFailure>;
}

impl<F> Runtime for F
where
    F: FnMut(&str, &mut dyn PrintSink) -> Result<(), RuntimeFailure>,
{
    fn run(&mut self, source: &str, sink: &mut dyn PrintSink) -> Result<(), RuntimeFailure> {
        self(source, sink)
    }
}
