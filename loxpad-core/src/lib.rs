//! Loxpad Core
//!
//! Execution-and-message-capture pipeline of the Lox playground.
//!
//! # Modules
//!
//! - `message`: ordered, timestamped, uniquely identified run events
//! - `collector`: per-run buffer handed to the runtime as its print sink
//! - `orchestrator`: drives a runtime and produces one batch per run
//! - `session_log`: append-only log of every batch in the session
//! - `catalog`: named example programs
//! - `editor`: binds the syntax descriptor to an editing widget
//! - `playground`: the session tying source, runs and log together
//! - `view`: output pane rendering
//!
//! # Data flow
//!
//! ```text
//! edit ──▶ EditingSurface ──▶ SourceBuffer
//!                                  │ run
//!                                  ▼
//!          Runtime ◀── ExecutionOrchestrator ──▶ RunBatch ──▶ SessionLog
//! ```

pub mod catalog;
pub mod collector;
pub mod editor;
pub mod message;
pub mod orchestrator;
pub mod playground;
pub mod session_log;
pub mod view;

pub use catalog::{builtin_examples, Example, ExampleCatalog};
pub use collector::RunCollector;
pub use editor::{
    ChangeCallback, Edit, EditingSurface, EditorAdapter, EditorHost, EditorWidget,
    HostMountFailure, TextAreaHost,
};
pub use message::{Message, MessageId, MessageKind};
pub use orchestrator::{ExecutionOrchestrator, RunBatch, RunId};
pub use playground::{Playground, PlaygroundError, SourceBuffer};
pub use session_log::{SessionLog, SharedSessionLog};
pub use view::{render_log, render_message};
