//! Playground session: source buffer, example selection and runs.
//!
//! Single-threaded, in the manner of a UI thread. The session log is the
//! only state shared beyond it, and it serializes its own appends.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use loxpad_runtime::Runtime;
use loxpad_syntax::SyntaxDescriptor;

use crate::catalog::{Example, ExampleCatalog};
use crate::editor::{Edit, EditingSurface, EditorAdapter, EditorHost, HostMountFailure};
use crate::orchestrator::{ExecutionOrchestrator, RunBatch};
use crate::session_log::SharedSessionLog;

/// Playground errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaygroundError {
    #[error("unknown example: {name}")]
    UnknownExample { name: String },

    #[error("no editor mounted")]
    NoEditor,

    #[error(transparent)]
    Mount(#[from] HostMountFailure),
}

/// Handle to the current program text.
///
/// Clones share the same text. Written by the editor's change callback and
/// by example selection; read by runs.
#[derive(Debug, Clone, Default)]
pub struct SourceBuffer {
    text: Rc<RefCell<String>>,
    revision: Rc<Cell<u64>>,
}

impl SourceBuffer {
    /// Create a buffer holding `text`.
    pub fn new<S: Into<String>>(text: S) -> Self {
        SourceBuffer {
            text: Rc::new(RefCell::new(text.into())),
            revision: Rc::new(Cell::new(0)),
        }
    }

    /// Copy of the current text.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Replace the text wholesale.
    pub fn replace(&self, text: String) {
        *self.text.borrow_mut() = text;
        self.revision.set(self.revision.get() + 1);
    }

    /// Number of replacements so far.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }
}

/// One playground session.
pub struct Playground<R: Runtime> {
    catalog: ExampleCatalog,
    source: SourceBuffer,
    orchestrator: ExecutionOrchestrator<R>,
    log: SharedSessionLog,
    surface: Option<EditingSurface>,
    runs: u64,
}

impl<R: Runtime> Playground<R> {
    /// Start a session with the catalog's default example as source.
    pub fn new(catalog: ExampleCatalog, runtime: R) -> Self {
        let initial = catalog
            .default_entry()
            .map(|example| example.code.clone())
            .unwrap_or_default();
        Self::with_source(catalog, runtime, initial)
    }

    /// Start a session with explicit initial source.
    pub fn with_source<S: Into<String>>(catalog: ExampleCatalog, runtime: R, source: S) -> Self {
        Playground {
            catalog,
            source: SourceBuffer::new(source),
            orchestrator: ExecutionOrchestrator::new(runtime),
            log: SharedSessionLog::new(),
            surface: None,
            runs: 0,
        }
    }

    /// Mount the editor, wiring its edits into the source buffer.
    pub fn mount_editor<H: EditorHost>(
        &mut self,
        adapter: &mut EditorAdapter<H>,
    ) -> Result<(), PlaygroundError> {
        let buffer = self.source.clone();
        let surface = adapter.mount(&self.source.text(), move |text| buffer.replace(text))?;
        self.surface = Some(surface);
        Ok(())
    }

    /// Mount the editor on a fresh adapter over `host`.
    pub fn mount_host<H: EditorHost>(
        &mut self,
        host: H,
        descriptor: &'static SyntaxDescriptor,
    ) -> Result<EditorAdapter<H>, PlaygroundError> {
        let mut adapter = EditorAdapter::new(host, descriptor);
        self.mount_editor(&mut adapter)?;
        Ok(adapter)
    }

    /// Apply a user edit through the mounted editor.
    pub fn edit(&mut self, edit: Edit) -> Result<(), PlaygroundError> {
        let surface = self.surface.as_mut().ok_or(PlaygroundError::NoEditor)?;
        surface.edit(edit);
        Ok(())
    }

    /// Current program text.
    pub fn source(&self) -> String {
        self.source.text()
    }

    /// Handle to the source buffer.
    pub fn source_buffer(&self) -> &SourceBuffer {
        &self.source
    }

    /// Replace the source with an example's code.
    ///
    /// Unsaved edits are discarded. The session log is not touched.
    pub fn select_example(&mut self, name: &str) -> Result<&Example, PlaygroundError> {
        let example = self
            .catalog
            .get(name)
            .ok_or_else(|| PlaygroundError::UnknownExample {
                name: name.to_string(),
            })?;

        log::debug!("[loxpad session] selected example '{}'", example.name);
        self.source.replace(example.code.clone());
        if let Some(surface) = self.surface.as_mut() {
            surface.set_text(&example.code);
        }
        Ok(example)
    }

    /// Run the current source and append its batch to the log.
    pub fn run(&mut self) -> RunBatch {
        let source = self.source.text();
        let batch = self.orchestrator.execute(&source);
        self.log.append(batch.clone());
        self.runs += 1;
        batch
    }

    /// The session log.
    pub fn log(&self) -> &SharedSessionLog {
        &self.log
    }

    /// Example catalog.
    pub fn catalog(&self) -> &ExampleCatalog {
        &self.catalog
    }

    /// The orchestrator.
    pub fn orchestrator(&self) -> &ExecutionOrchestrator<R> {
        &self.orchestrator
    }

    /// Whether an editor is mounted.
    pub fn has_editor(&self) -> bool {
        self.surface.is_some()
    }

    /// Counter bumped by every observable change: source edits,
    /// example selections and runs. Views re-render when it moves.
    pub fn revision(&self) -> u64 {
        self.source.revision() + self.runs
    }
}
