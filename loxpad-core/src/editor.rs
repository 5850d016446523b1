//! Editor Adapter.
//!
//! Binds the syntax descriptor to an editing widget and forwards a plain
//! `(current text, on text changed)` contract to its owner.
//!
//! The widget side of the contract mirrors a browser code editor: the
//! widget is given an initial value and a change callback that may report
//! `None` when the widget has no text. The adapter normalizes that to an
//! empty string, so owners only ever see plain text.

use loxpad_syntax::{LanguageConfiguration, SyntaxDescriptor, TokenRule};

/// Change callback handed to a widget. `None` means "no text".
pub type ChangeCallback = Box<dyn FnMut(Option<String>)>;

/// The editor widget failed to initialize. Fatal for the page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("editor widget failed to mount: {reason}")]
pub struct HostMountFailure {
    pub reason: String,
}

impl HostMountFailure {
    pub fn new<S: Into<String>>(reason: S) -> Self {
        HostMountFailure {
            reason: reason.into(),
        }
    }
}

/// A user-visible edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Replace everything.
    SetText(String),
    /// Insert at a byte offset (clamped to the text).
    Insert { offset: usize, text: String },
    /// Append a line, adding a separating newline when needed.
    AppendLine(String),
    /// Remove everything.
    Clear,
}

/// A mounted editing widget.
pub trait EditorWidget {
    /// Current text.
    fn value(&self) -> String;

    /// Replace the text programmatically. Does not fire the change callback.
    fn set_value(&mut self, text: &str);

    /// Apply a user edit. Fires the change callback.
    fn apply(&mut self, edit: Edit);
}

/// Editor integration point.
pub trait EditorHost {
    /// Register a language before first render.
    fn configure(
        &mut self,
        language_id: &str,
        rules: &'static [TokenRule],
        config: &LanguageConfiguration,
    );

    /// Create a widget showing `value` and reporting edits to `on_change`.
    fn mount(
        &mut self,
        value: &str,
        on_change: ChangeCallback,
    ) -> Result<Box<dyn EditorWidget>, HostMountFailure>;
}

/// Mounted editor as seen by its owner.
pub struct EditingSurface {
    widget: Box<dyn EditorWidget>,
}

impl EditingSurface {
    /// Current text in the widget.
    pub fn text(&self) -> String {
        self.widget.value()
    }

    /// Apply a user edit; the owner's callback sees the new text.
    pub fn edit(&mut self, edit: Edit) {
        self.widget.apply(edit);
    }

    /// Push a new value into the widget without a change notification.
    pub fn set_text(&mut self, text: &str) {
        self.widget.set_value(text);
    }
}

/// Binds a host to a syntax descriptor.
pub struct EditorAdapter<H: EditorHost> {
    host: H,
    descriptor: &'static SyntaxDescriptor,
    configured: bool,
}

impl<H: EditorHost> EditorAdapter<H> {
    /// Create an adapter. Nothing is registered until the first mount.
    pub fn new(host: H, descriptor: &'static SyntaxDescriptor) -> Self {
        EditorAdapter {
            host,
            descriptor,
            configured: false,
        }
    }

    /// Mount an editing surface.
    ///
    /// The host is configured with the descriptor's rules on the first call
    /// only. Every edit reaches `on_text_changed` as plain text.
    pub fn mount<F>(
        &mut self,
        initial_text: &str,
        mut on_text_changed: F,
    ) -> Result<EditingSurface, HostMountFailure>
    where
        F: FnMut(String) + 'static,
    {
        if !self.configured {
            log::debug!(
                "[loxpad editor] configuring language '{}'",
                self.descriptor.language_id()
            );
            self.host.configure(
                self.descriptor.language_id(),
                self.descriptor.rules(),
                self.descriptor.config(),
            );
            self.configured = true;
        }

        let callback: ChangeCallback =
            Box::new(move |value: Option<String>| on_text_changed(value.unwrap_or_default()));
        let widget = self.host.mount(initial_text, callback)?;
        Ok(EditingSurface { widget })
    }

    /// The wrapped host.
    pub fn host(&self) -> &H {
        &self.host
    }
}

/// Language registration recorded by [`TextAreaHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredLanguage {
    pub id: String,
    pub rules: &'static [TokenRule],
    pub config: LanguageConfiguration,
}

/// In-memory editor host for terminals and tests.
#[derive(Debug, Default)]
pub struct TextAreaHost {
    languages: Vec<RegisteredLanguage>,
    mounts: usize,
    fail_mount: Option<String>,
}

impl TextAreaHost {
    /// Create a host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose mounts always fail with `reason`.
    pub fn failing<S: Into<String>>(reason: S) -> Self {
        TextAreaHost {
            fail_mount: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Languages registered so far.
    pub fn languages(&self) -> &[RegisteredLanguage] {
        &self.languages
    }

    /// Number of successful mounts.
    pub fn mounts(&self) -> usize {
        self.mounts
    }
}

impl EditorHost for TextAreaHost {
    fn configure(
        &mut self,
        language_id: &str,
        rules: &'static [TokenRule],
        config: &LanguageConfiguration,
    ) {
        self.languages.push(RegisteredLanguage {
            id: language_id.to_string(),
            rules,
            config: *config,
        });
    }

    fn mount(
        &mut self,
        value: &str,
        on_change: ChangeCallback,
    ) -> Result<Box<dyn EditorWidget>, HostMountFailure> {
        if let Some(reason) = &self.fail_mount {
            return Err(HostMountFailure::new(reason.clone()));
        }
        self.mounts += 1;
        Ok(Box::new(TextArea {
            text: value.to_string(),
            on_change,
        }))
    }
}

/// Plain text widget.
struct TextArea {
    text: String,
    on_change: ChangeCallback,
}

impl TextArea {
    fn clamp_offset(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}

impl EditorWidget for TextArea {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn apply(&mut self, edit: Edit) {
        match edit {
            Edit::SetText(text) => self.text = text,
            Edit::Insert { offset, text } => {
                let offset = self.clamp_offset(offset);
                self.text.insert_str(offset, &text);
            }
            Edit::AppendLine(line) => {
                if !self.text.is_empty() && !self.text.ends_with('\n') {
                    self.text.push('\n');
                }
                self.text.push_str(&line);
                self.text.push('\n');
            }
            Edit::Clear => self.text.clear(),
        }

        let reported = if self.text.is_empty() {
            None
        } else {
            Some(self.text.clone())
        };
        (self.on_change)(reported);
    }
}
