//! Print capability handed to a runtime for the duration of one run.

/// Append-only collector for printed output.
///
/// The sink must accept any number of calls and must never block the
/// runtime.
pub trait PrintSink {
    /// Record one printed value.
    fn print(&mut self, text: &str);
}

impl<F: FnMut(&str)> PrintSink for F {
    fn print(&mut self, text: &str) {
        self(text)
    }
}
