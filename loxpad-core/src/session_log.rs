//! Append-only session log.

use std::sync::Arc;

use spin::Mutex;

use crate::message::Message;
use crate::orchestrator::RunBatch;

/// Ordered messages of every run in a session.
///
/// Only whole batches are appended. Nothing is ever removed, reordered or
/// deduplicated.
#[derive(Debug, Default)]
pub struct SessionLog {
    messages: Vec<Message>,
    batches: usize,
}

impl SessionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run's batch in one step.
    pub fn append(&mut self, batch: RunBatch) {
        self.messages.extend(batch.into_messages());
        self.batches += 1;
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages appended after the first `offset`.
    pub fn since(&self, offset: usize) -> &[Message] {
        self.messages.get(offset..).unwrap_or(&[])
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of batches appended.
    pub fn batches(&self) -> usize {
        self.batches
    }
}

/// Session log shared between threads.
///
/// Appends are serialized by the lock, so batches from concurrent runs
/// never interleave.
#[derive(Debug, Clone, Default)]
pub struct SharedSessionLog {
    inner: Arc<Mutex<SessionLog>>,
}

impl SharedSessionLog {
    /// Create an empty shared log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch under the lock.
    pub fn append(&self, batch: RunBatch) {
        self.inner.lock().append(batch);
    }

    /// Copy of all messages.
    pub fn snapshot(&self) -> Vec<Message> {
        self.inner.lock().messages().to_vec()
    }

    /// Copy of the messages after the first `offset`.
    pub fn snapshot_since(&self, offset: usize) -> Vec<Message> {
        self.inner.lock().since(offset).to_vec()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::ExecutionOrchestrator;
    use loxpad_runtime::{RuntimeFailure, ScriptedRuntime};

    fn batch(runtime: ScriptedRuntime) -> RunBatch {
        ExecutionOrchestrator::new(runtime).execute("")
    }

    #[test]
    fn test_append_keeps_batch_order() {
        let mut log = SessionLog::new();
        log.append(batch(ScriptedRuntime::default().print("a").print("b")));
        log.append(batch(
            ScriptedRuntime::default().fail(RuntimeFailure::text("c")),
        ));

        let texts: Vec<_> = log.messages().iter().filter_map(|m| m.text()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(log.batches(), 2);
        assert_eq!(log.since(2).len(), 1);
        assert!(log.since(10).is_empty());
    }

    #[test]
    fn test_shared_snapshot_since_returns_new_messages() {
        let log = SharedSessionLog::new();
        log.append(batch(ScriptedRuntime::default().print("old")));
        let seen = log.len();
        log.append(batch(ScriptedRuntime::default().print("new")));

        let fresh = log.snapshot_since(seen);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].text(), Some("new"));
        assert!(log.snapshot_since(log.len()).is_empty());
    }

    #[test]
    fn test_empty_batch_counts() {
        let mut log = SessionLog::new();
        log.append(batch(ScriptedRuntime::default()));
        assert!(log.is_empty());
        assert_eq!(log.batches(), 1);
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let log = SharedSessionLog::new();
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let log = log.clone();
                std::thread::spawn(move || {
                    let mut runtime = ScriptedRuntime::default();
                    for i in 0..25 {
                        runtime = runtime.print(format!("{}-{}", worker, i));
                    }
                    log.append(batch(runtime));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let messages = log.snapshot();
        assert_eq!(messages.len(), 100);
        for chunk in messages.chunks(25) {
            let worker = chunk[0].text().unwrap().split('-').next().unwrap();
            for (i, message) in chunk.iter().enumerate() {
                assert_eq!(message.text().unwrap(), format!("{}-{}", worker, i));
            }
        }
    }
}
