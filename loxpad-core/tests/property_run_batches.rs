//! Run batch invariants.
//!
//! For any sequence of prints, optionally followed by a failure of any
//! shape, the batch holds the prints in call order followed by at most one
//! error, and message ids never repeat across runs.

use std::collections::HashSet;

use loxpad_core::{ExampleCatalog, ExecutionOrchestrator, MessageKind, Playground};
use loxpad_runtime::{RuntimeFailure, ScriptStep, ScriptedRuntime};
use proptest::prelude::*;

fn arb_failure() -> impl Strategy<Value = RuntimeFailure> {
    let text = "[ -~]{0,40}";
    prop_oneof![
        text.prop_map(RuntimeFailure::structured),
        text.prop_map(RuntimeFailure::text),
        any::<i64>().prop_map(|n| RuntimeFailure::opaque(&n)),
        Just(RuntimeFailure::unknown()),
    ]
}

fn arb_prints() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[ -~]{0,20}", 0..30)
}

fn runtime(prints: &[String], failure: Option<RuntimeFailure>) -> ScriptedRuntime {
    let mut steps: Vec<ScriptStep> = prints.iter().cloned().map(ScriptStep::Print).collect();
    if let Some(failure) = failure {
        steps.push(ScriptStep::Fail(failure));
        // Anything scheduled after a failure must never surface.
        steps.push(ScriptStep::Print("after failure".to_string()));
    }
    ScriptedRuntime::new(steps)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Prints keep call order; a successful run has no error message.
    #[test]
    fn prints_keep_order(prints in arb_prints()) {
        let mut orchestrator = ExecutionOrchestrator::new(runtime(&prints, None));
        let batch = orchestrator.execute("");

        prop_assert!(!batch.is_failure());
        prop_assert!(batch.messages().iter().all(|m| m.kind() == MessageKind::Print));
        let texts: Vec<String> = batch
            .messages()
            .iter()
            .map(|m| m.text().unwrap_or("").to_string())
            .collect();
        prop_assert_eq!(texts, prints);
    }

    /// N prints then a failure yield exactly N prints and one trailing error.
    #[test]
    fn failure_appends_exactly_one_error(prints in arb_prints(), failure in arb_failure()) {
        let mut orchestrator = ExecutionOrchestrator::new(runtime(&prints, Some(failure.clone())));
        let batch = orchestrator.execute("");
        let messages = batch.messages();

        prop_assert_eq!(messages.len(), prints.len() + 1);
        for (message, text) in messages.iter().zip(&prints) {
            prop_assert_eq!(message.kind(), MessageKind::Print);
            prop_assert_eq!(message.text(), Some(text.as_str()));
        }
        let last = messages.last().unwrap();
        prop_assert_eq!(last.kind(), MessageKind::Error);
        let diagnostic = failure.diagnostic();
        prop_assert_eq!(last.text(), Some(diagnostic.as_str()));
        if let RuntimeFailure::Opaque { .. } = failure {
            prop_assert!(!last.text().unwrap().is_empty());
        }
    }

    /// Timestamps never go backwards within a run.
    #[test]
    fn timestamps_non_decreasing(prints in arb_prints(), failure in proptest::option::of(arb_failure())) {
        let mut orchestrator = ExecutionOrchestrator::new(runtime(&prints, failure));
        let batch = orchestrator.execute("");
        for pair in batch.messages().windows(2) {
            prop_assert!(pair[0].occurred_at() <= pair[1].occurred_at());
        }
    }

    /// Ids are pairwise distinct over the whole session log.
    #[test]
    fn ids_unique_across_runs(
        prints in arb_prints(),
        failure in proptest::option::of(arb_failure()),
        runs in 1usize..6,
    ) {
        let mut playground = Playground::new(ExampleCatalog::builtin(), runtime(&prints, failure));
        for _ in 0..runs {
            playground.run();
        }
        let messages = playground.log().snapshot();
        let ids: HashSet<_> = messages.iter().map(|m| m.id()).collect();
        prop_assert_eq!(ids.len(), messages.len());
    }

    /// Running the same deterministic program twice gives the same
    /// kind/text sequence with fresh ids.
    #[test]
    fn identical_runs_match(prints in arb_prints(), failure in proptest::option::of(arb_failure())) {
        let mut orchestrator = ExecutionOrchestrator::new(runtime(&prints, failure));
        let first = orchestrator.execute("same");
        let second = orchestrator.execute("same");

        let shape = |batch: &loxpad_core::RunBatch| -> Vec<(MessageKind, Option<String>)> {
            batch
                .messages()
                .iter()
                .map(|m| (m.kind(), m.text().map(str::to_string)))
                .collect()
        };
        prop_assert_eq!(shape(&first), shape(&second));
        for (a, b) in first.messages().iter().zip(second.messages()) {
            prop_assert_ne!(a.id(), b.id());
        }
    }
}
