//! One-shot subcommands.

use std::path::Path;

use loxpad_core::{render_log, Example, ExampleCatalog, Playground, RunBatch};
use loxpad_runtime::{ProcessRuntime, Runtime};
use loxpad_syntax::SyntaxDescriptor;
use serde::Serialize;

use crate::cli::{RunArgs, ShowArgs, TokenizeArgs};
use crate::config::LoxpadConfig;
use crate::error::LoxpadError;
use crate::output::CommandOutput;

/// Read a program file, mapping a missing file to an operational error.
pub fn read_source(path: &Path) -> Result<String, LoxpadError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoxpadError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => LoxpadError::Io(e),
    })
}

/// Program text selected by `run` arguments.
pub fn resolve_source(args: &RunArgs, catalog: &ExampleCatalog) -> Result<String, LoxpadError> {
    match (&args.file, &args.example) {
        (Some(path), _) => read_source(path),
        (None, Some(name)) => catalog
            .get(name)
            .map(|example| example.code.clone())
            .ok_or_else(|| LoxpadError::UnknownExample { name: name.clone() }),
        (None, None) => Err(LoxpadError::NoSource),
    }
}

/// `loxpad run` against the configured interpreter.
pub fn run(config: &LoxpadConfig, args: &RunArgs) -> Result<CommandOutput, LoxpadError> {
    let catalog = config.catalog();
    let source = resolve_source(args, &catalog)?;

    let runtime = ProcessRuntime::new(config.runtime.clone());
    let program = runtime.probe()?;
    log::debug!("[loxpad run] using runtime at {}", program.display());

    run_source(catalog, runtime, source)
}

/// Run `source` once on `runtime` and report the batch.
pub fn run_source<R: Runtime>(
    catalog: ExampleCatalog,
    runtime: R,
    source: String,
) -> Result<CommandOutput, LoxpadError> {
    let mut playground = Playground::with_source(catalog, runtime, source);
    let batch = playground.run();
    batch_output(&batch)
}

/// Output for one run. A failed run sets the failure flag.
pub fn batch_output(batch: &RunBatch) -> Result<CommandOutput, LoxpadError> {
    let output = CommandOutput::new(batch, render_log(batch.messages()))?;
    Ok(output.failed(batch.is_failure()))
}

#[derive(Debug, Serialize)]
struct TokenRow<'a> {
    category: &'static str,
    line: usize,
    column: usize,
    lexeme: &'a str,
}

/// `loxpad tokenize`.
pub fn tokenize(args: &TokenizeArgs) -> Result<CommandOutput, LoxpadError> {
    let source = read_source(&args.file)?;
    tokenize_source(&source)
}

/// Classify `source` with the Lox descriptor, leaving out whitespace.
pub fn tokenize_source(source: &str) -> Result<CommandOutput, LoxpadError> {
    let descriptor = SyntaxDescriptor::lox()?;
    let rows: Vec<TokenRow<'_>> = descriptor
        .classify(source)
        .into_iter()
        .filter(|token| !token.is_trivia())
        .map(|token| TokenRow {
            category: token.category.as_str(),
            line: token.span.line,
            column: token.span.column,
            lexeme: token.lexeme(source),
        })
        .collect();

    let human = rows
        .iter()
        .map(|row| format!("{} {}:{} {}", row.category, row.line, row.column, row.lexeme))
        .collect();
    Ok(CommandOutput::new(&rows, human)?)
}

/// `loxpad examples`.
pub fn examples(catalog: &ExampleCatalog) -> Result<CommandOutput, LoxpadError> {
    let names: Vec<&str> = catalog.names().collect();
    let human = names.iter().map(|name| name.to_string()).collect();
    Ok(CommandOutput::new(&names, human)?)
}

/// `loxpad show`.
pub fn show(catalog: &ExampleCatalog, args: &ShowArgs) -> Result<CommandOutput, LoxpadError> {
    let example: &Example = catalog
        .get(&args.name)
        .ok_or_else(|| LoxpadError::UnknownExample {
            name: args.name.clone(),
        })?;
    let human = example.code.lines().map(str::to_string).collect();
    Ok(CommandOutput::new(example, human)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loxpad_runtime::{RuntimeFailure, ScriptedRuntime};
    use std::path::PathBuf;

    #[test]
    fn run_source_success() {
        let output = run_source(
            ExampleCatalog::builtin(),
            ScriptedRuntime::default().print("1").print("2"),
            "print 1; print 2;".to_string(),
        )
        .unwrap();
        assert!(!output.failed);
        assert_eq!(output.human.len(), 2);
        assert!(output.human[0].ends_with("  1"));
        assert_eq!(output.json["messages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn run_source_failure_sets_flag() {
        let output = run_source(
            ExampleCatalog::builtin(),
            ScriptedRuntime::default().fail(RuntimeFailure::structured("Undefined variable 'x'.")),
            "print x;".to_string(),
        )
        .unwrap();
        assert!(output.failed);
        assert!(output.human[0].ends_with("error: Undefined variable 'x'."));
    }

    #[test]
    fn resolve_example_source() {
        let catalog = ExampleCatalog::builtin();
        let args = RunArgs {
            file: None,
            example: Some("Fibonacci".to_string()),
        };
        assert_eq!(
            resolve_source(&args, &catalog).unwrap(),
            catalog.get("Fibonacci").unwrap().code
        );
    }

    #[test]
    fn resolve_errors() {
        let catalog = ExampleCatalog::builtin();
        let none = RunArgs {
            file: None,
            example: None,
        };
        assert!(matches!(resolve_source(&none, &catalog), Err(LoxpadError::NoSource)));

        let unknown = RunArgs {
            file: None,
            example: Some("Nope".to_string()),
        };
        assert!(matches!(
            resolve_source(&unknown, &catalog),
            Err(LoxpadError::UnknownExample { .. })
        ));

        let missing = RunArgs {
            file: Some(PathBuf::from("/nonexistent/loxpad/prog.lox")),
            example: None,
        };
        let err = resolve_source(&missing, &catalog).unwrap_err();
        assert!(matches!(err, LoxpadError::SourceNotFound { .. }));
        assert_eq!(err.exit_code_num(), 1);
    }

    #[test]
    fn tokenize_skips_whitespace() {
        let output = tokenize_source("var x = 1;\nprint x;").unwrap();
        assert_eq!(output.human[0], "keyword 1:1 var");
        assert_eq!(output.human[1], "identifier 1:5 x");
        assert!(output.human.iter().all(|line| !line.starts_with("whitespace")));
        assert!(output.human.contains(&"keyword 2:1 print".to_string()));
        assert_eq!(output.json[0]["category"], "keyword");
        assert_eq!(output.json[0]["lexeme"], "var");
    }

    #[test]
    fn tokenize_marks_unterminated_string() {
        let output = tokenize_source("print \"oops").unwrap();
        assert_eq!(output.human.last().unwrap(), "invalid 1:7 \"oops");
    }

    #[test]
    fn examples_lists_names_in_order() {
        let output = examples(&ExampleCatalog::builtin()).unwrap();
        assert_eq!(output.human[0], "Hello World");
        assert_eq!(output.json[1], "Fibonacci");
    }

    #[test]
    fn show_unknown_example() {
        let args = ShowArgs {
            name: "Nope".to_string(),
        };
        assert!(matches!(
            show(&ExampleCatalog::builtin(), &args),
            Err(LoxpadError::UnknownExample { .. })
        ));
    }

    #[test]
    fn show_known_example() {
        let args = ShowArgs {
            name: "Hello World".to_string(),
        };
        let output = show(&ExampleCatalog::builtin(), &args).unwrap();
        assert_eq!(output.json["name"], "Hello World");
        assert!(!output.human.is_empty());
    }
}
