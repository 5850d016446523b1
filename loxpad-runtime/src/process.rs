//! External interpreter adapter.
//!
//! Runs a command-line interpreter as a child process. Each line the child
//! writes to stdout becomes one print, delivered as soon as it is read.
//! stderr is drained on a separate thread and inspected only once the child
//! has exited:
//!
//! - exit status zero: success
//! - non-zero with a JSON object carrying a `message` field on the last
//!   stderr line: [`RuntimeFailure::Structured`]
//! - non-zero with other stderr output: [`RuntimeFailure::Text`]
//! - non-zero with silent stderr, or killed by a signal:
//!   [`RuntimeFailure::Opaque`]
//!
//! The protocol is line based: one `print` of a string that contains a
//! newline arrives as several prints.

use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::failure::RuntimeFailure;
use crate::sink::PrintSink;
use crate::Runtime;

/// Argument replaced by the path of a file holding the program source.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// How to launch the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// Program name or path.
    pub program: String,
    /// Arguments; [`FILE_PLACEHOLDER`] marks where the source file goes.
    pub args: Vec<String>,
}

impl ProcessConfig {
    /// Create a config.
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        ProcessConfig {
            program: program.into(),
            args,
        }
    }

    /// Whether the source is passed as a file rather than on stdin.
    pub fn uses_source_file(&self) -> bool {
        self.args.iter().any(|arg| arg == FILE_PLACEHOLDER)
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        ProcessConfig::new("lox", vec!["run".to_string(), FILE_PLACEHOLDER.to_string()])
    }
}

/// Start-up check failures.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("runtime program not found: {program}")]
    NotFound { program: String },
}

/// Structured error report a runtime may write as its last stderr line.
#[derive(Debug, Deserialize)]
struct ErrorReport {
    message: String,
    #[serde(default)]
    name: Option<String>,
}

/// Runtime backed by an external interpreter process.
///
/// Prints are stdout lines, so a printed value spanning `n` lines is
/// recorded as `n` print messages.
#[derive(Debug, Clone)]
pub struct ProcessRuntime {
    config: ProcessConfig,
}

impl ProcessRuntime {
    /// Create a process runtime.
    pub fn new(config: ProcessConfig) -> Self {
        ProcessRuntime { config }
    }

    /// Launch configuration.
    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Resolve the configured program.
    ///
    /// A program containing a path separator must exist as given; a bare
    /// name is looked up on `PATH`.
    pub fn probe(&self) -> Result<PathBuf, ProbeError> {
        let program = Path::new(&self.config.program);
        let not_found = || ProbeError::NotFound {
            program: self.config.program.clone(),
        };

        if program.components().count() > 1 || program.is_absolute() {
            return if program.is_file() {
                Ok(program.to_path_buf())
            } else {
                Err(not_found())
            };
        }

        let path = std::env::var_os("PATH").ok_or_else(not_found)?;
        std::env::split_paths(&path)
            .map(|dir| dir.join(program))
            .find(|candidate| candidate.is_file())
            .ok_or_else(not_found)
    }

    /// Spawn the child, stream its stdout into `sink`, and wait for it.
    fn run_child(
        &self,
        source: &str,
        sink: &mut dyn PrintSink,
    ) -> Result<(ExitStatus, String), RuntimeFailure> {
        let launch_failure = |e: std::io::Error| {
            RuntimeFailure::text(format!(
                "failed to launch runtime '{}': {}",
                self.config.program, e
            ))
        };

        // Kept alive until the child has exited.
        let source_file = if self.config.uses_source_file() {
            Some(write_source_file(source).map_err(launch_failure)?)
        } else {
            None
        };

        let args: Vec<&std::ffi::OsStr> = self
            .config
            .args
            .iter()
            .map(|arg| match &source_file {
                Some(file) if arg == FILE_PLACEHOLDER => file.path().as_os_str(),
                _ => std::ffi::OsStr::new(arg.as_str()),
            })
            .collect();

        log::debug!(
            "[loxpad runtime] spawning {} {:?}",
            self.config.program,
            args
        );

        let mut child = Command::new(&self.config.program)
            .args(&args)
            .stdin(if source_file.is_some() {
                Stdio::null()
            } else {
                Stdio::piped()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(launch_failure)?;

        let stdin_writer = child.stdin.take().map(|mut stdin| {
            let source = source.to_string();
            thread::spawn(move || {
                // A child that exits without reading closes the pipe early.
                if let Err(e) = stdin.write_all(source.as_bytes()) {
                    log::debug!("[loxpad runtime] stdin closed early: {}", e);
                }
            })
        });

        let stderr_reader = child
            .stderr
            .take()
            .map(|stderr| thread::spawn(move || drain_stderr(stderr)));

        if let Some(stdout) = child.stdout.take() {
            forward_lines(BufReader::new(stdout), sink);
        }

        let status = child.wait().map_err(|e| {
            RuntimeFailure::text(format!(
                "lost track of runtime '{}': {}",
                self.config.program, e
            ))
        })?;

        if let Some(writer) = stdin_writer {
            let _ = writer.join();
        }
        let stderr = stderr_reader
            .and_then(|reader| reader.join().ok())
            .unwrap_or_default();

        Ok((status, stderr))
    }
}

impl Runtime for ProcessRuntime {
    fn run(&mut self, source: &str, sink: &mut dyn PrintSink) -> Result<(), RuntimeFailure> {
        let (status, stderr) = self.run_child(source, sink)?;
        log::debug!("[loxpad runtime] child exited: {}", status);

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(failure_from_exit(code, &stderr)),
            None => Err(RuntimeFailure::Opaque {
                repr: Some(status.to_string()),
            }),
        }
    }
}

/// Write `source` to a fresh temporary `.lox` file.
fn write_source_file(source: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("loxpad-")
        .suffix(".lox")
        .tempfile()?;
    file.write_all(source.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Read all of `reader`, keeping what arrived before a read error.
fn drain_stderr<R: Read>(mut reader: R) -> String {
    let mut buf = Vec::new();
    if let Err(e) = reader.read_to_end(&mut buf) {
        log::warn!(
            "[loxpad runtime] stderr read stopped after {} bytes: {}",
            buf.len(),
            e
        );
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Forward each line of `reader` to `sink`, without its line terminator.
fn forward_lines<R: BufRead>(mut reader: R, sink: &mut dyn PrintSink) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if buf.ends_with(b"\n") {
                    buf.pop();
                    if buf.ends_with(b"\r") {
                        buf.pop();
                    }
                }
                sink.print(&String::from_utf8_lossy(&buf));
            }
            Err(e) => {
                log::warn!("[loxpad runtime] stopped reading output: {}", e);
                break;
            }
        }
    }
}

/// Classify a non-zero exit by what the child left on stderr.
pub fn failure_from_exit(code: i32, stderr: &str) -> RuntimeFailure {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        return RuntimeFailure::Opaque {
            repr: Some(format!("exit code {}", code)),
        };
    }

    let last_line = trimmed.lines().rev().find(|line| !line.trim().is_empty());
    if let Some(report) =
        last_line.and_then(|line| serde_json::from_str::<ErrorReport>(line.trim()).ok())
    {
        return RuntimeFailure::Structured {
            name: report.name,
            message: report.message,
        };
    }

    RuntimeFailure::Text(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_file() {
        let config = ProcessConfig::default();
        assert_eq!(config.program, "lox");
        assert!(config.uses_source_file());
        assert!(!ProcessConfig::new("lox", vec![]).uses_source_file());
    }

    #[test]
    fn test_failure_from_exit_text() {
        let failure = failure_from_exit(65, "[line 1] Error: Unterminated string.\n");
        assert_eq!(
            failure,
            RuntimeFailure::text("[line 1] Error: Unterminated string.")
        );
    }

    #[test]
    fn test_failure_from_exit_structured() {
        let stderr = "warming up\n{\"name\":\"RuntimeError\",\"message\":\"Undefined variable 'x'.\"}\n";
        let failure = failure_from_exit(70, stderr);
        assert_eq!(
            failure,
            RuntimeFailure::structured_named("RuntimeError", "Undefined variable 'x'.")
        );
    }

    #[test]
    fn test_failure_from_exit_json_without_message_is_text() {
        let failure = failure_from_exit(1, "{\"code\": 3}");
        assert_eq!(failure, RuntimeFailure::text("{\"code\": 3}"));
    }

    #[test]
    fn test_failure_from_exit_silent_is_opaque() {
        let failure = failure_from_exit(3, "  \n");
        assert_eq!(
            failure,
            RuntimeFailure::Opaque {
                repr: Some("exit code 3".to_string())
            }
        );
    }

    #[test]
    fn test_forward_lines_strips_terminators() {
        let mut lines = Vec::new();
        let input: &[u8] = b"one\r\ntwo\n\nthree";
        forward_lines(input, &mut |text: &str| lines.push(text.to_string()));
        assert_eq!(lines, vec!["one", "two", "", "three"]);
    }

    /// Yields `data` once, then fails.
    struct BrokenPipe {
        data: Option<&'static [u8]>,
    }

    impl Read for BrokenPipe {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.data.take() {
                Some(data) => {
                    buf[..data.len()].copy_from_slice(data);
                    Ok(data.len())
                }
                None => Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone")),
            }
        }
    }

    #[test]
    fn test_drain_stderr_keeps_partial_output() {
        let stderr = drain_stderr(BrokenPipe {
            data: Some(b"Undefined variable"),
        });
        assert_eq!(stderr, "Undefined variable");
        assert_eq!(
            failure_from_exit(70, &stderr),
            RuntimeFailure::text("Undefined variable")
        );
    }

    #[test]
    fn test_probe_missing_program() {
        let runtime = ProcessRuntime::new(ProcessConfig::new(
            "/definitely/not/here/lox",
            vec![],
        ));
        assert!(matches!(runtime.probe(), Err(ProbeError::NotFound { .. })));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        fn sh() -> ProcessRuntime {
            ProcessRuntime::new(ProcessConfig::new(
                "sh",
                vec![FILE_PLACEHOLDER.to_string()],
            ))
        }

        fn run(runtime: &mut ProcessRuntime, source: &str) -> (Vec<String>, Result<(), RuntimeFailure>) {
            let mut lines = Vec::new();
            let result = runtime.run(source, &mut |text: &str| lines.push(text.to_string()));
            (lines, result)
        }

        #[test]
        fn test_probe_finds_sh() {
            assert!(sh().probe().is_ok());
        }

        #[test]
        fn test_prints_in_order() {
            let (lines, result) = run(&mut sh(), "echo one\necho two\necho three\n");
            assert_eq!(result, Ok(()));
            assert_eq!(lines, vec!["one", "two", "three"]);
        }

        #[test]
        fn test_multiline_output_is_split_per_line() {
            let (lines, result) = run(&mut sh(), "printf 'a\\nb\\n'\n");
            assert_eq!(result, Ok(()));
            assert_eq!(lines, vec!["a", "b"]);
        }

        #[test]
        fn test_text_failure_after_prints() {
            let (lines, result) = run(
                &mut sh(),
                "echo before\necho 'stack overflow' >&2\nexit 70\n",
            );
            assert_eq!(lines, vec!["before"]);
            assert_eq!(result, Err(RuntimeFailure::text("stack overflow")));
        }

        #[test]
        fn test_structured_failure() {
            let (lines, result) = run(
                &mut sh(),
                "echo '{\"message\":\"Undefined variable '\\''x'\\''.\"}' >&2\nexit 70\n",
            );
            assert!(lines.is_empty());
            assert_eq!(
                result,
                Err(RuntimeFailure::structured("Undefined variable 'x'."))
            );
        }

        #[test]
        fn test_signal_is_opaque() {
            let (_, result) = run(&mut sh(), "kill -9 $$\n");
            match result {
                Err(RuntimeFailure::Opaque { repr: Some(_) }) => {}
                other => panic!("expected opaque failure, got {:?}", other),
            }
        }

        #[test]
        fn test_source_on_stdin() {
            let mut runtime = ProcessRuntime::new(ProcessConfig::new("cat", vec![]));
            let (lines, result) = run(&mut runtime, "print \"hi\";\n");
            assert_eq!(result, Ok(()));
            assert_eq!(lines, vec!["print \"hi\";"]);
        }

        #[test]
        fn test_launch_failure_is_text() {
            let mut runtime = ProcessRuntime::new(ProcessConfig::new(
                "/definitely/not/here/lox",
                vec![],
            ));
            let (lines, result) = run(&mut runtime, "");
            assert!(lines.is_empty());
            match result {
                Err(RuntimeFailure::Text(text)) => {
                    assert!(text.starts_with("failed to launch runtime"))
                }
                other => panic!("expected text failure, got {:?}", other),
            }
        }
    }
}
