use std::path::PathBuf;
use std::process::ExitCode;

use loxpad_core::{HostMountFailure, PlaygroundError};
use loxpad_runtime::ProbeError;
use loxpad_syntax::SyntaxError;

/// All errors produced by loxpad.
///
/// Variants are split into two categories:
/// - **Infrastructure errors** (exit code 2): missing runtime, bad config,
///   broken editor host, I/O failures
/// - **Operational errors** (exit code 1): problems the user can act on
///
/// A program that fails at run time is not an error here: its failure is
/// part of the run's output.
#[derive(thiserror::Error, Debug)]
pub enum LoxpadError {
    // ── Infrastructure errors (exit code 2) ──────────────────────────

    #[error("Runtime not found: {program}")]
    RuntimeNotFound { program: String },

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Syntax descriptor error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Editor error: {0}")]
    Mount(#[from] HostMountFailure),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Operational errors (exit code 1) ─────────────────────────────

    #[error("Unknown example: {name}")]
    UnknownExample { name: String },

    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Nothing to run: pass a file or --example")]
    NoSource,
}

impl LoxpadError {
    /// Map each error variant to its process exit code.
    ///
    /// - `2`: infrastructure error
    /// - `1`: operational failure
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_code_num())
    }

    /// Numeric form of [`exit_code`](Self::exit_code).
    pub fn exit_code_num(&self) -> u8 {
        match self {
            Self::RuntimeNotFound { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigParseError(_)
            | Self::Syntax(_)
            | Self::Mount(_)
            | Self::Io(_)
            | Self::Json(_) => 2,

            Self::UnknownExample { .. } | Self::SourceNotFound { .. } | Self::NoSource => 1,
        }
    }
}

impl From<ProbeError> for LoxpadError {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::NotFound { program } => Self::RuntimeNotFound { program },
        }
    }
}

impl From<PlaygroundError> for LoxpadError {
    fn from(err: PlaygroundError) -> Self {
        match err {
            PlaygroundError::UnknownExample { name } => Self::UnknownExample { name },
            PlaygroundError::Mount(failure) => Self::Mount(failure),
            PlaygroundError::NoEditor => {
                Self::Mount(HostMountFailure::new("editor used before mount"))
            }
        }
    }
}
