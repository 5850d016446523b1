//! Configuration loading.
//!
//! Reads `loxpad.toml`. Every section and field is optional:
//!
//! ```toml
//! [runtime]
//! program = "lox"
//! args = ["run", "{file}"]
//!
//! [session]
//! initial_example = "Fibonacci"
//!
//! [logging]
//! level = "info"
//!
//! [[examples]]
//! name = "Countdown"
//! code = "for (var i = 3; i > 0; i = i - 1) print i;"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use loxpad_core::{Example, ExampleCatalog};
use loxpad_runtime::ProcessConfig;
use serde::{Deserialize, Serialize};

use crate::error::LoxpadError;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "loxpad.toml";

// ── Data models ──────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoxpadConfig {
    pub runtime: ProcessConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    pub examples: Vec<Example>,
}

/// Session settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Example loaded at start-up instead of the catalog's first entry.
    pub initial_example: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

impl LoxpadConfig {
    /// Log level filter.
    pub fn log_level(&self) -> Result<LevelFilter, LoxpadError> {
        LevelFilter::from_str(self.logging.level.trim()).map_err(|_| {
            LoxpadError::ConfigParseError(format!(
                "invalid logging level '{}'",
                self.logging.level
            ))
        })
    }

    /// Built-in examples plus configured ones.
    pub fn catalog(&self) -> ExampleCatalog {
        let mut catalog = ExampleCatalog::builtin();
        catalog.extend(self.examples.iter().cloned());
        catalog
    }

    /// Source the session starts with.
    pub fn initial_source(&self, catalog: &ExampleCatalog) -> Result<String, LoxpadError> {
        let example = match &self.session.initial_example {
            Some(name) => Some(catalog.get(name).ok_or_else(|| {
                LoxpadError::UnknownExample { name: name.clone() }
            })?),
            None => catalog.default_entry(),
        };
        Ok(example.map(|e| e.code.clone()).unwrap_or_default())
    }
}

// ── Parsing ──────────────────────────────────────────────────────────

/// Load configuration.
///
/// - An explicit `path` must exist.
/// - Without one, [`DEFAULT_CONFIG_FILE`] is used if present, defaults
///   otherwise.
pub fn load(path: Option<&Path>) -> Result<LoxpadConfig, LoxpadError> {
    match path {
        Some(path) => read_config(path),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                read_config(&default_path)
            } else {
                Ok(LoxpadConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<LoxpadConfig, LoxpadError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoxpadError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoxpadError::Io(e)
        }
    })?;
    parse_config_str(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config_str(content: &str) -> Result<LoxpadConfig, LoxpadError> {
    let config: LoxpadConfig = toml::from_str(content)
        .map_err(|e| LoxpadError::ConfigParseError(format!("invalid TOML: {e}")))?;
    config.log_level()?;
    Ok(config)
}
