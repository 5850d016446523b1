use serde::Serialize;
use std::fmt;

/// Output format selection for all subcommands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Single JSON value on stdout.
    Json,
    /// Human-readable lines on stdout.
    #[default]
    Human,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Human => write!(f, "human"),
        }
    }
}

/// Result of a subcommand, in both output forms.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// Machine-readable form.
    pub json: serde_json::Value,
    /// Human-readable lines.
    pub human: Vec<String>,
    /// Whether the command should exit with status 1 (a failed run).
    pub failed: bool,
}

impl CommandOutput {
    /// Build an output from a serializable value and its human lines.
    pub fn new<T: Serialize>(value: &T, human: Vec<String>) -> Result<Self, serde_json::Error> {
        Ok(CommandOutput {
            json: serde_json::to_value(value)?,
            human,
            failed: false,
        })
    }

    /// Output with nothing to show.
    pub fn empty() -> Self {
        CommandOutput {
            json: serde_json::Value::Null,
            human: Vec::new(),
            failed: false,
        }
    }

    /// Mark the output as a failed run.
    pub fn failed(mut self, failed: bool) -> Self {
        self.failed = failed;
        self
    }

    /// Render for `format`.
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => serde_json::to_string(&self.json),
            OutputFormat::Human => Ok(self.human.join("\n")),
        }
    }
}

/// Write a successful result to stdout.
pub fn emit(format: OutputFormat, output: &CommandOutput) -> Result<(), std::io::Error> {
    let nothing = match format {
        OutputFormat::Json => output.json.is_null(),
        OutputFormat::Human => output.human.is_empty(),
    };
    if nothing {
        return Ok(());
    }
    let rendered = output
        .render(format)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    println!("{rendered}");
    Ok(())
}

/// Write an error to stdout (JSON mode) or stderr (human mode).
///
/// `exit_code_num` is the raw numeric exit code (1 or 2).
pub fn emit_error(format: OutputFormat, exit_code_num: u8, message: &str) {
    match format {
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "error": message,
                "exit_code": exit_code_num,
            });
            // JSON errors go to stdout so the caller always gets valid JSON on stdout.
            println!("{}", serde_json::to_string(&obj).unwrap_or_else(|_| {
                format!("{{\"error\":\"{message}\"}}")
            }));
        }
        OutputFormat::Human => {
            eprintln!("error: {message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_render_is_valid_json() {
        let output = CommandOutput::new(&serde_json::json!({"count": 2}), vec!["two".into()]).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&output.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(parsed["count"], 2);
    }

    #[test]
    fn human_render_joins_lines() {
        let output = CommandOutput::new(&(), vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(output.render(OutputFormat::Human).unwrap(), "a\nb");
    }

    #[test]
    fn output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Human.to_string(), "human");
    }

    #[test]
    fn output_format_default_is_human() {
        assert_eq!(OutputFormat::default(), OutputFormat::Human);
    }

    #[test]
    fn failed_flag() {
        assert!(!CommandOutput::empty().failed);
        assert!(CommandOutput::empty().failed(true).failed);
    }
}
