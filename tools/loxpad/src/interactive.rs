//! Line-oriented playground session.
//!
//! Lines that start with `:` are commands; anything else is appended to the
//! program through the editor.

use std::io::{BufRead, Write};

use loxpad_core::{render_log, Edit, Playground, TextAreaHost};
use loxpad_runtime::Runtime;
use loxpad_syntax::SyntaxDescriptor;

use crate::error::LoxpadError;

const HELP: &str = "commands: :run :example NAME :examples :source :log :clear :quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Run,
    Example(&'a str),
    Examples,
    Source,
    Log,
    Clear,
    Help,
    Quit,
    Unknown(&'a str),
    Code(&'a str),
}

impl<'a> Input<'a> {
    /// Parse one line of input.
    pub fn parse(line: &'a str) -> Self {
        let Some(command) = line.trim().strip_prefix(':') else {
            return Input::Code(line);
        };
        let (name, rest) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };
        match name {
            "run" | "r" => Input::Run,
            "example" | "e" if !rest.is_empty() => Input::Example(rest),
            "examples" => Input::Examples,
            "source" | "s" => Input::Source,
            "log" => Input::Log,
            "clear" => Input::Clear,
            "help" | "h" => Input::Help,
            "quit" | "q" => Input::Quit,
            _ => Input::Unknown(command),
        }
    }
}

/// Drive `playground` from `input` until `:quit` or end of input.
pub fn play<R, I, W>(playground: &mut Playground<R>, input: I, output: &mut W) -> Result<(), LoxpadError>
where
    R: Runtime,
    I: BufRead,
    W: Write,
{
    let descriptor = SyntaxDescriptor::lox()?;
    let adapter = playground.mount_host(TextAreaHost::new(), descriptor)?;
    log::debug!(
        "[loxpad play] editor mounted, {} language(s) registered",
        adapter.host().languages().len()
    );
    writeln!(output, "{HELP}")?;

    // Log entries already written to `output`.
    let mut shown = playground.log().len();

    for line in input.lines() {
        let line = line?;
        match Input::parse(&line) {
            Input::Run => {
                let batch = playground.run();
                log::debug!("[loxpad play] {} produced {} message(s)", batch.run(), batch.len());
                for rendered in render_log(&playground.log().snapshot_since(shown)) {
                    writeln!(output, "{rendered}")?;
                }
                shown = playground.log().len();
            }
            Input::Example(name) => match playground.select_example(name) {
                Ok(example) => writeln!(output, "loaded {}", example.name)?,
                Err(e) => writeln!(output, "error: {e}")?,
            },
            Input::Examples => {
                for name in playground.catalog().names() {
                    writeln!(output, "{name}")?;
                }
            }
            Input::Source => write_source(output, &playground.source())?,
            Input::Log => {
                for rendered in render_log(&playground.log().snapshot()) {
                    writeln!(output, "{rendered}")?;
                }
            }
            Input::Clear => playground.edit(Edit::Clear)?,
            Input::Help => writeln!(output, "{HELP}")?,
            Input::Quit => break,
            Input::Unknown(command) => writeln!(output, "error: unknown command ':{command}'")?,
            Input::Code(code) => playground.edit(Edit::AppendLine(code.to_string()))?,
        }
    }

    output.flush()?;
    Ok(())
}

fn write_source<W: Write>(output: &mut W, source: &str) -> std::io::Result<()> {
    output.write_all(source.as_bytes())?;
    if !source.is_empty() && !source.ends_with('\n') {
        writeln!(output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(Input::parse(":run"), Input::Run);
        assert_eq!(Input::parse("  :q"), Input::Quit);
        assert_eq!(Input::parse(":example Hello World"), Input::Example("Hello World"));
        assert_eq!(Input::parse(":examples"), Input::Examples);
        assert_eq!(Input::parse(":example"), Input::Unknown("example"));
        assert_eq!(Input::parse(":frob x"), Input::Unknown("frob x"));
    }

    #[test]
    fn parse_code() {
        assert_eq!(Input::parse("print 1;"), Input::Code("print 1;"));
        assert_eq!(Input::parse(""), Input::Code(""));
    }
}
