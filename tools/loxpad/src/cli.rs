use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Terminal playground for the Lox scripting language.
#[derive(Parser, Debug)]
#[command(name = "loxpad", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format for all subcommands.
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub output: OutputFormat,

    /// Config file (defaults to ./loxpad.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a program once and print its output.
    Run(RunArgs),

    /// Show how the editor classifies a file.
    Tokenize(TokenizeArgs),

    /// List the example programs.
    Examples,

    /// Print an example's code.
    Show(ShowArgs),

    /// Interactive session: type code, then `:run`.
    Play,
}

// ── run ──────────────────────────────────────────────────────────────

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Program file.
    #[arg(conflicts_with = "example")]
    pub file: Option<PathBuf>,

    /// Run a catalog example instead of a file.
    #[arg(long)]
    pub example: Option<String>,
}

// ── tokenize ─────────────────────────────────────────────────────────

#[derive(clap::Args, Debug)]
pub struct TokenizeArgs {
    /// Program file.
    pub file: PathBuf,
}

// ── show ─────────────────────────────────────────────────────────────

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Example name.
    pub name: String,
}
