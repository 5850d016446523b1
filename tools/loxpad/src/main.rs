use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use loxpad::cli::{Cli, Command};
use loxpad::error::LoxpadError;
use loxpad::output::{self, CommandOutput};
use loxpad::{commands, config, interactive, telemetry};
use loxpad_core::Playground;
use loxpad_runtime::ProcessRuntime;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(&cli) {
        Ok(result) => {
            if let Err(e) = output::emit(cli.output, &result) {
                let e = LoxpadError::from(e);
                output::emit_error(cli.output, e.exit_code_num(), &e.to_string());
                return e.exit_code();
            }
            if result.failed {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            output::emit_error(cli.output, e.exit_code_num(), &e.to_string());
            e.exit_code()
        }
    }
}

fn dispatch(cli: &Cli) -> Result<CommandOutput, LoxpadError> {
    let config = config::load(cli.config.as_deref())?;
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config.log_level()?
    };
    telemetry::init(level);

    match &cli.command {
        Command::Run(args) => commands::run(&config, args),
        Command::Tokenize(args) => commands::tokenize(args),
        Command::Examples => commands::examples(&config.catalog()),
        Command::Show(args) => commands::show(&config.catalog(), args),
        Command::Play => {
            let catalog = config.catalog();
            let source = config.initial_source(&catalog)?;
            let runtime = ProcessRuntime::new(config.runtime.clone());
            runtime.probe()?;

            let mut playground = Playground::with_source(catalog, runtime, source);
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            interactive::play(&mut playground, stdin.lock(), &mut stdout)?;
            Ok(CommandOutput::empty())
        }
    }
}
