//! `appgen`: turns a catalog of stream applications into one Maven project
//! per entry.
//!
//! The process exits with `0` on success, `1` on an internal failure, `2`
//! for bad usage, `3` when the catalog or a named entry is missing, `4` for
//! configuration problems and `5` when only some entries were generated.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // A missing .env is not an error.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(usage) => {
            // help and version requests also land here, on stdout
            let _ = usage.print();
            return if usage.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Dropping the guard flushes the log file, so it lives until main returns.
    let _log_guard = match init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("appgen: logging unavailable: {e:#}");
            return ExitCode::from(1);
        }
    };
    debug!(args = ?cli.global, "Arguments parsed");

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Settings rejected");
            eprintln!("appgen: cannot load settings: {e:#}");
            return ExitCode::from(4);
        }
    };

    let verbose = cli.global.verbose > 0;
    let output = OutputManager::new(&cli.global, &config);

    match run(cli.command, config, output) {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => report_failure(&err, verbose),
    }
}

#[instrument(skip_all)]
fn run(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    use commands::{completions, config as settings, generate, init, list, show};

    match command {
        Commands::Generate(args) => generate::execute(args, config, output),
        Commands::List(args) => list::execute(args, config, output),
        Commands::Show(args) => show::execute(args, config, output),
        Commands::Init(args) => init::execute(args, output),
        Commands::Completions(args) => completions::execute(args),
        Commands::Config(sub) => settings::execute(sub, config, output),
    }
}

/// Errors always go to stderr so a redirected report stays parseable.
fn report_failure(err: &CliError, verbose: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, std::io::stderr().is_terminal()));
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_and_author_come_from_the_manifest() {
        let command = Cli::command();
        assert_eq!(command.get_version(), Some(env!("CARGO_PKG_VERSION")));
        assert!(command.get_author().is_some());
    }
}
