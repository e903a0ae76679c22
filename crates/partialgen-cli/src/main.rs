mod command;
mod error;

use clap::Parser;
use command::Command;
use error::CliError;
use partialgen_config::{CONFIG_FILE_NAME, Config};
use std::{path::PathBuf, process::ExitCode};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(name = "partialgen", version, about = "Generate partial types from type manifests")]
struct Cli {
    /// Configuration file; missing files fall back to defaults.
    #[arg(
        long,
        short = 'c',
        global = true,
        env = "PARTIALGEN_CONFIG",
        default_value = CONFIG_FILE_NAME
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_tracing()?;

    let config = Config::load(&cli.config)?;
    tracing::debug!(path = %cli.config.display(), "config loaded");

    cli.command.run(config)
}

// logs go to stderr so stdout stays clean for inspect output
fn init_tracing() -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_LOG_FILTER)
            .map_err(|err| CliError::Logging(err.to_string()))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommands_parse() {
        let cli = Cli::try_parse_from([
            "partialgen",
            "inspect",
            "types.json",
            "--type",
            "Acme.Person",
            "--text",
        ])
        .expect("inspect should parse");

        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE_NAME));
        assert!(matches!(
            cli.command,
            Command::Inspect(ref args) if args.text && args.type_name == "Acme.Person"
        ));
    }
}
