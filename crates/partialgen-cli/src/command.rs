use crate::error::CliError;
use clap::{Args, Subcommand};
use partialgen_build::{DirSink, Generator, ManifestScanner, MemorySink, RunReport, Scanner};
use partialgen_config::Config;
use partialgen_core::{diagnostic::Diagnostic, engine::generate_with};
use std::path::PathBuf;

///
/// Command
///

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate partial types and write them to the output directory.
    Generate(GenerateArgs),

    /// Resolve every type and report diagnostics without writing anything.
    Check(ManifestArgs),

    /// Print the synthesized output type (or its text) for one type.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct ManifestArgs {
    /// JSON manifest of type descriptors.
    pub manifest: PathBuf,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: ManifestArgs,

    /// Overrides `output.dir` from the config file.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: ManifestArgs,

    /// Source type, by name or namespace-qualified path.
    #[arg(long = "type", value_name = "TYPE")]
    pub type_name: String,

    /// Print the rendered text instead of the JSON descriptor.
    #[arg(long)]
    pub text: bool,
}

impl Command {
    pub fn run(self, mut config: Config) -> Result<(), CliError> {
        match self {
            Self::Generate(args) => {
                if let Some(dir) = args.out_dir {
                    config.output.dir = dir;
                }

                let mut sink = DirSink::from_config(&config.output);
                let report = Generator::from_config(&config)
                    .run(&ManifestScanner::new(args.input.manifest), &mut sink)?;
                print_diagnostics(sink.diagnostics());
                println!("{}", summary(&report));

                finish(&report)
            }

            Self::Check(args) => {
                let mut sink = MemorySink::new();
                let report = Generator::from_config(&config)
                    .run(&ManifestScanner::new(args.manifest), &mut sink)?;
                print_diagnostics(&sink.diagnostics);
                println!("{}", summary(&report));

                finish(&report)
            }

            Self::Inspect(args) => inspect(&config, &args),
        }
    }
}

fn inspect(config: &Config, args: &InspectArgs) -> Result<(), CliError> {
    let sources = ManifestScanner::new(&args.input.manifest).discover()?;
    let source = sources
        .iter()
        .find(|s| s.path() == args.type_name || s.name == args.type_name)
        .ok_or_else(|| CliError::TypeNotFound(args.type_name.clone()))?;

    let options = Generator::from_config(config).options;
    let generated = match generate_with(source, &options) {
        Ok(Some(generated)) => generated,
        Ok(None) => return Err(CliError::NotPartial(source.path())),
        Err(err) => {
            print_diagnostics(&[Diagnostic::from_error(source, &err)]);
            return Err(CliError::Diagnostics { count: 1 });
        }
    };

    if args.text {
        print!("{}", generated.text);
    } else {
        println!("{}", serde_json::to_string_pretty(&generated.output)?);
    }

    Ok(())
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
}

fn summary(report: &RunReport) -> String {
    format!(
        "{} type(s): {} written, {} unchanged, {} skipped, {} failed",
        report.types, report.written, report.unchanged, report.skipped, report.failed
    )
}

const fn finish(report: &RunReport) -> Result<(), CliError> {
    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::Diagnostics {
            count: report.failed,
        })
    }
}

///
/// TESTS
///
