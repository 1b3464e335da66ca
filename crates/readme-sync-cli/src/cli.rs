use std::ffi::OsString;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::commands;
use crate::context::CliSession;
use crate::error::{CliError, ExitStatus};
use crate::formatter::{OutputFormat, emit_result};
use crate::util::Verbosity;

const NAME: &str = "readme-sync";

pub fn run() -> ExitCode {
    init_tracing();
    match run_cli(std::env::args()) {
        Ok(code) => code,
        Err(err) => {
            err.print();
            err.exit_code()
        }
    }
}

/// Parses CLI arguments, resolves the project, and dispatches to the requested
/// command. Returns a `sysexits`-compatible `ExitCode`.
pub fn run_cli<I, S>(args: I) -> Result<ExitCode, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let command = build_cli();
    let matches = command.try_get_matches_from(args)?;

    let verbosity = Verbosity {
        json: matches.get_flag("json"),
        verbose: matches.get_flag("verbose"),
    };
    let output = if verbosity.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let project_override = matches.get_one::<String>("project").cloned();
    let session = CliSession::bootstrap(project_override, verbosity)?;
    if session.verbosity.verbose {
        tracing::info!(
            project = %session.project.root().display(),
            manifest = %session.project.manifest().display(),
            "resolved project context"
        );
    }

    let result = dispatch(&session, &matches)?;
    emit_result(result, output)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_cli() -> Command {
    Command::new(NAME)
        .about("Keep a package README in sync with its generated sections")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("project")
                .long("project")
                .value_name("PATH")
                .global(true)
                .help("Project directory. Defaults to the nearest ancestor containing package.json."),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit newline-delimited JSON instead of human-readable text."),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log the resolved project context."),
        )
        .subcommand_required(true)
        .subcommand(commands::sync::command())
        .subcommand(commands::check::command())
}

fn dispatch(
    session: &CliSession,
    matches: &ArgMatches,
) -> Result<commands::CommandResult, CliError> {
    match matches.subcommand() {
        Some(("sync", sub)) => commands::sync::run(session, sub),
        Some(("check", sub)) => commands::check::run(session, sub),
        _ => Err(CliError::new("missing command", ExitStatus::Usage)),
    }
}
