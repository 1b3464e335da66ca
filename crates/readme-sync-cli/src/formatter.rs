use std::process::ExitCode;

use readme_sync::{SyncReport, WriteOutcome};

use crate::commands::CommandResult;
use crate::error::CliError;

pub enum OutputFormat {
    Text,
    Json,
}

/// Renders a `CommandResult` as text or newline-delimited JSON and maps it to an
/// exit code.
pub fn emit_result(result: CommandResult, format: OutputFormat) -> Result<ExitCode, CliError> {
    match format {
        OutputFormat::Text => print_text(&result),
        OutputFormat::Json => print_json(&result)?,
    };
    Ok(ExitCode::from(result.exit_status().code()))
}

fn print_text(result: &CommandResult) {
    match result {
        CommandResult::Synced { report } => {
            let readme = readme_name(report);
            match report.outcome {
                WriteOutcome::Created => println!("Created {readme} for {}", report.package),
                WriteOutcome::Updated => println!("Updated {readme} for {}", report.package),
                WriteOutcome::Unchanged => {
                    println!("{readme} for {} is already up to date", report.package)
                }
            }
        }
        CommandResult::Checked { report } => {
            let readme = readme_name(report);
            match report.outcome {
                WriteOutcome::Unchanged => {
                    println!("{readme} for {} is up to date", report.package)
                }
                WriteOutcome::Updated => println!(
                    "{readme} for {} is out of date; run `readme-sync sync`",
                    report.package
                ),
                WriteOutcome::Created => println!(
                    "{readme} for {} is missing; run `readme-sync sync`",
                    report.package
                ),
            }
        }
    }
}

fn print_json(result: &CommandResult) -> Result<(), CliError> {
    println!("{}", serde_json::to_string(result)?);
    Ok(())
}

fn readme_name(report: &SyncReport) -> String {
    report
        .readme
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.readme.display().to_string())
}
