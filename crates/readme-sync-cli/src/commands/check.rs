use clap::{ArgMatches, Command};
use readme_sync::{SyncRequest, sync_readme};

use crate::commands::CommandResult;
use crate::context::CliSession;
use crate::error::CliError;
use crate::util;

pub fn command() -> Command {
    util::with_repository_args(
        Command::new("check").about("Fail if the README is not up to date; never writes"),
    )
}

pub fn run(session: &CliSession, matches: &ArgMatches) -> Result<CommandResult, CliError> {
    let (repo_url, default_branch) = util::repository_args(matches);
    let report = sync_readme(&SyncRequest {
        start: session.project.root().to_path_buf(),
        repo_url,
        default_branch,
        check_only: true,
    })?;
    Ok(CommandResult::Checked { report })
}
