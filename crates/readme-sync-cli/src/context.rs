use std::env;
use std::path::PathBuf;

use readme_sync::{ProjectPaths, discover_project};

use crate::error::CliError;
use crate::util::Verbosity;

pub struct CliSession {
    pub project: ProjectPaths,
    pub verbosity: Verbosity,
}

impl CliSession {
    pub fn bootstrap(
        project_override: Option<String>,
        verbosity: Verbosity,
    ) -> Result<Self, CliError> {
        let start = match project_override {
            Some(path) => PathBuf::from(path),
            None => env::current_dir()?,
        };
        let project = discover_project(start)?;
        Ok(Self { project, verbosity })
    }
}
