use std::fmt;
use std::process::ExitCode;

use clap::error::ErrorKind as ClapErrorKind;
use readme_sync::ReadmeError;

/// Process exit status, numbered after `sysexits.h` so CI scripts can tell a stale
/// README apart from a broken project setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Usage = 64,
    /// The README (or the markdown it was built from) is not what it should be.
    InvalidInput = 65,
    /// No `package.json` could be found or read.
    NoProject = 66,
    Internal = 70,
    Io = 74,
    Config = 78,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// A failed invocation: what to print on stderr and how to exit.
#[derive(Debug)]
pub struct CliError {
    message: String,
    status: ExitStatus,
}

impl CliError {
    pub fn new(message: impl Into<String>, status: ExitStatus) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Exit without printing anything further, e.g. after clap wrote help text.
    fn quiet(status: ExitStatus) -> Self {
        Self::new(String::new(), status)
    }

    pub fn status(&self) -> ExitStatus {
        self.status
    }

    pub fn exit_code(&self) -> ExitCode {
        self.status.into()
    }

    pub fn print(&self) {
        if !self.message.is_empty() {
            eprintln!("readme-sync: {}", self.message);
        }
    }
}

impl From<ReadmeError> for CliError {
    fn from(err: ReadmeError) -> Self {
        let status = match &err {
            ReadmeError::ManifestRead(_) => ExitStatus::NoProject,
            ReadmeError::Configuration(_) => ExitStatus::Config,
            ReadmeError::TocConstruction(_) | ReadmeError::Markdown(_) => ExitStatus::InvalidInput,
            ReadmeError::Template(_) | ReadmeError::Serialization(_) => ExitStatus::Internal,
            ReadmeError::Io(_) => ExitStatus::Io,
        };
        Self::new(err.to_string(), status)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => match err.print() {
                Ok(()) => Self::quiet(ExitStatus::Success),
                Err(io) => io.into(),
            },
            _ => Self::new(err.to_string().trim_end(), ExitStatus::Usage),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("i/o failure: {err}"), ExitStatus::Io)
    }
}

/// Only the JSON report writer produces these; a report that cannot be encoded is
/// a bug rather than bad input.
impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("could not encode report: {err}"), ExitStatus::Internal)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}
