use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;

use crate::error::ReadmeError;

/// What a conditional write did.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    Created,
    Updated,
    Unchanged,
}

impl WriteOutcome {
    pub fn changed(self) -> bool {
        !matches!(self, WriteOutcome::Unchanged)
    }
}

/// Reads a text file, treating a missing file as empty.
pub fn read_or_empty(path: &Path) -> Result<Option<String>, ReadmeError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ReadmeError::Io(err)),
    }
}

/// Writes `contents` to `dir/name` unless the file already holds exactly that text.
pub fn ensure_file_has_contents(
    dir: &Path,
    name: &str,
    contents: &str,
) -> Result<WriteOutcome, ReadmeError> {
    let path = dir.join(name);
    let outcome = match read_or_empty(&path)? {
        Some(existing) if existing == contents => return Ok(WriteOutcome::Unchanged),
        Some(_) => WriteOutcome::Updated,
        None => WriteOutcome::Created,
    };

    fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), ?outcome, "wrote file");
    Ok(outcome)
}
