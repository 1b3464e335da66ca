use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReadmeError;
use crate::manifest::MANIFEST_FILE;

/// Canonical paths for a package whose README is managed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Manifest location (`{root}/package.json`).
    pub fn manifest(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// Finds the nearest ancestor of `start` (inclusive) that holds a manifest.
pub fn discover(start: impl AsRef<Path>) -> Result<ProjectPaths, ReadmeError> {
    let canonical_start = normalize_start(start.as_ref())?;

    for ancestor in canonical_start.ancestors() {
        if ancestor.join(MANIFEST_FILE).is_file() {
            return Ok(ProjectPaths::new(ancestor.to_path_buf()));
        }
    }

    Err(ReadmeError::ManifestRead(format!(
        "no {MANIFEST_FILE} found from {}",
        canonical_start.display()
    )))
}

fn normalize_start(start: &Path) -> Result<PathBuf, ReadmeError> {
    let mut cursor = start.to_path_buf();

    // Walk up until a real path exists so not-yet-created paths still resolve.
    while !cursor.exists() {
        if !cursor.pop() {
            return Err(ReadmeError::ManifestRead(format!(
                "unable to find existing ancestor for {}",
                start.display()
            )));
        }
    }

    if cursor.is_file() {
        cursor = cursor.parent().map(Path::to_path_buf).ok_or_else(|| {
            ReadmeError::ManifestRead(format!(
                "file path {} has no parent directory",
                start.display()
            ))
        })?;
    }

    Ok(fs::canonicalize(cursor)?)
}
