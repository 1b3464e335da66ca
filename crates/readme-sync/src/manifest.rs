use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReadmeError;

pub const MANIFEST_FILE: &str = "package.json";

/// Package fields the generated sections are derived from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub repository: Option<Repository>,
}

/// `repository` may be a bare URL or an object carrying one.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Repository {
    Url(String),
    Detailed {
        url: String,
        #[serde(default, rename = "type")]
        kind: Option<String>,
    },
}

impl PackageMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            description: None,
            repository: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description collapsed to a single line; `None` when blank.
    pub fn summary(&self) -> Option<String> {
        let description = self.description.as_deref()?;
        let collapsed = description.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        }
    }

    pub fn repository_url(&self) -> Option<&str> {
        match self.repository.as_ref()? {
            Repository::Url(url) => Some(url.as_str()),
            Repository::Detailed { url, .. } => Some(url.as_str()),
        }
    }
}

/// Reads `package.json` from the project directory.
pub fn read_manifest(project_dir: &Path) -> Result<PackageMetadata, ReadmeError> {
    let path = project_dir.join(MANIFEST_FILE);
    let raw = fs::read_to_string(&path).map_err(|err| {
        ReadmeError::ManifestRead(format!("failed to read {}: {err}", path.display()))
    })?;
    parse_manifest(&raw).map_err(|err| err.context(path.display()))
}

pub fn parse_manifest(raw: &str) -> Result<PackageMetadata, ReadmeError> {
    let meta: PackageMetadata = serde_json::from_str(raw)
        .map_err(|err| ReadmeError::ManifestRead(format!("invalid manifest: {err}")))?;
    if meta.name.trim().is_empty() {
        return Err(ReadmeError::ManifestRead(
            "manifest name must not be empty".into(),
        ));
    }
    Ok(meta)
}

/// Repository owner, name and default branch used for badge links and license lookup.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub name: String,
    pub default_branch: String,
}

impl RepoCoordinates {
    /// Takes the last two `/`-separated segments of `repo_url` as owner and name.
    pub fn from_url(repo_url: &str, default_branch: &str) -> Result<Self, ReadmeError> {
        let trimmed = repo_url.trim().trim_end_matches('/');
        let mut segments = trimmed.rsplit('/');
        let name = segments.next().map(|name| name.trim_end_matches(".git"));
        let owner = segments.next();

        match (owner, name) {
            (Some(owner), Some(name))
                if !owner.is_empty() && !name.is_empty() && !owner.ends_with(':') =>
            {
                if default_branch.trim().is_empty() {
                    return Err(ReadmeError::Configuration(
                        "default branch must not be empty".into(),
                    ));
                }
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                    default_branch: default_branch.trim().to_string(),
                })
            }
            _ => Err(ReadmeError::Configuration(format!(
                "could not parse repo owner & name from {repo_url}"
            ))),
        }
    }
}
