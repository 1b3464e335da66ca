use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReadmeError;
use crate::license::LicenseRegistry;

pub const CONFIG_FILE: &str = ".readme-sync.yml";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_README: &str = "README.md";

/// Optional per-project settings read from `.readme-sync.yml`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    /// Owner -> license markdown, layered over the built-in table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub licenses: BTreeMap<String, String>,
}

impl SyncConfig {
    /// Loads the config file from `project_dir`; a missing file yields defaults.
    pub fn load(project_dir: &Path) -> Result<Self, ReadmeError> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)?;
        Self::from_yaml(&raw).map_err(|err| err.context(path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ReadmeError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SyncConfig = serde_yaml::from_str(raw)
            .map_err(|err| ReadmeError::Configuration(format!("invalid config: {err}")))?;
        if config.readme.as_deref().is_some_and(is_unsafe_file_name) {
            return Err(ReadmeError::Configuration(
                "readme must be a file name inside the project directory".into(),
            ));
        }
        Ok(config)
    }

    pub fn default_branch(&self) -> &str {
        self.default_branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    pub fn readme(&self) -> &str {
        self.readme.as_deref().unwrap_or(DEFAULT_README)
    }

    pub fn license_registry(&self) -> LicenseRegistry {
        LicenseRegistry::with_overrides(self.licenses.clone())
    }
}

fn is_unsafe_file_name(name: &str) -> bool {
    name.trim().is_empty() || name.contains('/') || name.contains('\\') || name == ".."
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let config = SyncConfig::load(temp.path()).unwrap();
        assert_eq!(config, SyncConfig::default());
        assert_eq!(config.default_branch(), "main");
        assert_eq!(config.readme(), "README.md");
    }

    #[test]
    fn parses_licenses_and_overrides() {
        let config = SyncConfig::from_yaml(
            "repo_url: https://github.com/acme/widget\ndefault_branch: trunk\nlicenses:\n  acme: |\n    ## License\n\n    MIT\n",
        )
        .unwrap();
        assert_eq!(config.default_branch(), "trunk");
        assert_eq!(config.repo_url.as_deref(), Some("https://github.com/acme/widget"));

        let registry = config.license_registry();
        assert_eq!(registry.get("acme"), Some("## License\n\nMIT\n"));
        assert!(registry.get("ipfs").is_some());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SyncConfig::from_yaml("repository: nope\n").unwrap_err();
        assert!(matches!(err, ReadmeError::Configuration(_)));
    }

    #[test]
    fn readme_outside_project_is_rejected() {
        let err = SyncConfig::from_yaml("readme: ../README.md\n").unwrap_err();
        assert!(matches!(err, ReadmeError::Configuration(_)));
    }
}
