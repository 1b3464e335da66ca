use std::fmt;

use thiserror::Error;

/// High-level error type shared across readme-sync components.
#[derive(Debug, Error)]
pub enum ReadmeError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("table of contents error: {0}")]
    TocConstruction(String),
    #[error("manifest error: {0}")]
    ManifestRead(String),
    #[error("markdown error: {0}")]
    Markdown(String),
    #[error("template error: {0}")]
    Template(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ReadmeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ReadmeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl ReadmeError {
    pub fn context<T: fmt::Display>(self, ctx: T) -> Self {
        match self {
            ReadmeError::Configuration(msg) => {
                ReadmeError::Configuration(format!("{ctx}: {msg}"))
            }
            ReadmeError::TocConstruction(msg) => {
                ReadmeError::TocConstruction(format!("{ctx}: {msg}"))
            }
            ReadmeError::ManifestRead(msg) => ReadmeError::ManifestRead(format!("{ctx}: {msg}")),
            ReadmeError::Markdown(msg) => ReadmeError::Markdown(format!("{ctx}: {msg}")),
            ReadmeError::Template(msg) => ReadmeError::Template(format!("{ctx}: {msg}")),
            ReadmeError::Serialization(msg) => {
                ReadmeError::Serialization(format!("{ctx}: {msg}"))
            }
            ReadmeError::Io(err) => ReadmeError::Io(err),
        }
    }
}
