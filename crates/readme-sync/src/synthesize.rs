use std::path::PathBuf;

use serde::Serialize;

use crate::assemble::{assemble, assemble_preliminary};
use crate::classify::classify;
use crate::config::SyncConfig;
use crate::document::Document;
use crate::error::ReadmeError;
use crate::generate::SectionGenerator;
use crate::license::LicenseRegistry;
use crate::manifest::{PackageMetadata, RepoCoordinates, read_manifest};
use crate::persistence::{WriteOutcome, ensure_file_has_contents, read_or_empty};
use crate::project::discover;
use crate::toc::{build_toc, render_toc};

/// Everything a synthesis run depends on besides the existing README text.
#[derive(Clone, Copy, Debug)]
pub struct SynthesisInputs<'a> {
    pub meta: &'a PackageMetadata,
    pub coords: &'a RepoCoordinates,
    pub licenses: &'a LicenseRegistry,
}

/// Normalizes line endings and replaces non-breaking spaces, which otherwise stop
/// `#` from being recognised as a heading marker.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\u{a0}', " ")
}

/// Rebuilds the README document from its current text.
pub fn synthesize(existing: &str, inputs: &SynthesisInputs<'_>) -> Result<Document, ReadmeError> {
    let parsed = Document::parse(&normalize(existing))?;
    let body = classify(&parsed);
    tracing::debug!(
        existing_blocks = parsed.len(),
        preserved_blocks = body.len(),
        "classified existing README"
    );

    let generator = SectionGenerator::new(inputs.licenses)?;
    let header = generator.generate_header(inputs.meta, inputs.coords)?;
    let install = generator.generate_install(inputs.meta)?;
    let license = generator.generate_license(&inputs.coords.owner)?;

    let preliminary = assemble_preliminary(&install, &body, &license);
    let entries = build_toc(&preliminary)?;
    let toc = render_toc(&entries)?;

    Ok(assemble(&header, &install, &body, &license, &toc))
}

pub fn render_readme(existing: &str, inputs: &SynthesisInputs<'_>) -> Result<String, ReadmeError> {
    Ok(synthesize(existing, inputs)?.to_markdown())
}

/// A request to bring one project's README up to date.
#[derive(Clone, Debug, Default)]
pub struct SyncRequest {
    /// Any path inside the project; the nearest ancestor with a manifest is used.
    pub start: PathBuf,
    pub repo_url: Option<String>,
    pub default_branch: Option<String>,
    /// Compare only; never touch the file.
    pub check_only: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SyncReport {
    pub project: PathBuf,
    pub readme: PathBuf,
    pub package: String,
    pub repository: RepoCoordinates,
    /// In check mode, the write that would have happened.
    pub outcome: WriteOutcome,
    pub written: bool,
}

impl SyncReport {
    pub fn up_to_date(&self) -> bool {
        !self.outcome.changed()
    }
}

/// Resolves the project, regenerates its README and writes it if it changed.
pub fn sync_readme(request: &SyncRequest) -> Result<SyncReport, ReadmeError> {
    let project = discover(&request.start)?;
    let config = SyncConfig::load(project.root())?;
    let meta = read_manifest(project.root())?;

    let repo_url = request
        .repo_url
        .clone()
        .or_else(|| config.repo_url.clone())
        .or_else(|| meta.repository_url().map(str::to_string))
        .ok_or_else(|| {
            ReadmeError::Configuration(format!(
                "no repository url given and none found in {}",
                project.manifest().display()
            ))
        })?;
    let branch = request
        .default_branch
        .as_deref()
        .unwrap_or_else(|| config.default_branch());
    let coords = RepoCoordinates::from_url(&repo_url, branch)?;
    let licenses = config.license_registry();

    let readme_name = config.readme();
    let readme_path = project.file(readme_name);
    tracing::info!(
        project = %project.root().display(),
        package = %meta.name,
        owner = %coords.owner,
        repo = %coords.name,
        "synchronising README"
    );

    let existing = read_or_empty(&readme_path)?;
    let rendered = render_readme(
        existing.as_deref().unwrap_or_default(),
        &SynthesisInputs {
            meta: &meta,
            coords: &coords,
            licenses: &licenses,
        },
    )?;

    let (outcome, written) = if request.check_only {
        let outcome = match existing {
            Some(current) if current == rendered => WriteOutcome::Unchanged,
            Some(_) => WriteOutcome::Updated,
            None => WriteOutcome::Created,
        };
        (outcome, false)
    } else {
        let outcome = ensure_file_has_contents(project.root(), readme_name, &rendered)?;
        (outcome, outcome.changed())
    };

    Ok(SyncReport {
        project: project.root().to_path_buf(),
        readme: readme_path,
        package: meta.name,
        repository: coords,
        outcome,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_replaces_nbsp_and_crlf() {
        assert_eq!(normalize("##\u{a0}Usage\r\ntext"), "## Usage\ntext");
    }

    #[test]
    fn nbsp_heading_is_recognised_after_normalization() {
        let meta = PackageMetadata::new("demo");
        let coords = RepoCoordinates::from_url("https://github.com/ipfs/demo", "main").unwrap();
        let licenses = LicenseRegistry::builtin();
        let inputs = SynthesisInputs {
            meta: &meta,
            coords: &coords,
            licenses: &licenses,
        };

        let out = render_readme("# demo\n\nbadges\n\n##\u{a0}Usage\n\ntext\n", &inputs).unwrap();
        assert!(out.contains("- [Usage](#usage)"));
    }
}
