use std::fs;
use std::path::Path;

use readme_sync::{CONFIG_FILE, ReadmeError, SyncRequest, WriteOutcome, sync_readme};
use tempfile::tempdir;

fn write_manifest(root: &Path, repository: &str) {
    fs::write(
        root.join("package.json"),
        format!(
            r#"{{"name":"demo","version":"1.0.0","description":"A demo package","repository":{{"type":"git","url":"{repository}"}}}}"#
        ),
    )
    .unwrap();
}

fn request(start: &Path) -> SyncRequest {
    SyncRequest {
        start: start.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn sync_creates_then_leaves_readme_untouched() {
    let temp = tempdir().unwrap();
    write_manifest(temp.path(), "git+https://github.com/ipfs/demo.git");

    let first = sync_readme(&request(temp.path())).unwrap();
    assert_eq!(first.outcome, WriteOutcome::Created);
    assert!(first.written);
    assert_eq!(first.repository.owner, "ipfs");
    assert_eq!(first.repository.name, "demo");

    let written = fs::read_to_string(temp.path().join("README.md")).unwrap();
    assert!(written.starts_with("# demo\n"));

    let second = sync_readme(&request(temp.path())).unwrap();
    assert_eq!(second.outcome, WriteOutcome::Unchanged);
    assert!(!second.written);
    assert!(second.up_to_date());
    assert_eq!(
        fs::read_to_string(temp.path().join("README.md")).unwrap(),
        written
    );
}

#[test]
fn sync_discovers_project_from_nested_path() {
    let temp = tempdir().unwrap();
    write_manifest(temp.path(), "https://github.com/libp2p/demo");
    let nested = temp.path().join("src").join("lib");
    fs::create_dir_all(&nested).unwrap();

    let report = sync_readme(&request(&nested)).unwrap();
    assert_eq!(report.project, temp.path().canonicalize().unwrap());
    assert!(temp.path().join("README.md").is_file());
}

#[test]
fn sync_preserves_author_sections() {
    let temp = tempdir().unwrap();
    write_manifest(temp.path(), "https://github.com/ipfs/demo");
    fs::write(
        temp.path().join("README.md"),
        "# demo\n\nold badges\n\n## Usage\n\nRun it.\n\n## License\n\nMIT\n",
    )
    .unwrap();

    let report = sync_readme(&request(temp.path())).unwrap();
    assert_eq!(report.outcome, WriteOutcome::Updated);

    let written = fs::read_to_string(temp.path().join("README.md")).unwrap();
    assert!(written.contains("## Usage\n\nRun it.\n\n## License\n"));
    assert!(!written.contains("old badges"));
}

#[test]
fn check_mode_reports_without_writing() {
    let temp = tempdir().unwrap();
    write_manifest(temp.path(), "https://github.com/ipfs/demo");
    fs::write(temp.path().join("README.md"), "# stale\n").unwrap();

    let report = sync_readme(&SyncRequest {
        check_only: true,
        ..request(temp.path())
    })
    .unwrap();

    assert_eq!(report.outcome, WriteOutcome::Updated);
    assert!(!report.written);
    assert!(!report.up_to_date());
    assert_eq!(
        fs::read_to_string(temp.path().join("README.md")).unwrap(),
        "# stale\n"
    );
}

#[test]
fn unknown_owner_aborts_without_writing() {
    let temp = tempdir().unwrap();
    write_manifest(temp.path(), "https://example.com/unknown-owner/some-repo");

    let err = sync_readme(&request(temp.path())).unwrap_err();

    assert!(matches!(err, ReadmeError::Configuration(_)), "{err}");
    assert!(!temp.path().join("README.md").exists());
}

#[test]
fn explicit_arguments_override_config_and_manifest() {
    let temp = tempdir().unwrap();
    write_manifest(temp.path(), "https://example.com/unknown-owner/some-repo");
    fs::write(
        temp.path().join(CONFIG_FILE),
        "repo_url: https://github.com/acme/widget\ndefault_branch: trunk\nreadme: README.markdown\nlicenses:\n  acme: |\n    ## License\n\n    MIT © Acme\n",
    )
    .unwrap();

    let report = sync_readme(&request(temp.path())).unwrap();
    assert_eq!(report.repository.owner, "acme");
    assert_eq!(report.repository.default_branch, "trunk");
    let written = fs::read_to_string(temp.path().join("README.markdown")).unwrap();
    assert!(written.contains("branch%3Atrunk"));
    assert!(written.ends_with("## License\n\nMIT © Acme\n"));

    let report = sync_readme(&SyncRequest {
        repo_url: Some("https://github.com/ipfs/demo".into()),
        default_branch: Some("release".into()),
        ..request(temp.path())
    })
    .unwrap();
    assert_eq!(report.repository.owner, "ipfs");
    assert_eq!(report.repository.default_branch, "release");
    assert_eq!(report.outcome, WriteOutcome::Updated);
}

#[test]
fn missing_manifest_is_reported() {
    let temp = tempdir().unwrap();
    let err = sync_readme(&request(temp.path())).unwrap_err();
    assert!(matches!(err, ReadmeError::ManifestRead(_)), "{err}");
}

#[test]
fn missing_repository_url_is_a_configuration_error() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("package.json"), r#"{"name":"demo"}"#).unwrap();

    let err = sync_readme(&request(temp.path())).unwrap_err();
    assert!(matches!(err, ReadmeError::Configuration(_)), "{err}");
}
