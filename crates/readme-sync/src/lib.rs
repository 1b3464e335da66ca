pub mod assemble;
pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod generate;
pub mod license;
pub mod manifest;
pub mod persistence;
pub mod project;
pub mod synthesize;
pub mod toc;

pub use assemble::{assemble, assemble_preliminary};
pub use classify::{SectionTag, classify, tag_sections};
pub use config::{CONFIG_FILE, SyncConfig};
pub use document::{Block, BlockKind, Document};
pub use error::ReadmeError;
pub use generate::SectionGenerator;
pub use license::LicenseRegistry;
pub use manifest::{PackageMetadata, RepoCoordinates, Repository, read_manifest};
pub use persistence::{WriteOutcome, ensure_file_has_contents};
pub use project::{ProjectPaths, discover as discover_project};
pub use synthesize::{
    SyncReport, SyncRequest, SynthesisInputs, normalize, render_readme, sync_readme, synthesize,
};
pub use toc::{TocEntry, build_toc, render_toc};
