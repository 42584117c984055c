//! Versioned persistence of project snapshots.
//!
//! Snapshots are stored per `(level, project)` under increasing version
//! numbers, and a single registry maps each project name to its latest
//! snapshot. Both concerns sit behind traits so the publishing logic in
//! [`publish`] runs the same against [`FsStore`] and [`MemoryStore`].
//!
//! # On-disk layout
//!
//! ```text
//! <data root>/
//!   projects.json              registry
//!   L1/ L2/ L3/ L4/ N/         one directory per level
//!     <project>/0000.json      one file per version
//! ```

pub mod fs;
pub mod manager;
pub mod memory;
pub mod registry;

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{Level, ProjectSnapshot, Version};

pub use fs::{FsStore, REGISTRY_FILE};
pub use manager::{publish, Publication};
pub use memory::MemoryStore;
pub use registry::Registry;

/// Errors that can occur while reading or writing the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode {what}: {source}")]
    Encode {
        what: String,
        source: serde_json::Error,
    },

    #[error("Failed to decode snapshot {location}: {source}")]
    Decode {
        location: String,
        source: serde_json::Error,
    },

    #[error("Invalid project name: '{0}' (must be a single path component)")]
    InvalidProjectName(String),

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),

    #[error("No version left after {latest} for project {project}")]
    VersionExhausted { project: String, latest: Version },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Versioned snapshot storage.
pub trait VersionStore {
    /// One past the highest stored version of the project, or `0000` if none exist.
    fn next_version(&self, level: Level, project: &str) -> StoreResult<Version>;

    /// Persists `snapshot` under `version` and returns where it was written.
    fn write_snapshot(
        &mut self,
        version: Version,
        snapshot: &ProjectSnapshot,
    ) -> StoreResult<PathBuf>;

    fn read_snapshot(
        &self,
        level: Level,
        project: &str,
        version: Version,
    ) -> StoreResult<ProjectSnapshot>;
}

/// Storage for the project registry.
pub trait RegistryStore {
    /// Loads the registry. Malformed content yields an empty registry.
    fn load_registry(&self) -> StoreResult<Registry>;

    /// Replaces the stored registry with `registry`.
    fn save_registry(&mut self, registry: &Registry) -> StoreResult<()>;
}

/// Project names become directory names, so they must be one plain component.
pub fn validate_project_name(name: &str) -> StoreResult<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(StoreError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}

/// Version to write after `latest`, starting at `0000` for a new project.
pub fn version_after(project: &str, latest: Option<Version>) -> StoreResult<Version> {
    match latest {
        None => Ok(Version::default()),
        Some(latest) => latest.next().ok_or_else(|| StoreError::VersionExhausted {
            project: project.to_string(),
            latest,
        }),
    }
}

/// Parses a snapshot file name such as `0012.json` into its version.
pub fn parse_version_file_name(file_name: &str) -> Option<Version> {
    let stem = file_name.strip_suffix(".json")?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok().map(Version)
}
