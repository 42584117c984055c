//! File-system backed store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{
    parse_version_file_name, validate_project_name, version_after, Registry, RegistryStore,
    StoreError, StoreResult, VersionStore,
};
use crate::model::{Level, ProjectSnapshot, Version};

/// Registry file name, directly under the data root.
pub const REGISTRY_FILE: &str = "projects.json";

/// Store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl FsStore {
    /// Opens the store, creating the data root and every level directory.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        for level in Level::ALL {
            let dir = root.join(level.as_str());
            fs::create_dir_all(&dir).map_err(io_error(&dir))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILE)
    }

    pub fn project_dir(&self, level: Level, project: &str) -> StoreResult<PathBuf> {
        validate_project_name(project)?;
        Ok(self.root.join(level.as_str()).join(project))
    }

    pub fn snapshot_path(
        &self,
        level: Level,
        project: &str,
        version: Version,
    ) -> StoreResult<PathBuf> {
        Ok(self.project_dir(level, project)?.join(version.file_name()))
    }
}

impl VersionStore for FsStore {
    fn next_version(&self, level: Level, project: &str) -> StoreResult<Version> {
        let dir = self.project_dir(level, project)?;
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Version::default()),
            Err(e) => return Err(io_error(&dir)(e)),
        };

        let mut latest: Option<Version> = None;
        for entry in entries {
            let entry = entry.map_err(io_error(&dir))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            match parse_version_file_name(&name) {
                Some(version) => latest = latest.max(Some(version)),
                None => debug!(file = %name, "ignoring non-snapshot file"),
            }
        }

        version_after(project, latest)
    }

    fn write_snapshot(
        &mut self,
        version: Version,
        snapshot: &ProjectSnapshot,
    ) -> StoreResult<PathBuf> {
        let dir = self.project_dir(snapshot.level, &snapshot.project_name)?;
        fs::create_dir_all(&dir).map_err(io_error(&dir))?;

        let json = serde_json::to_string_pretty(snapshot).map_err(|source| StoreError::Encode {
            what: format!("snapshot of {}", snapshot.project_name),
            source,
        })?;
        let path = dir.join(version.file_name());
        fs::write(&path, json).map_err(io_error(&path))?;
        Ok(path)
    }

    fn read_snapshot(
        &self,
        level: Level,
        project: &str,
        version: Version,
    ) -> StoreResult<ProjectSnapshot> {
        let path = self.snapshot_path(level, project, version)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::SnapshotNotFound(path.display().to_string()))
            }
            Err(e) => return Err(io_error(&path)(e)),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
            location: path.display().to_string(),
            source,
        })
    }
}

impl RegistryStore for FsStore {
    fn load_registry(&self) -> StoreResult<Registry> {
        let path = self.registry_path();
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Registry::decode_forgiving(&raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Registry::new()),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn save_registry(&mut self, registry: &Registry) -> StoreResult<()> {
        let json = registry.to_json().map_err(|source| StoreError::Encode {
            what: "registry".to_string(),
            source,
        })?;
        let path = self.registry_path();
        fs::write(&path, json).map_err(io_error(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeclarationKind, ExportDescriptor, FileRecord, RegistryEntry};
    use tempfile::TempDir;

    fn sample_snapshot(level: Level) -> ProjectSnapshot {
        ProjectSnapshot {
            project_name: "web".to_string(),
            level,
            files: vec![FileRecord::new(
                "src/index.ts".to_string(),
                vec!["react".to_string(), "./a".to_string(), "react".to_string()],
                vec![
                    ExportDescriptor::named(DeclarationKind::Interface, "Props"),
                    ExportDescriptor::Star {
                        from: "./a".to_string(),
                    },
                ],
            )],
        }
    }

    #[test]
    fn test_open_creates_level_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("data");
        FsStore::open(&root).unwrap();

        for level in ["L1", "L2", "L3", "L4", "N"] {
            assert!(root.join(level).is_dir());
        }
    }

    #[test]
    fn test_next_version_for_new_project() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.next_version(Level::L1, "web").unwrap(), Version(0));
    }

    #[test]
    fn test_next_version_uses_highest_existing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::open(temp_dir.path()).unwrap();
        let dir = store.project_dir(Level::L2, "web").unwrap();
        fs::create_dir_all(&dir).unwrap();
        for name in ["0000.json", "0007.json", "0003.json", "notes.json", "0010.bak"] {
            fs::write(dir.join(name), "{}").unwrap();
        }

        assert_eq!(store.next_version(Level::L2, "web").unwrap(), Version(8));
    }

    #[test]
    fn test_next_version_refuses_to_wrap() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::open(temp_dir.path()).unwrap();
        let dir = store.project_dir(Level::L1, "web").unwrap();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("0000.json"), "{}").unwrap();
        fs::write(dir.join(format!("{}.json", u32::MAX)), "{}").unwrap();

        assert!(matches!(
            store.next_version(Level::L1, "web"),
            Err(StoreError::VersionExhausted { .. })
        ));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FsStore::open(temp_dir.path()).unwrap();
        let snapshot = sample_snapshot(Level::L4);

        let path = store.write_snapshot(Version(0), &snapshot).unwrap();
        assert_eq!(path, temp_dir.path().join("L4").join("web").join("0000.json"));

        let read = store.read_snapshot(Level::L4, "web", Version(0)).unwrap();
        assert_eq!(read, snapshot);
    }

    #[test]
    fn test_read_missing_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::open(temp_dir.path()).unwrap();
        let result = store.read_snapshot(Level::L1, "web", Version(3));
        assert!(matches!(result, Err(StoreError::SnapshotNotFound(_))));
    }

    #[test]
    fn test_registry_round_trip_and_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FsStore::open(temp_dir.path()).unwrap();
        assert!(store.load_registry().unwrap().is_empty());

        let registry = Registry::new().upsert(RegistryEntry::new("web", Level::N, Version(2)));
        store.save_registry(&registry).unwrap();

        assert_eq!(store.load_registry().unwrap(), registry);
    }

    #[test]
    fn test_malformed_registry_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::open(temp_dir.path()).unwrap();
        fs::write(store.registry_path(), "[{\"name\": ").unwrap();

        assert!(store.load_registry().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_path_like_project_names() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::open(temp_dir.path()).unwrap();
        assert!(matches!(
            store.next_version(Level::L1, "../escape"),
            Err(StoreError::InvalidProjectName(_))
        ));
    }
}
