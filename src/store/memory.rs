//! In-memory store, used in tests and for dry runs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{
    validate_project_name, version_after, Registry, RegistryStore, StoreError, StoreResult,
    VersionStore,
};
use crate::model::{Level, ProjectSnapshot, Version};

/// Keeps serialized snapshots and registry text in memory.
///
/// Content is stored as JSON text so that encoding and the forgiving
/// registry read behave exactly as they do on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshots: BTreeMap<(Level, String, Version), String>,
    registry: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from raw registry content, which may be malformed.
    pub fn with_raw_registry(raw: impl Into<String>) -> Self {
        Self {
            registry: Some(raw.into()),
            ..Self::default()
        }
    }

    pub fn raw_registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    /// Versions stored for a project, ascending.
    pub fn versions(&self, level: Level, project: &str) -> Vec<Version> {
        self.snapshots
            .keys()
            .filter(|(l, p, _)| *l == level && p == project)
            .map(|(_, _, v)| *v)
            .collect()
    }
}

fn location(level: Level, project: &str, version: Version) -> String {
    format!("{}/{}/{}", level, project, version.file_name())
}

impl VersionStore for MemoryStore {
    fn next_version(&self, level: Level, project: &str) -> StoreResult<Version> {
        validate_project_name(project)?;
        version_after(project, self.versions(level, project).into_iter().max())
    }

    fn write_snapshot(
        &mut self,
        version: Version,
        snapshot: &ProjectSnapshot,
    ) -> StoreResult<PathBuf> {
        validate_project_name(&snapshot.project_name)?;
        let json = serde_json::to_string_pretty(snapshot).map_err(|source| StoreError::Encode {
            what: format!("snapshot of {}", snapshot.project_name),
            source,
        })?;
        self.snapshots.insert(
            (snapshot.level, snapshot.project_name.clone(), version),
            json,
        );
        Ok(PathBuf::from(location(
            snapshot.level,
            &snapshot.project_name,
            version,
        )))
    }

    fn read_snapshot(
        &self,
        level: Level,
        project: &str,
        version: Version,
    ) -> StoreResult<ProjectSnapshot> {
        let location = location(level, project, version);
        let raw = self
            .snapshots
            .get(&(level, project.to_string(), version))
            .ok_or_else(|| StoreError::SnapshotNotFound(location.clone()))?;
        serde_json::from_str(raw).map_err(|source| StoreError::Decode { location, source })
    }
}

impl RegistryStore for MemoryStore {
    fn load_registry(&self) -> StoreResult<Registry> {
        Ok(self
            .registry
            .as_deref()
            .map(Registry::decode_forgiving)
            .unwrap_or_default())
    }

    fn save_registry(&mut self, registry: &Registry) -> StoreResult<()> {
        let json = registry.to_json().map_err(|source| StoreError::Encode {
            what: "registry".to_string(),
            source,
        })?;
        self.registry = Some(json);
        Ok(())
    }
}
