//! Publishing a snapshot: version it, persist it, update the registry.

use std::path::PathBuf;

use tracing::info;

use super::{validate_project_name, Registry, RegistryStore, StoreResult, VersionStore};
use crate::model::{ProjectSnapshot, RegistryEntry, Version};

/// Outcome of a successful [`publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub version: Version,
    /// Where the store wrote the snapshot.
    pub location: PathBuf,
    /// The registry as it was saved.
    pub registry: Registry,
}

/// Stores `snapshot` under the next free version of its project and points
/// the registry entry for that project name at it.
///
/// Not safe against concurrent publishers of the same project: version
/// computation and the registry rewrite are plain read-then-write.
pub fn publish<S>(store: &mut S, snapshot: &ProjectSnapshot) -> StoreResult<Publication>
where
    S: VersionStore + RegistryStore,
{
    let name = snapshot.project_name.as_str();
    validate_project_name(name)?;

    let version = store.next_version(snapshot.level, name)?;
    let location = store.write_snapshot(version, snapshot)?;

    let registry = store
        .load_registry()?
        .upsert(RegistryEntry::new(name, snapshot.level, version));
    store.save_registry(&registry)?;

    info!(
        project = name,
        level = %snapshot.level,
        version = %version,
        files = snapshot.files.len(),
        "published snapshot"
    );

    Ok(Publication {
        version,
        location,
        registry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Level;
    use crate::store::{MemoryStore, StoreError};

    fn snapshot(name: &str, level: Level) -> ProjectSnapshot {
        ProjectSnapshot {
            project_name: name.to_string(),
            level,
            files: Vec::new(),
        }
    }

    #[test]
    fn test_versions_increase_per_publish() {
        let mut store = MemoryStore::new();
        let first = publish(&mut store, &snapshot("web", Level::L1)).unwrap();
        let second = publish(&mut store, &snapshot("web", Level::L1)).unwrap();
        let third = publish(&mut store, &snapshot("web", Level::L1)).unwrap();

        assert_eq!(first.version.to_string(), "0000");
        assert_eq!(second.version.to_string(), "0001");
        assert_eq!(third.version, Version(2));
        assert_eq!(
            third.registry.get("web").unwrap().latest_version,
            Version(2)
        );
    }

    #[test]
    fn test_registry_keeps_one_entry_per_name() {
        let mut store = MemoryStore::new();
        publish(&mut store, &snapshot("web", Level::L1)).unwrap();
        publish(&mut store, &snapshot("api", Level::L2)).unwrap();
        let last = publish(&mut store, &snapshot("web", Level::L3)).unwrap();

        assert_eq!(last.registry.len(), 2);
        let web = last.registry.get("web").unwrap();
        assert_eq!(web.level, Level::L3);
        assert_eq!(web.path, "L3/web");
        // first snapshot at L3, independent of the earlier L1 history
        assert_eq!(web.latest_version, Version(0));
        assert_eq!(store.load_registry().unwrap(), last.registry);
    }

    #[test]
    fn test_malformed_registry_is_replaced() {
        let mut store = MemoryStore::with_raw_registry("[{broken");
        let publication = publish(&mut store, &snapshot("web", Level::L1)).unwrap();

        assert_eq!(
            publication.registry.entries(),
            &[RegistryEntry::new("web", Level::L1, Version(0))]
        );
    }

    #[test]
    fn test_invalid_registry_entry_does_not_erase_others() {
        let mut store = MemoryStore::with_raw_registry(
            r#"[{"name":"web","level":"L2","path":"L2/web","latestVersion":3},
                {"name":"old","level":"L9","path":"L9/old","latestVersion":0}]"#,
        );
        let publication = publish(&mut store, &snapshot("api", Level::L1)).unwrap();

        assert_eq!(
            publication.registry.entries(),
            &[
                RegistryEntry::new("web", Level::L2, Version(3)),
                RegistryEntry::new("api", Level::L1, Version(0)),
            ]
        );
    }

    #[test]
    fn test_published_snapshot_reads_back() {
        let mut store = MemoryStore::new();
        let original = snapshot("web", Level::L2);
        let publication = publish(&mut store, &original).unwrap();

        let read = store
            .read_snapshot(Level::L2, "web", publication.version)
            .unwrap();
        assert_eq!(read, original);
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let mut store = MemoryStore::new();
        let result = publish(&mut store, &snapshot("a/b", Level::L1));

        assert!(matches!(result, Err(StoreError::InvalidProjectName(_))));
        assert!(store.raw_registry().is_none());
    }
}
