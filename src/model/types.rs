//! Shared types for the project model.
//!
//! These structures are what a scan produces and what gets persisted:
//! per-file records, their export descriptors, the project snapshot and
//! the registry entries that point at the latest snapshot of each project.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name recorded for `export default function() {}` and other anonymous defaults.
pub const ANONYMOUS_EXPORT: &str = "(anonymous)";

/// Coarse classification tag attached to a project.
///
/// Levels only act as a namespacing dimension: each one is a fixed
/// subdirectory of the data root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Level {
    #[default]
    L1,
    L2,
    L3,
    L4,
    N,
}

impl Level {
    /// Every recognized level, in directory-creation order.
    pub const ALL: [Level; 5] = [Level::L1, Level::L2, Level::L3, Level::L4, Level::N];

    /// Returns the tag as it appears on disk and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::L1 => "L1",
            Level::L2 => "L2",
            Level::L3 => "L3",
            Level::L4 => "L4",
            Level::N => "N",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown level: '{}'. Valid levels: L1, L2, L3, L4, N",
                    s
                )
            })
    }
}

/// Snapshot version number, rendered as four zero-padded digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(pub u32);

impl Version {
    /// The version following this one, or `None` past `u32::MAX`.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Version)
    }

    /// File name of the snapshot stored under this version, e.g. `0003.json`.
    pub fn file_name(&self) -> String {
        format!("{}.json", self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Declaration keyword of a named export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Function,
    Const,
    Class,
    Type,
    Interface,
}

impl DeclarationKind {
    /// Maps the keyword used in source text to a kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "function" => Some(DeclarationKind::Function),
            "const" => Some(DeclarationKind::Const),
            "class" => Some(DeclarationKind::Class),
            "type" => Some(DeclarationKind::Type),
            "interface" => Some(DeclarationKind::Interface),
            _ => None,
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Const => "const",
            DeclarationKind::Class => "class",
            DeclarationKind::Type => "type",
            DeclarationKind::Interface => "interface",
        };
        f.write_str(keyword)
    }
}

/// One entry of a file's outbound surface.
///
/// Serialized with a `kind` tag. Named declarations carry their keyword
/// as the kind (`{"kind": "function", "name": "foo"}`), star re-exports
/// carry only the source specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExportDescriptor {
    Function { name: String },
    Const { name: String },
    Class { name: String },
    Type { name: String },
    Interface { name: String },
    /// `export default ...`; anonymous declarations use [`ANONYMOUS_EXPORT`].
    Default { name: String },
    /// A name listed in `export { ... }`, resolved to its local name.
    Reexport { name: String },
    /// `export * from '...'`
    Star { from: String },
}

impl ExportDescriptor {
    /// Builds the descriptor for a named declaration.
    pub fn named(kind: DeclarationKind, name: impl Into<String>) -> Self {
        let name = name.into();
        match kind {
            DeclarationKind::Function => ExportDescriptor::Function { name },
            DeclarationKind::Const => ExportDescriptor::Const { name },
            DeclarationKind::Class => ExportDescriptor::Class { name },
            DeclarationKind::Type => ExportDescriptor::Type { name },
            DeclarationKind::Interface => ExportDescriptor::Interface { name },
        }
    }

    /// Returns the declaration kind for named declarations.
    pub fn declaration_kind(&self) -> Option<DeclarationKind> {
        match self {
            ExportDescriptor::Function { .. } => Some(DeclarationKind::Function),
            ExportDescriptor::Const { .. } => Some(DeclarationKind::Const),
            ExportDescriptor::Class { .. } => Some(DeclarationKind::Class),
            ExportDescriptor::Type { .. } => Some(DeclarationKind::Type),
            ExportDescriptor::Interface { .. } => Some(DeclarationKind::Interface),
            _ => None,
        }
    }

    /// Exported name, or `None` for star re-exports.
    pub fn name(&self) -> Option<&str> {
        match self {
            ExportDescriptor::Function { name }
            | ExportDescriptor::Const { name }
            | ExportDescriptor::Class { name }
            | ExportDescriptor::Type { name }
            | ExportDescriptor::Interface { name }
            | ExportDescriptor::Default { name }
            | ExportDescriptor::Reexport { name } => Some(name),
            ExportDescriptor::Star { .. } => None,
        }
    }
}

/// Usage flag for one exported symbol, filled in by a later enrichment pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    pub name: String,
    pub used: bool,
}

/// Everything recorded about one scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Path relative to the scan root, `/`-separated.
    pub path: String,
    /// Import specifiers in order of appearance, duplicates kept.
    pub imports: Vec<String>,
    pub exports: Vec<ExportDescriptor>,
    pub unused: bool,
    pub exported_functions: Vec<UsageEntry>,
    pub exported_constants: Vec<UsageEntry>,
    pub exported_classes: Vec<UsageEntry>,
    pub exported_types: Vec<UsageEntry>,
    pub exported_interfaces: Vec<UsageEntry>,
}

impl FileRecord {
    /// Creates a record with the usage fields left at their defaults.
    pub fn new(path: String, imports: Vec<String>, exports: Vec<ExportDescriptor>) -> Self {
        Self {
            path,
            imports,
            exports,
            unused: false,
            exported_functions: Vec::new(),
            exported_constants: Vec::new(),
            exported_classes: Vec::new(),
            exported_types: Vec::new(),
            exported_interfaces: Vec::new(),
        }
    }
}

/// One point-in-time capture of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub project_name: String,
    pub level: Level,
    pub files: Vec<FileRecord>,
}

/// Registry row pointing at the latest snapshot of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub name: String,
    pub level: Level,
    /// `<level>/<name>`, relative to the data root.
    pub path: String,
    pub latest_version: Version,
}

impl RegistryEntry {
    /// Creates the entry for `name` at `level`, deriving its path.
    pub fn new(name: impl Into<String>, level: Level, latest_version: Version) -> Self {
        let name = name.into();
        Self {
            path: format!("{}/{}", level, name),
            name,
            level,
            latest_version,
        }
    }

    /// Snapshot path of the latest version, relative to the data root.
    pub fn latest_snapshot_path(&self) -> String {
        format!("{}/{}", self.path, self.latest_version.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!("L1".parse::<Level>().unwrap(), Level::L1);
        assert_eq!("N".parse::<Level>().unwrap(), Level::N);
        assert!("l1".parse::<Level>().is_err());
        assert!("L5".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_default_is_base_tier() {
        assert_eq!(Level::default(), Level::L1);
    }

    #[test]
    fn test_version_is_zero_padded() {
        assert_eq!(Version(0).to_string(), "0000");
        assert_eq!(Version(42).to_string(), "0042");
        assert_eq!(Version(7).file_name(), "0007.json");
        assert_eq!(Version(9).next(), Some(Version(10)));
        assert_eq!(Version(u32::MAX).next(), None);
    }

    #[test]
    fn test_export_descriptor_json_shape() {
        let named = ExportDescriptor::named(DeclarationKind::Function, "foo");
        assert_eq!(
            serde_json::to_string(&named).unwrap(),
            r#"{"kind":"function","name":"foo"}"#
        );

        let star = ExportDescriptor::Star {
            from: "./utils".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&star).unwrap(),
            r#"{"kind":"star","from":"./utils"}"#
        );
        assert_eq!(star.name(), None);
        assert_eq!(star.declaration_kind(), None);
    }

    #[test]
    fn test_file_record_uses_camel_case_fields() {
        let record = FileRecord::new("src/a.js".to_string(), vec![], vec![]);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["unused"], false);
        assert!(value["exportedFunctions"].as_array().unwrap().is_empty());
        assert!(value["exportedInterfaces"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_registry_entry_paths() {
        let entry = RegistryEntry::new("shop", Level::L2, Version(3));
        assert_eq!(entry.path, "L2/shop");
        assert_eq!(entry.latest_snapshot_path(), "L2/shop/0003.json");

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["latestVersion"], 3);
        assert_eq!(value["level"], "L2");
    }
}
