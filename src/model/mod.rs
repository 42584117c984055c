//! Project model for srcmap.
//!
//! Types describing a scanned project: per-file records with their
//! imports and exports, versioned snapshots, and registry entries.

pub mod types;

pub use types::{
    DeclarationKind, ExportDescriptor, FileRecord, Level, ProjectSnapshot, RegistryEntry,
    UsageEntry, Version, ANONYMOUS_EXPORT,
};
