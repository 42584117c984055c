//! The project registry: one entry per project name.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::RegistryEntry;

/// Ordered list of registry entries, unique by project name.
///
/// Serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes any entry with the same name, then appends `entry`.
    pub fn upsert(mut self, entry: RegistryEntry) -> Self {
        self.entries.retain(|e| e.name != entry.name);
        self.entries.push(entry);
        self
    }

    /// Decodes stored content. Empty or whitespace-only content is an empty
    /// registry. Fails only when the content is not a JSON array; entries
    /// that do not match [`RegistryEntry`] are dropped with a warning.
    pub fn decode(raw: &str) -> serde_json::Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::new());
        }

        let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
        let entries = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                serde_json::from_value::<RegistryEntry>(value)
                    .map_err(|e| warn!(index, error = %e, "dropping invalid registry entry"))
                    .ok()
            })
            .collect();
        Ok(Self { entries })
    }

    /// Decodes stored content, treating malformed content as an empty registry.
    pub fn decode_forgiving(raw: &str) -> Self {
        Self::decode(raw).unwrap_or_else(|e| {
            warn!(error = %e, "registry content is invalid, starting from an empty registry");
            Self::new()
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
