//! Recursive directory traversal applying an [`IgnoreRuleSet`].

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::ignore::IgnoreRuleSet;

/// Errors that can occur while scanning a source tree.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to resolve scan root {path}: {source}")]
    Root {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Walks a source tree and lists the files eligible for extraction.
pub struct TreeWalker<'a> {
    rules: &'a IgnoreRuleSet,
}

impl<'a> TreeWalker<'a> {
    pub fn new(rules: &'a IgnoreRuleSet) -> Self {
        Self { rules }
    }

    /// Returns the absolute paths of every included file under `root`.
    ///
    /// Ignored directories are pruned before descending, so nothing beneath
    /// them is visited. Entries are visited in file-name order. Symbolic
    /// links are followed and reported under the link's own path; a link
    /// back to one of its ancestors is skipped with a warning.
    pub fn walk(&self, root: &Path) -> ScanResult<Vec<PathBuf>> {
        let root = resolve_root(root)?;

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_pruned(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.loop_ancestor().is_some() => {
                    warn!(error = %e, "skipping symlink loop");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let decision = self
                .rules
                .classify_file(&entry.file_name().to_string_lossy());
            if decision.is_included() {
                files.push(entry.into_path());
            } else {
                debug!(path = %entry.path().display(), ?decision, "skipping file");
            }
        }

        Ok(files)
    }

    /// The root is never pruned, even if its own name is on the ignore list.
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        let pruned = self.rules.is_ignored_dir(&name);
        if pruned {
            debug!(path = %entry.path().display(), "pruning ignored directory");
        }
        pruned
    }
}

/// Canonical form of `root`, which must be an existing directory.
pub(crate) fn resolve_root(root: &Path) -> ScanResult<PathBuf> {
    let resolved = root.canonicalize().map_err(|source| ScanError::Root {
        path: root.to_path_buf(),
        source,
    })?;
    if !resolved.is_dir() {
        return Err(ScanError::Root {
            path: root.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        });
    }
    Ok(resolved)
}

/// Walks `root` with the given rules.
pub fn walk(root: &Path, rules: &IgnoreRuleSet) -> ScanResult<Vec<PathBuf>> {
    TreeWalker::new(rules).walk(root)
}
