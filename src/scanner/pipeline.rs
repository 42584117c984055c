//! Walk a tree and extract declarations from every included file.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::ignore::IgnoreRuleSet;
use super::walker::{resolve_root, ScanError, ScanResult, TreeWalker};
use crate::analysis::DeclarationExtractor;
use crate::model::FileRecord;

/// Scans `root` and returns one record per included file, in walk order.
///
/// Any unreadable file aborts the whole scan; no partial result is returned.
pub fn scan_project<E: DeclarationExtractor + ?Sized>(
    root: &Path,
    rules: &IgnoreRuleSet,
    extractor: &E,
) -> ScanResult<Vec<FileRecord>> {
    let files = TreeWalker::new(rules).walk(root)?;
    // Walker output is canonical, so relative paths are taken against the canonical root.
    let root = resolve_root(root)?;

    let mut records = Vec::with_capacity(files.len());
    for path in &files {
        let bytes = fs::read(path).map_err(|source| ScanError::Read {
            path: path.clone(),
            source,
        })?;
        let source = String::from_utf8_lossy(&bytes);
        let decls = extractor.extract(&source);

        let relative = relative_path(&root, path);
        debug!(
            path = %relative,
            imports = decls.imports.len(),
            exports = decls.exports.len(),
            "extracted declarations"
        );
        records.push(FileRecord::new(relative, decls.imports, decls.exports));
    }

    info!(root = %root.display(), files = records.len(), "scan complete");
    Ok(records)
}

/// `path` relative to `root`, joined with `/` regardless of platform.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
