//! Inclusion and exclusion rules for the tree walker.

/// Why a file was kept or skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDecision {
    Include,
    /// The exact file name is on the ignore list.
    IgnoredName,
    /// The extension is not an accepted source extension.
    UnsupportedExtension,
    /// The extension is explicitly rejected.
    IgnoredExtension,
    /// The file name contains an ignored substring such as `.test.`.
    IgnoredPattern,
}

impl FileDecision {
    pub fn is_included(&self) -> bool {
        matches!(self, FileDecision::Include)
    }
}

/// Static rule set deciding which directories and files get scanned.
///
/// Extensions are stored without the leading dot. Patterns are plain
/// substring tests against the file name, not globs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRuleSet {
    pub ignored_dirs: Vec<String>,
    pub ignored_files: Vec<String>,
    pub allowed_extensions: Vec<String>,
    pub ignored_extensions: Vec<String>,
    pub ignored_patterns: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for IgnoreRuleSet {
    fn default() -> Self {
        Self {
            ignored_dirs: owned(&[
                "node_modules",
                ".git",
                "dist",
                "build",
                ".next",
                "coverage",
                ".vscode",
                "images",
            ]),
            ignored_files: owned(&["README.md", ".DS_Store", "Thumbs.db", "package-lock.json"]),
            allowed_extensions: owned(&["js", "ts", "jsx", "tsx", "mjs", "cjs"]),
            ignored_extensions: owned(&[
                "md", "png", "jpg", "jpeg", "gif", "svg", "css", "scss", "json",
            ]),
            ignored_patterns: owned(&[".test.", ".spec.", ".config."]),
        }
    }
}

impl IgnoreRuleSet {
    /// Returns true if a directory with this name must not be descended into.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }

    /// Decides whether a file is scanned. The first failing check wins:
    /// exact name, accepted extension, rejected extension, then patterns.
    pub fn classify_file(&self, file_name: &str) -> FileDecision {
        if self.ignored_files.iter().any(|f| f == file_name) {
            return FileDecision::IgnoredName;
        }

        let ext = extension(file_name);
        if !self.allowed_extensions.iter().any(|e| Some(e.as_str()) == ext) {
            return FileDecision::UnsupportedExtension;
        }
        if self.ignored_extensions.iter().any(|e| Some(e.as_str()) == ext) {
            return FileDecision::IgnoredExtension;
        }

        if self
            .ignored_patterns
            .iter()
            .any(|p| file_name.contains(p.as_str()))
        {
            return FileDecision::IgnoredPattern;
        }

        FileDecision::Include
    }

    /// Convenience wrapper over [`IgnoreRuleSet::classify_file`].
    pub fn should_include(&self, file_name: &str) -> bool {
        self.classify_file(file_name).is_included()
    }
}

/// Extension after the last dot, ignoring a leading dot (`.env` has none).
fn extension(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        None
    } else {
        Some(ext)
    }
}
