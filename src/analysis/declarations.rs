//! Pattern-based extraction of import and export declarations.
//!
//! This is a textual scan, not a parse. It is correct on idiomatic ES
//! module syntax and may over- or under-match on unusual formatting
//! (multi-line import clauses, computed export names). Each rule scans
//! the whole text independently, so declarations are found at any
//! nesting depth and one statement may satisfy several rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{DeclarationKind, ExportDescriptor, ANONYMOUS_EXPORT};

const IDENT: &str = r"[A-Za-z_$][A-Za-z0-9_$]*";

static IMPORT_FROM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\s[^\n]*?\bfrom\s*['"]([^'"\n]*)['"]"#).unwrap()
});

static NAMED_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\bexport\s+(?:async\s+)?(function|const|class|type|interface)\s+({IDENT})"
    ))
    .unwrap()
});

// Group 2 is what follows the identifier, enough to tell `async function`
// from an async arrow function.
static DEFAULT_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\bexport\s+default\s+({IDENT})(\s*(?:function\b|\(|{IDENT}\s*=>))?"
    ))
    .unwrap()
});

static DEFAULT_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\bexport\s+default\s+(?:async\s+)?(?:function\b\s*\*?|class\b)\s*({IDENT})?"
    ))
    .unwrap()
});

static REEXPORT_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bexport\s*\{([^}]*)\}").unwrap());

static ALIAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+as\s+").unwrap());

static STAR_REEXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bexport\s*\*\s*from\s*['"]([^'"\n]*)['"]"#).unwrap()
});

/// Keywords that introduce a default declaration rather than name an identifier.
const DEFAULT_DECLARATION_KEYWORDS: [&str; 2] = ["function", "class"];

/// Imports and exports found in one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Import specifiers in order of appearance, duplicates kept.
    pub imports: Vec<String>,
    /// Export descriptors, grouped by rule and ordered by appearance within a rule.
    pub exports: Vec<ExportDescriptor>,
}

/// Turns the text of one file into its declarations.
///
/// Walker and snapshot code only depend on this trait, so a syntax-tree
/// based implementation can replace [`PatternExtractor`] without touching them.
pub trait DeclarationExtractor {
    fn extract(&self, source: &str) -> Declarations;
}

/// Regex-driven extractor covering ES module import/export syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DeclarationExtractor for PatternExtractor {
    fn extract(&self, source: &str) -> Declarations {
        let imports = extract_imports(source);

        let mut exports = Vec::new();
        collect_named_declarations(source, &mut exports);
        collect_default_identifiers(source, &mut exports);
        collect_default_declarations(source, &mut exports);
        collect_reexport_lists(source, &mut exports);
        collect_star_reexports(source, &mut exports);

        Declarations { imports, exports }
    }
}

/// Extracts declarations with the default [`PatternExtractor`].
pub fn extract(source: &str) -> Declarations {
    PatternExtractor.extract(source)
}

fn extract_imports(source: &str) -> Vec<String> {
    IMPORT_FROM
        .captures_iter(source)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn collect_named_declarations(source: &str, exports: &mut Vec<ExportDescriptor>) {
    for caps in NAMED_DECLARATION.captures_iter(source) {
        if let Some(kind) = DeclarationKind::from_keyword(&caps[1]) {
            exports.push(ExportDescriptor::named(kind, &caps[2]));
        }
    }
}

fn collect_default_identifiers(source: &str, exports: &mut Vec<ExportDescriptor>) {
    for caps in DEFAULT_IDENTIFIER.captures_iter(source) {
        let mut name = &caps[1];
        if DEFAULT_DECLARATION_KEYWORDS.contains(&name) {
            continue;
        }
        if name == "async" {
            match caps.get(2).map(|m| m.as_str().trim_start()) {
                // `export default async function`, handled as a declaration
                Some(rest) if rest.starts_with("function") => continue,
                // `export default async () => ...` or `async x => ...`
                Some(_) => name = ANONYMOUS_EXPORT,
                // a binding that happens to be called `async`
                None => {}
            }
        }
        exports.push(ExportDescriptor::Default {
            name: name.to_string(),
        });
    }
}

fn collect_default_declarations(source: &str, exports: &mut Vec<ExportDescriptor>) {
    for caps in DEFAULT_DECLARATION.captures_iter(source) {
        let name = caps
            .get(1)
            .map(|m| m.as_str())
            // `export default class extends Base {}`
            .filter(|name| *name != "extends")
            .unwrap_or(ANONYMOUS_EXPORT);
        exports.push(ExportDescriptor::Default {
            name: name.to_string(),
        });
    }
}

fn collect_reexport_lists(source: &str, exports: &mut Vec<ExportDescriptor>) {
    for caps in REEXPORT_LIST.captures_iter(source) {
        for entry in caps[1].split(',') {
            if let Some(name) = local_name(entry) {
                exports.push(ExportDescriptor::Reexport {
                    name: name.to_string(),
                });
            }
        }
    }
}

/// Local name of one `export { ... }` entry: `a as b` yields `a`.
fn local_name(entry: &str) -> Option<&str> {
    let entry = entry.trim();
    // `type Foo` drops the modifier; `type as t` exports a binding named `type`
    let entry = entry
        .strip_prefix("type ")
        .map(str::trim_start)
        .filter(|rest| !rest.is_empty() && !rest.starts_with("as "))
        .unwrap_or(entry);
    let name = ALIAS.split(entry).next().unwrap_or(entry).trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn collect_star_reexports(source: &str, exports: &mut Vec<ExportDescriptor>) {
    for caps in STAR_REEXPORT.captures_iter(source) {
        exports.push(ExportDescriptor::Star {
            from: caps[1].to_string(),
        });
    }
}
