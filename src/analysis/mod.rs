//! Source code analysis module for srcmap.
//!
//! This module extracts the inbound dependencies (import specifiers) and
//! the outbound surface (exported functions, constants, classes, types,
//! interfaces, re-exports) of a single JavaScript/TypeScript file.
//!
//! # Example
//!
//! ```
//! use srcmap::analysis::{DeclarationExtractor, PatternExtractor};
//!
//! let source = "import { get } from './http';\nexport const api = get;\n";
//! let decls = PatternExtractor::new().extract(source);
//!
//! assert_eq!(decls.imports, vec!["./http"]);
//! assert_eq!(decls.exports[0].name(), Some("api"));
//! ```

pub mod declarations;

// Re-export main types for convenience
pub use declarations::{extract, DeclarationExtractor, Declarations, PatternExtractor};
