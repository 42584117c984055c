//! Source tree scanning for srcmap.
//!
//! The [`IgnoreRuleSet`] decides which directories and files are eligible,
//! the [`TreeWalker`] lists them, and [`scan_project`] runs the declaration
//! extractor over each one to produce ordered [`FileRecord`]s.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use srcmap::analysis::PatternExtractor;
//! use srcmap::scanner::{scan_project, IgnoreRuleSet};
//!
//! let records = scan_project(Path::new("./web"), &IgnoreRuleSet::default(), &PatternExtractor)?;
//! for record in &records {
//!     println!("{}: {} imports", record.path, record.imports.len());
//! }
//! ```
//!
//! [`FileRecord`]: crate::model::FileRecord

pub mod ignore;
pub mod pipeline;
pub mod walker;

pub use ignore::{FileDecision, IgnoreRuleSet};
pub use pipeline::{relative_path, scan_project};
pub use walker::{walk, ScanError, ScanResult, TreeWalker};
