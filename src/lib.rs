//! srcmap - Source tree inventory with versioned project snapshots
//!
//! This crate scans JavaScript/TypeScript source trees, extracts each
//! file's import specifiers and exported surface, and stores the result
//! as versioned snapshots indexed by a project registry.

pub mod analysis;
pub mod model;
pub mod scanner;
pub mod snapshot;
pub mod store;
