//! Core data types for the gitdeps dependency manager.
//!
//! This crate defines the fundamental types that represent a gitdeps project:
//! the manifest and git-dependency lock documents, repository locators,
//! version range specifiers, and manifest schema validation.
//!
//! This crate is intentionally free of async code and process I/O.

/// Name of the primary project manifest.
pub const MANIFEST_FILE: &str = "project.json";

/// Name of the git-dependency document (declarations and, for applications,
/// the persisted lock).
pub const LOCK_FILE: &str = "gitdeps.json";

/// Root of the local dependency cache, one working checkout per repository.
pub const CACHE_DIR: &str = ".gitdeps";

pub mod locator;
pub mod manifest;
pub mod validate;
pub mod version;
