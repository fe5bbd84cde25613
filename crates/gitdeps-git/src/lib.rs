//! Git collaborator for the gitdeps dependency manager.
//!
//! The resolution engine consumes git through the narrow [`GitClient`]
//! trait; [`SystemGit`] implements it by shelling out to the system `git`
//! binary (the same approach Cargo takes), with a bounded per-operation
//! timeout and cooperative cancellation.

pub mod client;

pub use client::{BranchSummary, GitClient, SystemGit};
