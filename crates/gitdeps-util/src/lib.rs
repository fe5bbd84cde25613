//! Shared utilities for the gitdeps dependency manager.
//!
//! This crate provides cross-cutting concerns used by all other gitdeps
//! crates: error types, filesystem helpers, cancellation tokens, async
//! process spawning, and terminal status output.

pub mod cancel;
pub mod errors;
pub mod fs;
pub mod process;
pub mod progress;
