//! High-level operations wiring CLI commands to the resolution engine.

pub mod ops_init;
pub mod ops_install;
pub mod ops_sync;
