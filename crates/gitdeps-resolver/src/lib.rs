//! Dependency resolution engine: transitive git-dependency traversal with
//! exactly-once visitation, version-range-to-tag resolution with lock-aware
//! reuse, branch-vs-tag classification, and deterministic reconciliation of
//! locks and source paths.

pub mod branch;
pub mod chain;
pub mod conflict;
pub mod context;
pub mod reconcile;
pub mod refs;
