//! Shared resolution state, threaded explicitly through the traversal.

use std::collections::{BTreeMap, BTreeSet};

use gitdeps_core::version::VersionRange;
use gitdeps_core::CACHE_DIR;

use crate::conflict::ConflictReport;

/// All mutable state of one resolution run.
///
/// Created fresh per run, owned by the chain driver, discarded on failure,
/// and committed to disk only once at successful completion.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    /// url => resolved exact ref. Never holds an unresolved range.
    pub locked: BTreeMap<String, String>,
    /// urls already processed; once marked, a repository is never re-fetched
    /// or re-expanded in the same run.
    pub visited: BTreeSet<String>,
    /// Deduplicated source directories, kept sorted by construction.
    pub source_dirs: BTreeSet<String>,
    /// Non-fatal version conflicts encountered so far.
    pub conflicts: ConflictReport,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the lock from the root manifest's declarations.
    ///
    /// Values that are themselves ranges are skipped: the lock only ever
    /// holds exact refs, and a skipped range resolves against the
    /// repository's tags instead.
    pub fn seed_lock<'a>(&mut self, declared: impl IntoIterator<Item = (&'a String, &'a String)>) {
        for (url, reference) in declared {
            if VersionRange::parse(reference).is_none() {
                self.locked.insert(url.clone(), reference.clone());
            }
        }
    }

    /// Seed source directories from the root manifest, discarding entries
    /// already rooted under the dependency cache (stale output of a
    /// previous run).
    pub fn seed_sources<'a>(&mut self, dirs: impl IntoIterator<Item = &'a String>) {
        for dir in dirs {
            if !is_cache_rooted(dir) {
                self.source_dirs.insert(dir.clone());
            }
        }
    }

    /// Contribute one repository's source directories, rebased under its
    /// cache location (`base` is the `/`-separated cache-relative path).
    pub fn add_dependency_sources<'a>(
        &mut self,
        base: &str,
        dirs: impl IntoIterator<Item = &'a String>,
    ) {
        for dir in dirs {
            if is_cache_rooted(dir) {
                continue;
            }
            self.source_dirs.insert(format!("{base}/{dir}"));
        }
    }

    /// The final source-directory list, sorted and deduplicated.
    pub fn sorted_sources(&self) -> Vec<String> {
        self.source_dirs.iter().cloned().collect()
    }
}

fn is_cache_rooted(dir: &str) -> bool {
    dir == CACHE_DIR || dir.starts_with(&format!("{CACHE_DIR}/"))
}
