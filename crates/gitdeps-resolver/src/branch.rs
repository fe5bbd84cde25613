//! Branch-vs-tag classification.
//!
//! Only tags and shas are reproducible pins; a ref that names a mutable
//! branch is rejected. A sha can collide with a branch name, so a detached
//! HEAD at exactly the candidate ref overrides the branch verdict.

use std::collections::HashMap;
use std::collections::HashSet;

use gitdeps_git::BranchSummary;

const REMOTE_PREFIX: &str = "remotes/origin/";

/// Decide whether `reference` names a mutable branch.
///
/// Branch names are normalized by stripping the remote-tracking prefix. A
/// name found among branches but not among tags is a branch, unless HEAD is
/// currently detached at exactly that name.
pub fn ref_is_branch(reference: &str, tags: &[String], branches: &BranchSummary) -> bool {
    let tag_set: HashSet<&str> = tags.iter().map(String::as_str).collect();

    let mut verdict: HashMap<&str, bool> = HashMap::new();
    for branch in &branches.all {
        let name = branch.strip_prefix(REMOTE_PREFIX).unwrap_or(branch);
        if !tag_set.contains(name) {
            verdict.insert(name, true);
        }
    }
    if branches.detached {
        verdict.insert(branches.current.as_str(), false);
    }

    verdict.get(reference).copied().unwrap_or(false)
}
