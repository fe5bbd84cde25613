//! Ref resolution: requested specifier + lock state to one concrete ref.

use std::path::Path;

use tracing::warn;

use gitdeps_core::version::{parse_version, VersionRange};
use gitdeps_git::GitClient;
use gitdeps_util::errors::GitdepsError;

use crate::conflict::VersionConflict;
use crate::context::ResolutionContext;

/// Resolve a requested specifier to a concrete ref.
///
/// - Not a range: the specifier is an exact pin, returned unchanged.
/// - Already locked: the locked value wins. If it parses as a version that
///   does not satisfy the range, a non-fatal conflict is recorded and the
///   locked value is still returned.
/// - Otherwise: the maximum repository tag satisfying the range, or `None`
///   when no tag does (the caller may fetch and retry once).
pub async fn resolve_ref<G: GitClient>(
    git: &G,
    repo: &Path,
    url: &str,
    requested: &str,
    ctx: &mut ResolutionContext,
) -> Result<Option<String>, GitdepsError> {
    let range = match VersionRange::parse(requested) {
        None => return Ok(Some(requested.to_string())),
        Some(range) => range,
    };

    if let Some(locked) = ctx.locked.get(url) {
        if let Some(version) = parse_version(locked) {
            if !range.contains(&version) {
                warn!(url, requested, locked, "locked version outside requested range");
                ctx.conflicts.add(VersionConflict {
                    url: url.to_string(),
                    requested: requested.to_string(),
                    locked: locked.clone(),
                });
            }
        }
        return Ok(Some(locked.clone()));
    }

    let tags = git.tags(repo).await?;
    Ok(best_matching_tag(&range, &tags))
}

/// The tag with the maximum version satisfying `range`, under semver
/// ordering. Tags that do not parse as versions are ignored.
pub fn best_matching_tag(range: &VersionRange, tags: &[String]) -> Option<String> {
    tags.iter()
        .filter_map(|tag| parse_version(tag).map(|version| (version, tag)))
        .filter(|(version, _)| range.contains(version))
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, tag)| tag.clone())
}
