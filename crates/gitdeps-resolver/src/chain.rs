//! Dependency chain builder: visits every repository in the transitive
//! dependency graph exactly once, driving clone/update/checkout and feeding
//! one shared resolution context throughout.
//!
//! The traversal is an explicit worklist processed by a loop. A url is
//! marked visited immediately when its entry is taken up, before any of its
//! own dependencies are expanded, so cycles terminate and diamonds are
//! fetched exactly once. Each step's git I/O completes before the next step
//! begins; no two operations ever touch the same repository concurrently.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use gitdeps_core::locator::RepoLocator;
use gitdeps_core::manifest::Manifest;
use gitdeps_core::validate::validate_library;
use gitdeps_core::version::parse_version;
use gitdeps_core::CACHE_DIR;
use gitdeps_git::GitClient;
use gitdeps_util::cancel::CancelToken;
use gitdeps_util::errors::GitdepsError;
use gitdeps_util::progress::status;

use crate::branch::ref_is_branch;
use crate::context::ResolutionContext;
use crate::refs::resolve_ref;

/// Drives one resolution run over a project's git dependencies.
pub struct ChainBuilder<'a, G> {
    git: &'a G,
    project_root: PathBuf,
    cancel: CancelToken,
}

impl<'a, G: GitClient> ChainBuilder<'a, G> {
    pub fn new(git: &'a G, project_root: impl Into<PathBuf>, cancel: CancelToken) -> Self {
        Self {
            git,
            project_root: project_root.into(),
            cancel,
        }
    }

    /// Process the root declarations and everything reachable from them.
    ///
    /// On failure the run aborts immediately; clones and checkouts already
    /// on disk are left as-is, and nothing is persisted.
    pub async fn run(
        &self,
        roots: &BTreeMap<String, String>,
        ctx: &mut ResolutionContext,
    ) -> Result<(), GitdepsError> {
        let mut work: Vec<(String, String)> = roots
            .iter()
            .rev()
            .map(|(url, reference)| (url.clone(), reference.clone()))
            .collect();

        while let Some((url, requested)) = work.pop() {
            if ctx.visited.contains(&url) {
                continue;
            }
            ctx.visited.insert(url.clone());
            self.cancel.check()?;

            let locator = RepoLocator::parse(&url)?;
            let repo_path = self
                .project_root
                .join(CACHE_DIR)
                .join(locator.cache_subpath());

            let reference = if repo_path.exists() {
                self.update(&locator, &url, &repo_path, &requested, ctx)
                    .await?
            } else {
                self.clone_and_resolve(&url, &repo_path, &requested, ctx)
                    .await?
            };

            let dep = Manifest::load(&repo_path)
                .and_then(|m| validate_library(&m).map(|()| m))
                .map_err(|e| prefix_manifest_error(&locator.display_name(), e))?;

            ctx.locked.insert(url.clone(), reference.clone());
            status(
                "Resolved",
                &format!("{} => {}", locator.display_name(), reference),
            );

            for (child_url, child_ref) in dep.git_dependencies.merged().into_iter().rev() {
                work.push((child_url, child_ref));
            }

            let base = format!("{}/{}", CACHE_DIR, locator.display_name());
            ctx.add_dependency_sources(&base, &dep.source_dirs());
        }

        Ok(())
    }

    /// First contact with a repository: clone, then resolve. A range that no
    /// tag of a fresh clone satisfies is unresolvable.
    async fn clone_and_resolve(
        &self,
        url: &str,
        repo_path: &Path,
        requested: &str,
        ctx: &mut ResolutionContext,
    ) -> Result<String, GitdepsError> {
        self.git.clone_repo(url, repo_path).await?;
        let reference = resolve_ref(self.git, repo_path, url, requested, ctx)
            .await?
            .ok_or_else(|| GitdepsError::UnresolvableRange {
                url: url.to_string(),
                range: requested.to_string(),
            })?;
        self.classify_and_checkout(url, repo_path, &reference).await?;
        Ok(reference)
    }

    /// Repository already cached: resolve, then fetch only when needed.
    async fn update(
        &self,
        locator: &RepoLocator,
        url: &str,
        repo_path: &Path,
        requested: &str,
        ctx: &mut ResolutionContext,
    ) -> Result<String, GitdepsError> {
        let resolved = resolve_ref(self.git, repo_path, url, requested, ctx).await?;
        let branches = self.git.branches(repo_path).await?;

        if let Some(reference) = &resolved {
            if branches.current == *reference {
                // already checked out at the resolved ref
                debug!(url, reference, "up to date");
                let tags = self.git.tags(repo_path).await?;
                if ref_is_branch(reference, &tags, &branches) {
                    return Err(GitdepsError::BranchRef {
                        url: url.to_string(),
                        reference: reference.clone(),
                    });
                }
                return Ok(reference.clone());
            }
            if *reference != requested && parse_version(reference).is_some() {
                // a range coerced to a concrete version: the tag is local
                self.classify_and_checkout(url, repo_path, reference).await?;
                return Ok(reference.clone());
            }
        }

        self.git.fetch(repo_path, "origin").await?;
        debug!(url, host = locator.host(), "fetched");

        let reference = match resolved {
            Some(reference) => reference,
            None => resolve_ref(self.git, repo_path, url, requested, ctx)
                .await?
                .ok_or_else(|| GitdepsError::UnresolvableRange {
                    url: url.to_string(),
                    range: requested.to_string(),
                })?,
        };
        self.classify_and_checkout(url, repo_path, &reference).await?;
        Ok(reference)
    }

    async fn classify_and_checkout(
        &self,
        url: &str,
        repo_path: &Path,
        reference: &str,
    ) -> Result<(), GitdepsError> {
        let tags = self.git.tags(repo_path).await?;
        let branches = self.git.branches(repo_path).await?;
        if ref_is_branch(reference, &tags, &branches) {
            return Err(GitdepsError::BranchRef {
                url: url.to_string(),
                reference: reference.to_string(),
            });
        }
        self.git.checkout(repo_path, reference).await
    }
}

fn prefix_manifest_error(name: &str, err: GitdepsError) -> GitdepsError {
    match err {
        GitdepsError::Manifest { message } => GitdepsError::Manifest {
            message: format!("{name}: {message}"),
        },
        other => other,
    }
}
