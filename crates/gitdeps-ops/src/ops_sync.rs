//! Operation: resolve all git dependencies and update the lock.

use std::path::Path;

use tracing::debug;

use gitdeps_core::manifest::{DependencyMap, Manifest};
use gitdeps_core::validate::validate_application;
use gitdeps_git::{GitClient, SystemGit};
use gitdeps_resolver::chain::ChainBuilder;
use gitdeps_resolver::context::ResolutionContext;
use gitdeps_resolver::reconcile::partition_lock;
use gitdeps_util::cancel::CancelToken;

/// Full resolution run against the system git binary, cancelled on Ctrl-C.
pub async fn sync(project_root: &Path, verbose: bool) -> miette::Result<()> {
    let cancel = CancelToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let git = SystemGit::new(cancel.clone());
    sync_with(&git, project_root, verbose, cancel).await
}

/// The sync operation against any [`GitClient`].
///
/// Validates the root manifest, walks the transitive dependency chain, and
/// only after the whole traversal succeeds writes the merged source
/// directories back to `project.json` and the partitioned lock to
/// `gitdeps.json`. Any failure leaves both files untouched.
pub async fn sync_with<G: GitClient>(
    git: &G,
    project_root: &Path,
    verbose: bool,
    cancel: CancelToken,
) -> miette::Result<()> {
    let mut manifest = Manifest::load(project_root)?;
    validate_application(&manifest)?;

    let declared = manifest.git_dependencies.merged();
    let original_direct = manifest.git_dependencies.direct().clone();
    debug!(count = declared.len(), "declared git dependencies");

    let mut ctx = ResolutionContext::new();
    ctx.seed_lock(&declared);
    ctx.seed_sources(&manifest.source_directories);

    let chain = ChainBuilder::new(git, project_root, cancel);
    chain.run(&declared, &mut ctx).await?;

    if !ctx.conflicts.is_empty() && verbose {
        eprintln!("{}", ctx.conflicts);
    }

    let (direct, indirect) = partition_lock(&ctx.locked, &original_direct);
    manifest.git_dependencies = DependencyMap::Split { direct, indirect };
    manifest.source_directories = ctx.sorted_sources();
    manifest.store(project_root)?;

    eprintln!("Resolved {} git dependencies", ctx.locked.len());
    Ok(())
}
