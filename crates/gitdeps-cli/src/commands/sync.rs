//! Handler for `gitdeps sync` (and the bare `gitdeps` invocation).

use miette::Result;

pub async fn exec(verbose: bool) -> Result<()> {
    let project_root = super::project_root()?;
    gitdeps_ops::ops_sync::sync(&project_root, verbose).await
}
