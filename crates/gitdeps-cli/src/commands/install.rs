//! Handler for `gitdeps install`.

use miette::Result;

pub async fn exec(locator: &str, reference: Option<&str>, verbose: bool) -> Result<()> {
    let project_root = super::project_root()?;
    gitdeps_ops::ops_install::install(&project_root, locator, reference, verbose).await
}
