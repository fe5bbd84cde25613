//! Handler for `gitdeps init`.

use miette::Result;

pub fn exec() -> Result<()> {
    let project_root = super::project_root()?;
    gitdeps_ops::ops_init::init(&project_root)
}
