//! Command dispatch and handler modules.

mod init;
mod install;
mod sync;

use std::path::PathBuf;

use miette::Result;

use gitdeps_core::MANIFEST_FILE;
use gitdeps_util::errors::GitdepsError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        None | Some(Command::Sync) => sync::exec(cli.verbose).await,
        Some(Command::Init) => init::exec(),
        Some(Command::Install { locator, reference }) => {
            install::exec(&locator, reference.as_deref(), cli.verbose).await
        }
    }
}

/// The nearest ancestor directory holding a project manifest.
pub fn project_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(GitdepsError::Io)?;
    gitdeps_util::fs::find_ancestor_with(&cwd, MANIFEST_FILE).ok_or_else(|| {
        GitdepsError::Manifest {
            message: format!("No {MANIFEST_FILE} found in the current directory or any parent"),
        }
        .into()
    })
}
