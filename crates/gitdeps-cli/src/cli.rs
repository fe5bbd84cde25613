//! CLI argument definitions for gitdeps.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module. Running
//! `gitdeps` with no subcommand is a full sync.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "gitdeps",
    version,
    about = "A dependency manager for git-hosted packages",
    long_about = "gitdeps resolves git-hosted dependencies declared in project.json and \
                  gitdeps.json: it clones them into a local .gitdeps cache, checks out \
                  exact refs or the best tag in a version range, and locks the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve all git dependencies and update the lock (the default)
    Sync,

    /// Scaffold an empty gitdeps.json in the current project
    Init,

    /// Add a git dependency and sync
    Install {
        /// Repository url or owner/repo GitHub shorthand
        locator: String,
        /// Exact ref or version range; defaults to the widest release range
        reference: Option<String>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
