use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all gitdeps operations.
#[derive(Debug, Error, Diagnostic)]
pub enum GitdepsError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (project.json / gitdeps.json).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your project.json and gitdeps.json for schema errors"))]
    Manifest { message: String },

    /// A git-dependency key is not a parseable repository locator.
    #[error("Invalid repository locator '{url}': {message}")]
    Locator { url: String, message: String },

    /// No tag in the repository satisfies the requested version range.
    #[error("No tag of {url} satisfies the range {range}")]
    UnresolvableRange { url: String, range: String },

    /// The resolved ref names a mutable branch.
    #[error("Ref '{reference}' of {url} is a branch")]
    #[diagnostic(help("Branches are not supported; use semver tags or shas"))]
    BranchRef { url: String, reference: String },

    /// A git operation exited with a failure status.
    #[error("git {op} failed: {message}")]
    Vcs { op: String, message: String },

    /// The install target is already declared as a direct dependency.
    #[error("{url} is already installed")]
    AlreadyInstalled { url: String },

    /// A git operation exceeded its time budget.
    #[error("git {op} timed out after {seconds}s")]
    Timeout { op: String, seconds: u64 },

    /// The run was cancelled before completion.
    #[error("operation cancelled")]
    Cancelled,

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type GitdepsResult<T> = miette::Result<T>;
