use std::path::Path;
use std::process::Output;
use std::time::Duration;

use tracing::debug;

use gitdeps_util::cancel::CancelToken;
use gitdeps_util::errors::GitdepsError;
use gitdeps_util::process::{CommandBuilder, DEFAULT_TIMEOUT};

/// Branch listing of a working checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchSummary {
    /// The checked-out branch, or the detachment label when detached.
    pub current: String,
    /// Whether HEAD is detached (checked out at a tag or sha).
    pub detached: bool,
    /// All branch names, local and remote-tracking, as git lists them.
    pub all: Vec<String>,
}

/// The narrow git interface the resolution engine consumes.
///
/// Every operation is fallible and fatal to the run on failure; the local
/// cache is left as-is so a retry resumes from an already-present state.
#[allow(async_fn_in_trait)]
pub trait GitClient {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitdepsError>;
    async fn fetch(&self, repo: &Path, remote: &str) -> Result<(), GitdepsError>;
    async fn checkout(&self, repo: &Path, reference: &str) -> Result<(), GitdepsError>;
    async fn tags(&self, repo: &Path) -> Result<Vec<String>, GitdepsError>;
    async fn branches(&self, repo: &Path) -> Result<BranchSummary, GitdepsError>;
}

/// [`GitClient`] implementation over the system `git` binary.
pub struct SystemGit {
    cancel: CancelToken,
    timeout: Duration,
}

impl SystemGit {
    pub fn new(cancel: CancelToken) -> Self {
        Self {
            cancel,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(
        &self,
        repo: Option<&Path>,
        args: &[&str],
        op: &str,
    ) -> Result<Output, GitdepsError> {
        debug!(op, ?repo, "git {}", args.join(" "));
        let mut builder = CommandBuilder::new("git")
            .args(args.iter().copied())
            .timeout(self.timeout);
        if let Some(repo) = repo {
            builder = builder.cwd(repo);
        }
        let output = builder.exec(&self.cancel).await?;
        if !output.status.success() {
            return Err(GitdepsError::Vcs {
                op: op.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl GitClient for SystemGit {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitdepsError> {
        let dest = dest.to_string_lossy();
        self.run(None, &["clone", url, &dest], "clone").await?;
        Ok(())
    }

    async fn fetch(&self, repo: &Path, remote: &str) -> Result<(), GitdepsError> {
        self.run(Some(repo), &["fetch", remote], "fetch").await?;
        Ok(())
    }

    async fn checkout(&self, repo: &Path, reference: &str) -> Result<(), GitdepsError> {
        self.run(Some(repo), &["checkout", reference], "checkout")
            .await?;
        Ok(())
    }

    async fn tags(&self, repo: &Path) -> Result<Vec<String>, GitdepsError> {
        let output = self.run(Some(repo), &["tag", "--list"], "tag").await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    async fn branches(&self, repo: &Path) -> Result<BranchSummary, GitdepsError> {
        let output = self.run(Some(repo), &["branch", "--all"], "branch").await?;
        Ok(parse_branch_listing(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `git branch --all` output.
///
/// Lines look like `* main`, `  dev`, `  remotes/origin/main`, or
/// `* (HEAD detached at v1.2.0)`. Symbolic refs (`origin/HEAD -> ...`) are
/// skipped; the detachment label becomes `current` but is not a branch.
fn parse_branch_listing(listing: &str) -> BranchSummary {
    let mut summary = BranchSummary::default();
    for line in listing.lines() {
        let current = line.starts_with('*');
        let name = line.trim_start_matches('*').trim();
        if name.is_empty() || name.contains("->") {
            continue;
        }
        if let Some(label) = name
            .strip_prefix("(HEAD detached at ")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            summary.current = label.to_string();
            summary.detached = true;
            continue;
        }
        if current {
            summary.current = name.to_string();
        }
        summary.all.push(name.to_string());
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_listing() {
        let summary = parse_branch_listing("* main\n  dev\n  remotes/origin/main\n");
        assert_eq!(summary.current, "main");
        assert!(!summary.detached);
        assert_eq!(summary.all, vec!["main", "dev", "remotes/origin/main"]);
    }

    #[test]
    fn parses_detached_head() {
        let summary =
            parse_branch_listing("* (HEAD detached at v1.2.0)\n  main\n  remotes/origin/main\n");
        assert_eq!(summary.current, "v1.2.0");
        assert!(summary.detached);
        // the detachment label is not a branch
        assert_eq!(summary.all, vec!["main", "remotes/origin/main"]);
    }

    #[test]
    fn skips_symbolic_refs() {
        let summary =
            parse_branch_listing("* main\n  remotes/origin/HEAD -> origin/main\n  remotes/origin/main\n");
        assert_eq!(summary.all, vec!["main", "remotes/origin/main"]);
    }

    #[test]
    fn empty_listing() {
        let summary = parse_branch_listing("");
        assert_eq!(summary, BranchSummary::default());
    }
}
