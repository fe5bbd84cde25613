//! Typed repository locators.
//!
//! A git dependency is keyed by its repository URL. Locators accept the
//! usual url schemes plus scp-style shorthand (`git@host:owner/repo.git`),
//! which is normalized to an `ssh://` url before any further use. The
//! normalized host and path also determine the repository's location in the
//! local cache, so every spelling of the same repository maps to one
//! working checkout.

use std::path::PathBuf;

use url::Url;

use gitdeps_util::errors::GitdepsError;

const ACCEPTED_SCHEMES: &[&str] = &["ssh", "git", "http", "https"];

/// A parsed and normalized git repository locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    url: Url,
    original: String,
}

impl RepoLocator {
    /// Parse a locator from a url or scp-style shorthand.
    pub fn parse(input: &str) -> Result<Self, GitdepsError> {
        let normalized = scp_shorthand(input).unwrap_or_else(|| input.to_string());

        let url = Url::parse(&normalized).map_err(|e| GitdepsError::Locator {
            url: input.to_string(),
            message: e.to_string(),
        })?;

        if !ACCEPTED_SCHEMES.contains(&url.scheme()) {
            return Err(GitdepsError::Locator {
                url: input.to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if url.host_str().is_none() {
            return Err(GitdepsError::Locator {
                url: input.to_string(),
                message: "missing host".to_string(),
            });
        }
        if url.path().trim_matches('/').is_empty() {
            return Err(GitdepsError::Locator {
                url: input.to_string(),
                message: "missing repository path".to_string(),
            });
        }

        Ok(Self {
            url,
            original: input.to_string(),
        })
    }

    /// The locator exactly as the manifest spelled it.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// `host/owner/repo`, with any trailing `.git` dropped. Always
    /// `/`-separated; used for status lines and manifest-visible paths.
    pub fn display_name(&self) -> String {
        let path = self.url.path().trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        format!("{}/{}", self.host(), path)
    }

    /// Relative location of this repository's checkout under the cache root.
    pub fn cache_subpath(&self) -> PathBuf {
        let mut subpath = PathBuf::from(self.host());
        let path = self.url.path().trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            subpath.push(segment);
        }
        subpath
    }
}

/// Normalize scp-style shorthand (`user@host:path`) to an `ssh://` url.
/// Returns `None` when the input is not in that form.
fn scp_shorthand(input: &str) -> Option<String> {
    let (user, rest) = input.split_once('@')?;
    let (host, path) = rest.split_once(':')?;
    if user.is_empty() || host.is_empty() || path.is_empty() {
        return None;
    }
    if !user.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
    {
        return None;
    }
    Some(format!("ssh://{user}@{host}/{path}"))
}

/// Expand an `owner/repo` shorthand (used by `gitdeps install`) to a full
/// GitHub url. Returns `None` when the input is not in that form.
pub fn expand_shorthand(spec: &str) -> Option<String> {
    let (owner, repo) = spec.split_once('/')?;
    let word = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    };
    if !word(owner) || !word(repo) || repo.contains('/') {
        return None;
    }
    Some(format!("https://github.com/{owner}/{repo}.git"))
}
