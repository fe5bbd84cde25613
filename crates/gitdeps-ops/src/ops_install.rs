//! Operation: register a new git dependency and sync.

use std::path::Path;

use gitdeps_core::locator::{expand_shorthand, RepoLocator};
use gitdeps_core::manifest::{DependencyMap, LockDocument};
use gitdeps_core::LOCK_FILE;
use gitdeps_util::errors::GitdepsError;
use gitdeps_util::progress::status;

/// Ref registered when none is given: any released version, newest wins.
pub const DEFAULT_RANGE: &str = "0.0.0 <= v < 9000.0.0";

/// Register a dependency as a direct declaration, then run a full sync.
pub async fn install(
    project_root: &Path,
    spec: &str,
    reference: Option<&str>,
    verbose: bool,
) -> miette::Result<()> {
    register(project_root, spec, reference)?;
    crate::ops_sync::sync(project_root, verbose).await
}

/// Add the locator to the lock document's direct declarations.
///
/// Accepts a full repository url or `owner/repo` shorthand. Fails with
/// `AlreadyInstalled` when the url is already declared directly.
pub fn register(
    project_root: &Path,
    spec: &str,
    reference: Option<&str>,
) -> Result<(), GitdepsError> {
    let expanded = expand_shorthand(spec).unwrap_or_else(|| spec.to_string());
    let locator = RepoLocator::parse(&expanded)?;
    let url = locator.as_str().to_string();
    let requested = reference.unwrap_or(DEFAULT_RANGE);

    let lock_path = project_root.join(LOCK_FILE);
    let mut lock = if lock_path.is_file() {
        LockDocument::load(&lock_path)?
    } else {
        LockDocument::empty()
    };

    match &mut lock.git_dependencies {
        DependencyMap::Split { direct, .. } => {
            if direct.contains_key(&url) {
                return Err(GitdepsError::AlreadyInstalled { url });
            }
            direct.insert(url.clone(), requested.to_string());
        }
        DependencyMap::Flat(_) => {
            return Err(GitdepsError::Manifest {
                message: format!(
                    "'git-dependencies' in {LOCK_FILE} should have 'direct' and 'indirect' sections"
                ),
            });
        }
    }
    lock.store(&lock_path)?;
    status(
        "Added",
        &format!("{} => {}", locator.display_name(), requested),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn lock_value(dir: &Path) -> serde_json::Value {
        let content = std::fs::read_to_string(dir.join(LOCK_FILE)).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn registers_shorthand_with_default_range() {
        let tmp = TempDir::new().unwrap();
        register(tmp.path(), "owner/widgets", None).unwrap();

        let lock = lock_value(tmp.path());
        assert_eq!(
            lock["git-dependencies"]["direct"]["https://github.com/owner/widgets.git"],
            serde_json::json!(DEFAULT_RANGE)
        );
    }

    #[test]
    fn registers_full_url_with_explicit_ref() {
        let tmp = TempDir::new().unwrap();
        register(tmp.path(), "git@github.com:owner/widgets.git", Some("1.2.0")).unwrap();

        let lock = lock_value(tmp.path());
        assert_eq!(
            lock["git-dependencies"]["direct"]["git@github.com:owner/widgets.git"],
            serde_json::json!("1.2.0")
        );
    }

    #[test]
    fn rejects_repeated_direct_declaration() {
        let tmp = TempDir::new().unwrap();
        register(tmp.path(), "owner/widgets", None).unwrap();
        let err = register(tmp.path(), "owner/widgets", Some("2.0.0")).unwrap_err();

        assert!(matches!(err, GitdepsError::AlreadyInstalled { .. }));
        // the first declaration is untouched
        let lock = lock_value(tmp.path());
        assert_eq!(
            lock["git-dependencies"]["direct"]["https://github.com/owner/widgets.git"],
            serde_json::json!(DEFAULT_RANGE)
        );
    }

    #[test]
    fn rejects_invalid_locator() {
        let tmp = TempDir::new().unwrap();
        let err = register(tmp.path(), "not a url", None).unwrap_err();
        assert!(matches!(err, GitdepsError::Locator { .. }));
    }
}
