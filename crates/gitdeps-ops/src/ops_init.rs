//! Operation: scaffold the lock document for an existing project.

use std::path::Path;

use gitdeps_core::manifest::LockDocument;
use gitdeps_core::LOCK_FILE;
use gitdeps_util::progress::{status, status_info};

/// Create an empty `gitdeps.json` next to the project manifest. A no-op
/// with a notice when the file already exists.
pub fn init(project_root: &Path) -> miette::Result<()> {
    let path = project_root.join(LOCK_FILE);
    if path.is_file() {
        status_info("Exists", &format!("{LOCK_FILE} is already present"));
        return Ok(());
    }
    LockDocument::empty().store(&path)?;
    status("Created", LOCK_FILE);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn scaffolds_empty_lock_document() {
        let tmp = TempDir::new().unwrap();
        init(tmp.path()).unwrap();

        let content = std::fs::read_to_string(tmp.path().join(LOCK_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "git-dependencies": { "direct": {}, "indirect": {} }
            })
        );
    }

    #[test]
    fn init_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        init(tmp.path()).unwrap();
        let before = std::fs::read_to_string(tmp.path().join(LOCK_FILE)).unwrap();

        init(tmp.path()).unwrap();
        let after = std::fs::read_to_string(tmp.path().join(LOCK_FILE)).unwrap();
        assert_eq!(before, after);
    }
}
