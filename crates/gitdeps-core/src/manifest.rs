//! Manifest and lock document model.
//!
//! A project is described by two JSON documents: `project.json` (the primary
//! manifest: type, registry dependencies, source directories, plus arbitrary
//! fields owned by other tools) and `gitdeps.json` (the git-dependency
//! declarations; for applications this same document is the persisted lock,
//! split into `direct` and `indirect` maps). Reading merges the two by
//! top-level key, with the lock document winning. Writing rewrites only the
//! fields this engine owns and carries everything else through verbatim.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gitdeps_util::errors::GitdepsError;

use crate::{LOCK_FILE, MANIFEST_FILE};

/// The manifest discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Application,
    Library,
}

/// A dependency mapping, either split into `direct`/`indirect` sections
/// (applications) or flat (libraries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyMap {
    Split {
        direct: BTreeMap<String, String>,
        indirect: BTreeMap<String, String>,
    },
    Flat(BTreeMap<String, String>),
}

impl Default for DependencyMap {
    fn default() -> Self {
        DependencyMap::Flat(BTreeMap::new())
    }
}

impl DependencyMap {
    /// One flat view over all entries, direct and indirect alike.
    pub fn merged(&self) -> BTreeMap<String, String> {
        match self {
            DependencyMap::Flat(map) => map.clone(),
            DependencyMap::Split { direct, indirect } => {
                let mut merged = indirect.clone();
                merged.extend(direct.iter().map(|(k, v)| (k.clone(), v.clone())));
                merged
            }
        }
    }

    /// The direct entries (the whole map for flat declarations).
    pub fn direct(&self) -> &BTreeMap<String, String> {
        match self {
            DependencyMap::Flat(map) => map,
            DependencyMap::Split { direct, .. } => direct,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, DependencyMap::Split { .. })
    }
}

/// The merged in-memory view of a project's manifest documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "type")]
    pub kind: ProjectKind,

    #[serde(rename = "source-directories", default)]
    pub source_directories: Vec<String>,

    #[serde(default)]
    pub dependencies: DependencyMap,

    #[serde(rename = "git-dependencies", default)]
    pub git_dependencies: DependencyMap,

    /// Every other top-level field, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    /// Load and merge `project.json` and `gitdeps.json` from a directory.
    ///
    /// The lock document is optional; the manifest is not.
    pub fn load(dir: &Path) -> Result<Self, GitdepsError> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let mut merged = read_document(&manifest_path)?.ok_or_else(|| GitdepsError::Manifest {
            message: format!("{} not found", manifest_path.display()),
        })?;

        if let Some(lock) = read_document(&dir.join(LOCK_FILE))? {
            for (key, value) in lock {
                merged.insert(key, value);
            }
        }

        serde_json::from_value(Value::Object(merged)).map_err(|e| GitdepsError::Manifest {
            message: format!("{}: {e}", manifest_path.display()),
        })
    }

    /// Persist the manifest back to a directory.
    ///
    /// Only the fields this engine owns are rewritten in `project.json`
    /// (currently just `source-directories`); all other fields keep the
    /// values already on disk. For applications the git-dependency map is
    /// written to `gitdeps.json` as the new lock.
    pub fn store(&self, dir: &Path) -> Result<(), GitdepsError> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let mut on_disk = read_document(&manifest_path)?.ok_or_else(|| GitdepsError::Manifest {
            message: format!("{} not found", manifest_path.display()),
        })?;
        on_disk.insert(
            "source-directories".to_string(),
            serde_json::to_value(&self.source_directories).map_err(to_manifest_error)?,
        );
        write_document(&manifest_path, &Value::Object(on_disk))?;

        if self.kind == ProjectKind::Application {
            let lock = LockDocument {
                git_dependencies: self.git_dependencies.clone(),
                extra: Map::new(),
            };
            lock.store(&dir.join(LOCK_FILE))?;
        }

        Ok(())
    }

    /// Declared source directories, defaulting to `["src"]` when absent.
    pub fn source_dirs(&self) -> Vec<String> {
        if self.source_directories.is_empty() {
            vec!["src".to_string()]
        } else {
            self.source_directories.clone()
        }
    }
}

/// The standalone `gitdeps.json` document, for edits that must not disturb
/// the primary manifest (init, install).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockDocument {
    #[serde(rename = "git-dependencies")]
    pub git_dependencies: DependencyMap,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LockDocument {
    /// An empty application-shaped lock document.
    pub fn empty() -> Self {
        Self {
            git_dependencies: DependencyMap::Split {
                direct: BTreeMap::new(),
                indirect: BTreeMap::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, GitdepsError> {
        let doc = read_document(path)?.ok_or_else(|| GitdepsError::Manifest {
            message: format!("{} not found", path.display()),
        })?;
        serde_json::from_value(Value::Object(doc)).map_err(|e| GitdepsError::Manifest {
            message: format!("{}: {e}", path.display()),
        })
    }

    pub fn store(&self, path: &Path) -> Result<(), GitdepsError> {
        let value = serde_json::to_value(self).map_err(to_manifest_error)?;
        write_document(path, &value)
    }
}

fn read_document(path: &Path) -> Result<Option<Map<String, Value>>, GitdepsError> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|e| GitdepsError::Manifest {
        message: format!("{}: {e}", path.display()),
    })?;
    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(GitdepsError::Manifest {
            message: format!("{}: expected a JSON object", path.display()),
        }),
    }
}

fn write_document(path: &Path, value: &Value) -> Result<(), GitdepsError> {
    let mut content = serde_json::to_string_pretty(value).map_err(to_manifest_error)?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}

fn to_manifest_error(e: serde_json::Error) -> GitdepsError {
    GitdepsError::Manifest {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    const APP_MANIFEST: &str = r#"{
        "type": "application",
        "source-directories": ["src"],
        "dependencies": {
            "direct": { "owner/json": "1.1.3" },
            "indirect": {}
        },
        "custom-field": { "kept": true }
    }"#;

    const APP_LOCK: &str = r#"{
        "git-dependencies": {
            "direct": { "https://github.com/owner/extras.git": "1.0.0 <= v < 2.0.0" },
            "indirect": { "https://github.com/owner/leaf.git": "2.1.0" }
        }
    }"#;

    #[test]
    fn load_merges_manifest_and_lock() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), MANIFEST_FILE, APP_MANIFEST);
        write(tmp.path(), LOCK_FILE, APP_LOCK);

        let manifest = Manifest::load(tmp.path()).unwrap();
        assert_eq!(manifest.kind, ProjectKind::Application);
        assert_eq!(manifest.source_directories, vec!["src"]);
        assert!(manifest.git_dependencies.is_split());

        let merged = manifest.git_dependencies.merged();
        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged.get("https://github.com/owner/leaf.git"),
            Some(&"2.1.0".to_string())
        );
        assert!(manifest.extra.contains_key("custom-field"));
    }

    #[test]
    fn load_without_lock_document() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            MANIFEST_FILE,
            r#"{ "type": "library", "dependencies": { "owner/json": "1.0.0 <= v < 2.0.0" } }"#,
        );

        let manifest = Manifest::load(tmp.path()).unwrap();
        assert_eq!(manifest.kind, ProjectKind::Library);
        assert!(manifest.git_dependencies.merged().is_empty());
    }

    #[test]
    fn load_missing_manifest_fails() {
        let tmp = TempDir::new().unwrap();
        let err = Manifest::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn source_dirs_default_to_src() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), MANIFEST_FILE, r#"{ "type": "library" }"#);
        let manifest = Manifest::load(tmp.path()).unwrap();
        assert_eq!(manifest.source_dirs(), vec!["src"]);
    }

    #[test]
    fn store_preserves_unowned_fields() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), MANIFEST_FILE, APP_MANIFEST);
        write(tmp.path(), LOCK_FILE, APP_LOCK);

        let mut manifest = Manifest::load(tmp.path()).unwrap();
        manifest.source_directories =
            vec![".gitdeps/github.com/owner/extras/src".to_string(), "src".to_string()];
        manifest.git_dependencies = DependencyMap::Split {
            direct: BTreeMap::from([(
                "https://github.com/owner/extras.git".to_string(),
                "1.2.0".to_string(),
            )]),
            indirect: BTreeMap::from([(
                "https://github.com/owner/leaf.git".to_string(),
                "2.1.0".to_string(),
            )]),
        };
        manifest.store(tmp.path()).unwrap();

        let reread: Value =
            serde_json::from_str(&std::fs::read_to_string(tmp.path().join(MANIFEST_FILE)).unwrap())
                .unwrap();
        assert_eq!(reread["custom-field"]["kept"], Value::Bool(true));
        assert_eq!(reread["type"], "application");
        assert_eq!(
            reread["source-directories"][0],
            ".gitdeps/github.com/owner/extras/src"
        );
        // git-dependencies live in the lock document, not project.json
        assert!(reread.get("git-dependencies").is_none());

        let lock = LockDocument::load(&tmp.path().join(LOCK_FILE)).unwrap();
        assert_eq!(
            lock.git_dependencies.direct().get("https://github.com/owner/extras.git"),
            Some(&"1.2.0".to_string())
        );
    }

    #[test]
    fn flat_and_split_maps_deserialize_distinctly() {
        let flat: DependencyMap =
            serde_json::from_str(r#"{ "https://h/p.git": "1.0.0" }"#).unwrap();
        assert!(!flat.is_split());

        let split: DependencyMap =
            serde_json::from_str(r#"{ "direct": {}, "indirect": {} }"#).unwrap();
        assert!(split.is_split());
    }
}
