//! Manifest schema validation.
//!
//! Runs before any network or filesystem mutation, for the root project and
//! for every fetched dependency. Returns the first violation found as a
//! human-readable `Manifest` error.

use std::collections::BTreeMap;

use semver::Version;

use gitdeps_util::errors::GitdepsError;

use crate::locator::RepoLocator;
use crate::manifest::{DependencyMap, Manifest, ProjectKind};
use crate::version::VersionRange;

/// Validate an application manifest: split dependency sections with exact
/// versions, split git-dependency sections keyed by repository locators.
pub fn validate_application(manifest: &Manifest) -> Result<(), GitdepsError> {
    if manifest.kind != ProjectKind::Application {
        return fail("'type' field of project.json has to be 'application'");
    }

    let (direct, indirect) = match &manifest.dependencies {
        DependencyMap::Split { direct, indirect } => (direct, indirect),
        DependencyMap::Flat(_) => {
            return fail(
                "'dependencies' in project.json should have 'direct' and 'indirect' sections",
            )
        }
    };
    check_exact_dependencies(direct, "dependencies.direct")?;
    check_exact_dependencies(indirect, "dependencies.indirect")?;

    let (git_direct, git_indirect) = match &manifest.git_dependencies {
        DependencyMap::Split { direct, indirect } => (direct, indirect),
        DependencyMap::Flat(_) => {
            return fail(
                "'git-dependencies' in gitdeps.json should have 'direct' and 'indirect' sections",
            )
        }
    };
    check_git_dependencies(git_direct, "git-dependencies.direct")?;
    check_git_dependencies(git_indirect, "git-dependencies.indirect")?;

    Ok(())
}

/// Validate a library manifest: flat dependency map of name => version
/// range, flat git-dependency map keyed by repository locators.
pub fn validate_library(manifest: &Manifest) -> Result<(), GitdepsError> {
    if manifest.kind != ProjectKind::Library {
        return fail("'type' field of project.json has to be 'library'");
    }

    let deps = match &manifest.dependencies {
        DependencyMap::Flat(map) => map,
        DependencyMap::Split { .. } => {
            return fail("'dependencies' in project.json should be a flat map of name => version range")
        }
    };
    for (name, spec) in deps {
        if VersionRange::parse(spec).is_none() {
            return fail(&format!(
                "'dependencies.{name}' in project.json should be a version range, got '{spec}'"
            ));
        }
    }

    let git_deps = match &manifest.git_dependencies {
        DependencyMap::Flat(map) => map,
        DependencyMap::Split { .. } => {
            return fail("'git-dependencies' in gitdeps.json should be a flat map of url => ref")
        }
    };
    for url in git_deps.keys() {
        RepoLocator::parse(url)?;
    }

    Ok(())
}

fn check_exact_dependencies(
    deps: &BTreeMap<String, String>,
    section: &str,
) -> Result<(), GitdepsError> {
    for (name, version) in deps {
        if !is_project_name(name) {
            return fail(&format!(
                "'{section}' in project.json should be keyed by owner/name, got '{name}'"
            ));
        }
        if Version::parse(version).is_err() {
            return fail(&format!(
                "'{section}.{name}' in project.json should be an exact version, got '{version}'"
            ));
        }
    }
    Ok(())
}

fn check_git_dependencies(
    deps: &BTreeMap<String, String>,
    _section: &str,
) -> Result<(), GitdepsError> {
    for url in deps.keys() {
        RepoLocator::parse(url)?;
    }
    Ok(())
}

/// Project names look like `owner/name`, both sides word characters.
fn is_project_name(name: &str) -> bool {
    let word = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    };
    match name.split_once('/') {
        Some((owner, rest)) => word(owner) && word(rest),
        None => false,
    }
}

fn fail(message: &str) -> Result<(), GitdepsError> {
    Err(GitdepsError::Manifest {
        message: message.to_string(),
    })
}
