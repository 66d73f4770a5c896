//! Umbrella projects and the implicit dependency sets their modules provide.

use std::path::{Path, PathBuf};

use depsets_util::errors::DepsetsError;
use depsets_util::fs::find_ancestor_with;
use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

use crate::catalog::{Catalog, DependencySetDef, SetId, SetOrigin};
use crate::manifest::{Manifest, ModulesConfig};
use crate::package::Package;
use crate::MANIFEST_FILE;

/// Directories never descended into while expanding member globs.
const SKIPPED_DIRS: &[&str] = &["target", "build", "node_modules"];

/// An umbrella project: a root manifest with `[modules]` and its member packages.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub members: Vec<Package>,
}

impl Workspace {
    /// Load every member of the umbrella rooted at `root_dir`.
    ///
    /// Members whose manifest cannot be read are skipped with a warning.
    pub fn load(root_dir: &Path, modules: &ModulesConfig) -> miette::Result<Self> {
        let mut members = Vec::new();
        for dir in member_dirs(root_dir, modules)? {
            match Package::from_dir(&dir) {
                Ok(package) => members.push(package),
                Err(e) => tracing::warn!("Skipping module {}: {e}", dir.display()),
            }
        }
        tracing::debug!(
            "umbrella {} has {} module(s)",
            root_dir.display(),
            members.len()
        );
        Ok(Self { members })
    }

    /// One implicit set per member, keyed by the member's `group:name`,
    /// holding a single dependency on the member at its current version.
    pub fn sibling_catalog(&self) -> Catalog {
        self.members
            .iter()
            .map(|member| {
                let def = DependencySetDef {
                    dependencies: vec![member.as_dependency()],
                    extends: Vec::new(),
                    origin: SetOrigin::Sibling,
                };
                (SetId::new(member.identity().to_string()), def)
            })
            .collect()
    }
}

/// Locate the nearest directory at or above `start` whose manifest declares
/// `[modules]`, without loading any member.
pub fn find_umbrella(start: &Path) -> Option<(PathBuf, ModulesConfig)> {
    let mut search = Some(start.to_path_buf());
    while let Some(dir) = search.take() {
        let found = find_ancestor_with(&dir, MANIFEST_FILE)?;
        match Manifest::from_path(&found.join(MANIFEST_FILE)) {
            Ok(manifest) => {
                if let Some(modules) = manifest.modules {
                    return Some((found, modules));
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable manifest in {} while looking for an umbrella: {e}",
                    found.display()
                );
            }
        }
        search = found.parent().map(Path::to_path_buf);
    }
    None
}

/// Expand `[modules]` members into module directories, in declaration order.
///
/// Literal members are taken as-is; glob members match directories (relative
/// to `root`) that contain a `Project.toml`, sorted by path.
pub fn member_dirs(root: &Path, modules: &ModulesConfig) -> miette::Result<Vec<PathBuf>> {
    let exclude = build_globset(&modules.exclude)?;
    let mut dirs: Vec<PathBuf> = Vec::new();

    for pattern in &modules.members {
        let matched = if is_glob(pattern) {
            let matcher = compile(pattern)?.compile_matcher();
            glob_dirs(root, &matcher)
        } else {
            let dir = root.join(pattern);
            if !dir.join(MANIFEST_FILE).is_file() {
                tracing::warn!("Module `{pattern}` has no {MANIFEST_FILE}");
                continue;
            }
            vec![dir]
        };

        for dir in matched {
            let relative = dir.strip_prefix(root).unwrap_or(&dir);
            if exclude.is_match(relative) || dirs.contains(&dir) {
                continue;
            }
            dirs.push(dir);
        }
    }
    Ok(dirs)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

fn compile(pattern: &str) -> miette::Result<globset::Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| {
            DepsetsError::Manifest {
                message: format!("Invalid module pattern `{pattern}`: {e}"),
            }
            .into()
        })
}

fn build_globset(patterns: &[String]) -> miette::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile(pattern)?);
    }
    builder.build().map_err(|e| {
        DepsetsError::Manifest {
            message: format!("Invalid module exclude patterns: {e}"),
        }
        .into()
    })
}

/// Walk `root` and collect directories matching `matcher` that hold a manifest.
fn glob_dirs(root: &Path, matcher: &GlobMatcher) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to read directory {}: {e}", dir.display());
                continue;
            }
        };
        for entry in entries.flatten() {
            // symlinked directories are not followed
            if !entry.file_type().is_ok_and(|t| t.is_dir()) {
                continue;
            }
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || SKIPPED_DIRS.iter().any(|d| name == *d) {
                continue;
            }
            if let Ok(relative) = path.strip_prefix(root) {
                if matcher.is_match(relative) && path.join(MANIFEST_FILE).is_file() {
                    found.push(path.clone());
                }
            }
            stack.push(path);
        }
    }

    found.sort();
    found
}
